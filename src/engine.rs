use tracing::debug;

use crate::config::{CoefficientTable, EngineConfig};
use crate::error::ConfigurationError;
use crate::types::{
    ActivityInput, BreakdownEntry, EcoTask, EmissionsResult, ProgressGauge, Tier, TierAssessment,
    TransportInput, TransportMode, TransportOverviewRow,
};

/// Round to two decimals, halves away from zero. Never returns `-0.0`.
pub fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Net footprint: Σ value × coefficient over every field, minus the
/// completed eco-task credit, rounded to cents. Not floored at zero.
pub fn compute_total(
    input: &ActivityInput,
    coefficients: &CoefficientTable,
    completed_reduction: f64,
) -> Result<f64, ConfigurationError> {
    let mut gross = 0.0;
    for (field, value) in input.entries() {
        gross += value * coefficients.get(field)?;
    }
    Ok(round_cents(gross - completed_reduction))
}

/// Sum of `co2_reduction` over completed tasks.
pub fn compute_reduction(tasks: &[EcoTask]) -> f64 {
    tasks
        .iter()
        .filter(|t| t.completed)
        .map(|t| t.co2_reduction)
        .sum()
}

/// Trait for mapping a net total onto a severity tier.
pub trait TierClassifier {
    fn classify(&self, total: f64) -> Tier;
}

/// Two ascending thresholds; a value equal to a threshold belongs to the upper tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTiers {
    pub low_medium: f64,
    pub medium_high: f64,
}

impl ThresholdTiers {
    pub const STANDARD: ThresholdTiers = ThresholdTiers {
        low_medium: 1000.0,
        medium_high: 2000.0,
    };
}

impl Default for ThresholdTiers {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl TierClassifier for ThresholdTiers {
    fn classify(&self, total: f64) -> Tier {
        if total < self.low_medium {
            Tier::Low
        } else if total < self.medium_high {
            Tier::Medium
        } else {
            Tier::High
        }
    }
}

/// Tier and display message under the standard 1000 / 2000 thresholds.
pub fn classify_tier(total: f64) -> TierAssessment {
    let tier = ThresholdTiers::STANDARD.classify(total);
    TierAssessment {
        tier,
        message: tier.message(),
    }
}

fn distance(transport: &TransportInput, mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Car => transport.voiture,
        TransportMode::Plane => transport.avion,
        TransportMode::PublicTransit => transport.transports_commun,
        TransportMode::Bicycle => 0.0,
    }
}

fn mode_emissions(
    transport: &TransportInput,
    mode: TransportMode,
    coefficients: &CoefficientTable,
) -> Result<f64, ConfigurationError> {
    match mode.field() {
        Some(field) => Ok(distance(transport, mode) * coefficients.get(field)?),
        None => Ok(0.0),
    }
}

/// Per-mode transport emissions in chart order: car, plane, public transit, bicycle.
pub fn build_breakdown(
    transport: &TransportInput,
    coefficients: &CoefficientTable,
) -> Result<Vec<BreakdownEntry>, ConfigurationError> {
    TransportMode::CHART_ORDER
        .into_iter()
        .map(|mode| {
            Ok(BreakdownEntry {
                mode,
                category: mode.label(),
                value: mode_emissions(transport, mode, coefficients)?,
                color: mode.color(),
            })
        })
        .collect()
}

/// Distance and emissions per transport mode, same order as the breakdown.
pub fn transport_overview(
    transport: &TransportInput,
    coefficients: &CoefficientTable,
) -> Result<Vec<TransportOverviewRow>, ConfigurationError> {
    TransportMode::CHART_ORDER
        .into_iter()
        .map(|mode| {
            Ok(TransportOverviewRow {
                mode,
                name: mode.label(),
                distance: distance(transport, mode),
                emissions: mode_emissions(transport, mode, coefficients)?,
                unit: mode.unit(),
                period: mode.period(),
            })
        })
        .collect()
}

/// Progress indicator state of `total` against a yearly `target`.
pub fn progress(total: f64, target: f64) -> ProgressGauge {
    let fill_ratio = if target <= 0.0 {
        0.0
    } else {
        (total / target).clamp(0.0, 1.0)
    };
    ProgressGauge {
        value: total,
        target,
        fill_ratio,
        exceeded: total > target,
    }
}

/// Stateless engine bound to a validated configuration. Every call takes the
/// caller's full snapshot; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct EmissionsEngine {
    config: EngineConfig,
    tiers: ThresholdTiers,
}

impl EmissionsEngine {
    /// Validates `config` up front so a defective table fails here, not mid-evaluation.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            config,
            tiers: ThresholdTiers::STANDARD,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Total, tier, breakdown and progress for one snapshot.
    pub fn evaluate(
        &self,
        input: &ActivityInput,
        tasks: &[EcoTask],
    ) -> Result<EmissionsResult, ConfigurationError> {
        let reduction = compute_reduction(tasks);
        let total = compute_total(input, &self.config.coefficients, reduction)?;
        let tier = self.tiers.classify(total);
        let breakdown = build_breakdown(&input.transport, &self.config.coefficients)?;

        debug!(total, reduction, ?tier, "evaluated footprint");

        Ok(EmissionsResult {
            total,
            tier,
            message: tier.message(),
            breakdown,
            progress: progress(total, self.config.target_kg),
        })
    }

    pub fn transport_overview(
        &self,
        transport: &TransportInput,
    ) -> Result<Vec<TransportOverviewRow>, ConfigurationError> {
        transport_overview(transport, &self.config.coefficients)
    }
}
