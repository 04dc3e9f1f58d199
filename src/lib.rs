#![forbid(unsafe_code)]

//! Carbon footprint engine: weighted sum of activity values against fixed
//! emission coefficients, minus eco-task credits, bucketed into tiers.

pub mod config;
pub mod engine;
pub mod error;
pub mod session;
pub mod tasks;
pub mod types;

pub use config::{CoefficientTable, EngineConfig};
pub use engine::{
    build_breakdown, classify_tier, compute_reduction, compute_total, progress,
    transport_overview, EmissionsEngine, ThresholdTiers, TierClassifier,
};
pub use error::{ConfigLoadError, ConfigurationError};
pub use session::{CalculatorSession, Step};
pub use tasks::TaskBoard;
pub use types::{
    ActivityInput, BreakdownEntry, Category, EcoTask, EmissionsResult, Field, ProgressGauge, Tier,
    TierAssessment, TransportInput, TransportMode,
};
