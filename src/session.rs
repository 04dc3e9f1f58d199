use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::engine::EmissionsEngine;
use crate::error::ConfigurationError;
use crate::tasks::TaskBoard;
use crate::types::{ActivityInput, EmissionsResult, Field};

/// Questionnaire steps. The food step loops back to the overview.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum Step {
    #[default]
    Overview,
    Transport,
    Maison,
    Alimentation,
}

impl Step {
    pub fn next(self) -> Step {
        match self {
            Step::Overview => Step::Transport,
            Step::Transport => Step::Maison,
            Step::Maison => Step::Alimentation,
            Step::Alimentation => Step::Overview,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Overview => None,
            Step::Transport => Some(Step::Overview),
            Step::Maison => Some(Step::Transport),
            Step::Alimentation => Some(Step::Maison),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Overview => "Votre Consommation",
            Step::Transport => "Transport",
            Step::Maison => "Maison",
            Step::Alimentation => "Alimentation",
        }
    }
}

/// Turn raw form text into an engine-safe value. Empty, unparsable,
/// non-finite and negative input all become 0.
pub fn coerce_input(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) => coerce_value(v),
        Err(_) => {
            warn!("non-numeric input {trimmed:?}, treating as 0");
            0.0
        }
    }
}

pub fn coerce_value(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Caller-side state: the canonical snapshot the engine is re-run against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorSession {
    input: ActivityInput,
    tasks: TaskBoard,
    step: Step,
}

impl CalculatorSession {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            input: ActivityInput::default(),
            tasks: TaskBoard::new(&config.tasks),
            step: Step::Overview,
        }
    }

    pub fn input(&self) -> &ActivityInput {
        &self.input
    }

    pub fn tasks(&self) -> &TaskBoard {
        &self.tasks
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Store form text for `field`; returns the coerced value.
    pub fn set_field(&mut self, field: Field, raw: &str) -> f64 {
        self.set_value(field, coerce_input(raw))
    }

    pub fn set_value(&mut self, field: Field, value: f64) -> f64 {
        let value = coerce_value(value);
        self.input.set(field, value);
        debug!(
            category = field.category().key(),
            field = field.key(),
            value,
            "input updated"
        );
        value
    }

    pub fn replace_input(&mut self, input: ActivityInput) {
        self.input = ActivityInput::default();
        for (field, value) in input.entries() {
            self.input.set(field, coerce_value(value));
        }
    }

    pub fn toggle_task(&mut self, id: u32) -> Option<bool> {
        self.tasks.toggle(id)
    }

    pub fn complete_task(&mut self, id: u32) -> Option<bool> {
        self.tasks.set_completed(id, true)
    }

    pub fn next_step(&mut self) -> Step {
        self.step = self.step.next();
        self.step
    }

    /// Stays on the overview when there is nothing before it.
    pub fn previous_step(&mut self) -> Step {
        if let Some(prev) = self.step.previous() {
            self.step = prev;
        }
        self.step
    }

    pub fn evaluate(
        &self,
        engine: &EmissionsEngine,
    ) -> Result<EmissionsResult, ConfigurationError> {
        engine.evaluate(&self.input, self.tasks.tasks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tier;

    fn engine() -> EmissionsEngine {
        EmissionsEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn coercion_of_form_text() {
        assert_eq!(coerce_input(""), 0.0);
        assert_eq!(coerce_input("   "), 0.0);
        assert_eq!(coerce_input("abc"), 0.0);
        assert_eq!(coerce_input("-3"), 0.0);
        assert_eq!(coerce_input("NaN"), 0.0);
        assert_eq!(coerce_input("inf"), 0.0);
        assert_eq!(coerce_input(" 12.5 "), 12.5);
    }

    #[test]
    fn fresh_session_is_zero() {
        let config = EngineConfig::default();
        let session = CalculatorSession::new(&config);
        let result = session.evaluate(&engine()).unwrap();
        assert_eq!(result.total, 0.0);
        assert_eq!(result.tier, Tier::Low);
        assert_eq!(session.step(), Step::Overview);
    }

    #[test]
    fn edits_and_toggles_drive_recomputation() {
        let config = EngineConfig::default();
        let engine = engine();
        let mut session = CalculatorSession::new(&config);

        assert_eq!(session.set_field(Field::Voiture, "100"), 100.0);
        session.set_field(Field::Electricite, "1000");
        assert_eq!(session.evaluate(&engine).unwrap().total, 120.0);

        assert_eq!(session.toggle_task(2), Some(true));
        assert_eq!(session.evaluate(&engine).unwrap().total, -30.0);

        session.set_field(Field::Electricite, "");
        assert_eq!(session.evaluate(&engine).unwrap().total, -130.0);
    }

    #[test]
    fn replace_input_sanitizes_values() {
        let config = EngineConfig::default();
        let mut session = CalculatorSession::new(&config);
        let mut input = ActivityInput::default();
        input.alimentation.viande = -4.0;
        input.alimentation.legumes = 3.0;
        session.replace_input(input);
        assert_eq!(session.input().alimentation.viande, 0.0);
        assert_eq!(session.input().alimentation.legumes, 3.0);
    }

    #[test]
    fn steps_cycle_through_questionnaire() {
        let config = EngineConfig::default();
        let mut session = CalculatorSession::new(&config);
        assert_eq!(session.previous_step(), Step::Overview);
        assert_eq!(session.next_step(), Step::Transport);
        assert_eq!(session.next_step(), Step::Maison);
        assert_eq!(session.next_step(), Step::Alimentation);
        assert_eq!(session.previous_step(), Step::Maison);
        session.next_step();
        assert_eq!(session.next_step(), Step::Overview);
        assert_eq!(Step::Alimentation.title(), "Alimentation");
    }
}
