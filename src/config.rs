use std::{collections::BTreeMap, collections::HashSet, env, fs::read_to_string, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ConfigLoadError, ConfigurationError};
use crate::types::{EcoTask, Field};

/// Env var naming a JSON file that overrides the built-in configuration.
pub const CONFIG_ENV_VAR: &str = "CARBON_ENGINE_CONFIG";

/// Yearly footprint the progress indicator is drawn against, kg CO2.
pub const DEFAULT_TARGET_KG: f64 = 2000.0;

/// kg CO2 per input unit, keyed by field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoefficientTable(BTreeMap<String, f64>);

impl CoefficientTable {
    pub fn new(entries: impl IntoIterator<Item = (Field, f64)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(f, c)| (f.key().to_string(), c))
                .collect(),
        )
    }

    /// Coefficient for `field`, rejecting absent, negative or non-finite entries.
    pub fn get(&self, field: Field) -> Result<f64, ConfigurationError> {
        match self.0.get(field.key()) {
            None => Err(ConfigurationError::MissingCoefficient { field: field.key() }),
            Some(&value) if !value.is_finite() || value < 0.0 => {
                Err(ConfigurationError::InvalidCoefficient {
                    field: field.key(),
                    value,
                })
            }
            Some(&value) => Ok(value),
        }
    }

    pub fn without(mut self, field: Field) -> Self {
        self.0.remove(field.key());
        self
    }

    pub fn with(mut self, field: Field, value: f64) -> Self {
        self.0.insert(field.key().to_string(), value);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        Field::ALL.into_iter().try_for_each(|f| self.get(f).map(|_| ()))
    }
}

impl Default for CoefficientTable {
    fn default() -> Self {
        Self::new([
            (Field::Voiture, 0.2),
            (Field::Avion, 0.285),
            (Field::TransportsCommun, 0.05),
            (Field::Electricite, 0.1),
            (Field::Chauffage, 0.2),
            (Field::Viande, 7.0),
            (Field::Legumes, 2.0),
        ])
    }
}

/// Immutable inputs of the engine: coefficients, eco-task catalog and
/// progress target. Sections missing from a JSON file keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub coefficients: CoefficientTable,
    pub tasks: Vec<EcoTask>,
    pub target_kg: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            coefficients: CoefficientTable::default(),
            tasks: default_tasks(),
            target_kg: DEFAULT_TARGET_KG,
        }
    }
}

impl EngineConfig {
    /// Reads the file named by `CARBON_ENGINE_CONFIG`, or falls back to defaults.
    pub fn load() -> Result<Self, ConfigLoadError> {
        match env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_path(path),
            Err(_) => {
                info!("{CONFIG_ENV_VAR} not set, using built-in coefficients");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let raw = read_to_string(path).map_err(|e| {
            warn!("Failed to read config {}: {e}", path.display());
            e
        })?;
        let config = Self::from_json_str(&raw)?;
        info!(
            "Loaded engine config from {} ({} eco-tasks)",
            path.display(),
            config.tasks.len()
        );
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.coefficients.validate()?;

        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !task.co2_reduction.is_finite() || task.co2_reduction < 0.0 {
                return Err(ConfigurationError::InvalidTaskReduction {
                    id: task.id,
                    value: task.co2_reduction,
                });
            }
            if !seen.insert(task.id) {
                return Err(ConfigurationError::DuplicateTask { id: task.id });
            }
        }

        if !self.target_kg.is_finite() || self.target_kg <= 0.0 {
            return Err(ConfigurationError::InvalidTarget {
                value: self.target_kg,
            });
        }
        Ok(())
    }
}

fn task(id: u32, title: &str, description: &str, impact: &str, co2_reduction: f64) -> EcoTask {
    EcoTask {
        id,
        title: title.to_string(),
        description: description.to_string(),
        impact: impact.to_string(),
        co2_reduction,
        completed: false,
    }
}

/// Built-in eco-task catalog. Reductions in kg CO2.
pub fn default_tasks() -> Vec<EcoTask> {
    vec![
        task(
            1,
            "Éteindre les appareils en veille",
            "Débranchez vos appareils électroniques la nuit",
            "Économisez jusqu'à 10% sur votre facture d'électricité",
            50.0,
        ),
        task(
            2,
            "Utiliser les transports en commun",
            "Prenez le bus ou le train pour vos trajets quotidiens",
            "Réduisez vos émissions de CO2 de transport de 50%",
            150.0,
        ),
        task(
            3,
            "Réduire la consommation de viande",
            "Essayez un repas végétarien par semaine",
            "Diminuez votre empreinte alimentaire de 15%",
            100.0,
        ),
        task(
            4,
            "Installer des LED",
            "Remplacez vos ampoules classiques par des LED",
            "Réduisez votre consommation d'éclairage de 80%",
            30.0,
        ),
        task(
            5,
            "Baisser le chauffage de 1°C",
            "Réduisez la température de votre logement d'un degré",
            "7% d'économie sur votre facture de chauffage",
            120.0,
        ),
        task(
            6,
            "Privilégier les produits locaux",
            "Achetez des fruits et légumes de saison produits localement",
            "Réduisez l'impact du transport alimentaire",
            80.0,
        ),
        task(
            7,
            "Utiliser un vélo",
            "Remplacez la voiture par le vélo pour les courts trajets",
            "Zéro émission et meilleure santé",
            90.0,
        ),
        task(
            8,
            "Réduire le gaspillage alimentaire",
            "Planifiez vos repas et utilisez les restes",
            "Économisez 30% sur votre budget alimentaire",
            70.0,
        ),
        task(
            9,
            "Installer un mousseur d'eau",
            "Réduisez votre consommation d'eau chaude",
            "Jusqu'à 50% d'économie d'eau",
            40.0,
        ),
        task(
            10,
            "Composter ses déchets",
            "Créez votre propre compost pour les déchets organiques",
            "Réduisez vos déchets de 30%",
            60.0,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tasks.len(), 10);
        assert_eq!(config.coefficients.get(Field::Avion), Ok(0.285));
    }

    #[test]
    fn missing_coefficient_is_reported() {
        let table = CoefficientTable::default().without(Field::Chauffage);
        assert_eq!(
            table.validate(),
            Err(ConfigurationError::MissingCoefficient { field: "chauffage" })
        );
    }

    #[test]
    fn negative_coefficient_is_rejected() {
        let table = CoefficientTable::default().with(Field::Viande, -1.0);
        assert!(matches!(
            table.get(Field::Viande),
            Err(ConfigurationError::InvalidCoefficient { field: "viande", .. })
        ));
    }

    #[test]
    fn partial_json_keeps_default_sections() {
        let raw = r#"{ "targetKg": 1500 }"#;
        let config = EngineConfig::from_json_str(raw).unwrap();
        assert_eq!(config.target_kg, 1500.0);
        assert_eq!(config.coefficients, CoefficientTable::default());
        assert_eq!(config.tasks.len(), 10);
    }

    #[test]
    fn json_coefficients_are_loaded() {
        let raw = r#"{
            "coefficients": {
                "voiture": 0.19, "avion": 0.25, "transportsCommun": 0.04,
                "electricite": 0.06, "chauffage": 0.2, "viande": 6.5, "legumes": 1.5
            },
            "tasks": [ { "id": 1, "co2Reduction": 25 } ]
        }"#;
        let config = EngineConfig::from_json_str(raw).unwrap();
        assert_eq!(config.coefficients.get(Field::Voiture), Ok(0.19));
        assert_eq!(config.tasks.len(), 1);
        assert!(!config.tasks[0].completed);
    }

    #[test]
    fn json_with_missing_field_fails_validation() {
        let raw = r#"{ "coefficients": { "voiture": 0.2 } }"#;
        let err = EngineConfig::from_json_str(raw).unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::Invalid(ConfigurationError::MissingCoefficient { field: "avion" })
        ));
    }

    #[test]
    fn duplicate_task_ids_are_rejected() {
        let mut config = EngineConfig::default();
        config.tasks.push(task(3, "", "", "", 10.0));
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::DuplicateTask { id: 3 })
        );
    }

    fn scratch_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("carbon-engine-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn config_file_is_loaded_from_path() {
        let path = scratch_path("from-path");
        let raw = r#"{
            "coefficients": {
                "voiture": 0.18, "avion": 0.285, "transportsCommun": 0.05,
                "electricite": 0.1, "chauffage": 0.2, "viande": 7, "legumes": 2
            },
            "tasks": [
                { "id": 7, "title": "Utiliser un vélo", "co2Reduction": 90 },
                { "id": 9, "co2Reduction": 40 }
            ],
            "targetKg": 1800
        }"#;
        std::fs::write(&path, raw).unwrap();
        let loaded = EngineConfig::from_path(&path);
        std::fs::remove_file(&path).ok();

        let config = loaded.unwrap();
        assert_eq!(config.coefficients.get(Field::Voiture), Ok(0.18));
        assert_eq!(config.coefficients.get(Field::Viande), Ok(7.0));
        let ids: Vec<_> = config.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, [7, 9]);
        assert_eq!(config.tasks[0].title, "Utiliser un vélo");
        assert_eq!(config.target_kg, 1800.0);
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let path = scratch_path("does-not-exist");
        assert!(matches!(
            EngineConfig::from_path(&path),
            Err(ConfigLoadError::Io(_))
        ));
    }

    // Only test touching CONFIG_ENV_VAR; keep it that way to avoid races.
    #[test]
    fn load_follows_env_var_and_falls_back_to_defaults() {
        env::remove_var(CONFIG_ENV_VAR);
        assert_eq!(EngineConfig::load().unwrap(), EngineConfig::default());

        let path = scratch_path("env");
        std::fs::write(&path, r#"{ "targetKg": 1200 }"#).unwrap();
        env::set_var(CONFIG_ENV_VAR, &path);
        let loaded = EngineConfig::load();
        env::remove_var(CONFIG_ENV_VAR);
        std::fs::remove_file(&path).ok();

        let config = loaded.unwrap();
        assert_eq!(config.target_kg, 1200.0);
        assert_eq!(config.coefficients, CoefficientTable::default());
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        assert!(matches!(
            EngineConfig::from_json_str("{ not json"),
            Err(ConfigLoadError::Json(_))
        ));
    }
}
