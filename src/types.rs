use serde::{Deserialize, Serialize};

/// Grouping of related questionnaire fields.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Transport,
    Maison,
    Alimentation,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Transport, Category::Maison, Category::Alimentation];

    pub fn key(self) -> &'static str {
        match self {
            Category::Transport => "transport",
            Category::Maison => "maison",
            Category::Alimentation => "alimentation",
        }
    }

    pub fn fields(self) -> &'static [Field] {
        match self {
            Category::Transport => &[Field::Voiture, Field::Avion, Field::TransportsCommun],
            Category::Maison => &[Field::Electricite, Field::Chauffage],
            Category::Alimentation => &[Field::Viande, Field::Legumes],
        }
    }
}

/// One numeric questionnaire input. Units: km for transport, kWh for
/// housing, portions for food.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "voiture")]
    Voiture,
    #[serde(rename = "avion")]
    Avion,
    #[serde(rename = "transportsCommun")]
    TransportsCommun,
    #[serde(rename = "electricite")]
    Electricite,
    #[serde(rename = "chauffage")]
    Chauffage,
    #[serde(rename = "viande")]
    Viande,
    #[serde(rename = "legumes")]
    Legumes,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Voiture,
        Field::Avion,
        Field::TransportsCommun,
        Field::Electricite,
        Field::Chauffage,
        Field::Viande,
        Field::Legumes,
    ];

    /// Key used in snapshots and coefficient tables.
    pub fn key(self) -> &'static str {
        match self {
            Field::Voiture => "voiture",
            Field::Avion => "avion",
            Field::TransportsCommun => "transportsCommun",
            Field::Electricite => "electricite",
            Field::Chauffage => "chauffage",
            Field::Viande => "viande",
            Field::Legumes => "legumes",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Field::Voiture | Field::Avion | Field::TransportsCommun => Category::Transport,
            Field::Electricite | Field::Chauffage => Category::Maison,
            Field::Viande | Field::Legumes => Category::Alimentation,
        }
    }
}

/// Distances in km.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportInput {
    pub voiture: f64,
    pub avion: f64,
    pub transports_commun: f64,
}

/// Yearly energy use in kWh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HousingInput {
    pub electricite: f64,
    pub chauffage: f64,
}

/// Portions consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodInput {
    pub viande: f64,
    pub legumes: f64,
}

/// Full questionnaire snapshot. Zero-valued by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityInput {
    pub transport: TransportInput,
    pub maison: HousingInput,
    pub alimentation: FoodInput,
}

impl ActivityInput {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Voiture => self.transport.voiture,
            Field::Avion => self.transport.avion,
            Field::TransportsCommun => self.transport.transports_commun,
            Field::Electricite => self.maison.electricite,
            Field::Chauffage => self.maison.chauffage,
            Field::Viande => self.alimentation.viande,
            Field::Legumes => self.alimentation.legumes,
        }
    }

    pub fn set(&mut self, field: Field, value: f64) {
        let slot = match field {
            Field::Voiture => &mut self.transport.voiture,
            Field::Avion => &mut self.transport.avion,
            Field::TransportsCommun => &mut self.transport.transports_commun,
            Field::Electricite => &mut self.maison.electricite,
            Field::Chauffage => &mut self.maison.chauffage,
            Field::Viande => &mut self.alimentation.viande,
            Field::Legumes => &mut self.alimentation.legumes,
        };
        *slot = value;
    }

    /// Every (field, value) pair, grouped by category in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (Field, f64)> + '_ {
        Category::ALL
            .into_iter()
            .flat_map(|c| c.fields().iter().copied())
            .map(move |f| (f, self.get(f)))
    }
}

/// An optional action that credits a fixed CO2 reduction once completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoTask {
    pub id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact: String,
    /// kg CO2.
    pub co2_reduction: f64,
    #[serde(default)]
    pub completed: bool,
}

/// Severity tier of a net total.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn message(self) -> &'static str {
        match self {
            Tier::Low => "Excellent ! Continuez ainsi !",
            Tier::Medium => "Pas mal ! Quelques efforts à faire.",
            Tier::High => "Attention ! Votre empreinte est élevée.",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Tier::Low => "#4ADE80",
            Tier::Medium => "#FACC15",
            Tier::High => "#F87171",
        }
    }
}

/// Tier with the message shown next to the total.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct TierAssessment {
    pub tier: Tier,
    pub message: &'static str,
}

/// Transport modes charted in the breakdown, in chart order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum TransportMode {
    Car,
    Plane,
    PublicTransit,
    Bicycle,
}

impl TransportMode {
    pub const CHART_ORDER: [TransportMode; 4] = [
        TransportMode::Car,
        TransportMode::Plane,
        TransportMode::PublicTransit,
        TransportMode::Bicycle,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TransportMode::Car => "Voiture",
            TransportMode::Plane => "Avion",
            TransportMode::PublicTransit => "Transports en commun",
            TransportMode::Bicycle => "Vélo",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            TransportMode::Car => "#60A5FA",
            TransportMode::Plane => "#A78BFA",
            TransportMode::PublicTransit => "#4ADE80",
            TransportMode::Bicycle => "#FBBF24",
        }
    }

    /// Input field holding the distance. Bicycle has none: it is zero-emission.
    pub fn field(self) -> Option<Field> {
        match self {
            TransportMode::Car => Some(Field::Voiture),
            TransportMode::Plane => Some(Field::Avion),
            TransportMode::PublicTransit => Some(Field::TransportsCommun),
            TransportMode::Bicycle => None,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            TransportMode::Plane => "km/an",
            _ => "km/mois",
        }
    }

    pub fn period(self) -> &'static str {
        match self {
            TransportMode::Plane => "Cette année",
            _ => "Ce mois",
        }
    }
}

/// One chart slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub mode: TransportMode,
    pub category: &'static str,
    /// kg CO2.
    pub value: f64,
    pub color: &'static str,
}

/// Distance and emissions of one transport mode for the overview list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportOverviewRow {
    pub mode: TransportMode,
    pub name: &'static str,
    pub distance: f64,
    pub emissions: f64,
    pub unit: &'static str,
    pub period: &'static str,
}

/// Fill state of the progress indicator against a yearly target.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ProgressGauge {
    pub value: f64,
    pub target: f64,
    /// value / target clamped to [0, 1].
    pub fill_ratio: f64,
    pub exceeded: bool,
}

/// Everything derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionsResult {
    pub total: f64,
    pub tier: Tier,
    pub message: &'static str,
    pub breakdown: Vec<BreakdownEntry>,
    pub progress: ProgressGauge,
}
