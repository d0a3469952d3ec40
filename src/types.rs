use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Calendar inputs
// ---------------------------------------------------------------------------

/// Event month, 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Default for Month {
    fn default() -> Self {
        Month(crate::config::defaults::MONTH)
    }
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month(1), Month(2), Month(3), Month(4), Month(5), Month(6),
        Month(7), Month(8), Month(9), Month(10), Month(11), Month(12),
    ];

    pub fn new(month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(Month(month))
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Month {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Month::new(value).ok_or_else(|| format!("month must be between 1 and 12, got {value}"))
    }
}

impl From<Month> for u8 {
    fn from(m: Month) -> u8 {
        m.0
    }
}

/// Always two digits, as shown in the month select.
impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Day of week, labelled the way the training data spells it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOfWeek {
    #[default]
    #[serde(rename = "Lunes")]
    Monday,
    #[serde(rename = "Martes")]
    Tuesday,
    #[serde(rename = "Miércoles")]
    Wednesday,
    #[serde(rename = "Jueves")]
    Thursday,
    #[serde(rename = "Viernes")]
    Friday,
    #[serde(rename = "Sábado")]
    Saturday,
    #[serde(rename = "Domingo")]
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Lunes",
            DayOfWeek::Tuesday => "Martes",
            DayOfWeek::Wednesday => "Miércoles",
            DayOfWeek::Thursday => "Jueves",
            DayOfWeek::Friday => "Viernes",
            DayOfWeek::Saturday => "Sábado",
            DayOfWeek::Sunday => "Domingo",
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// PredictionRequest
// ---------------------------------------------------------------------------

/// One submitted concert. Built fresh per submission, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub capacity: u32,
    /// Competitor concerts within ±3 days.
    pub competitor_concerts: u32,
    /// Own concerts within ±7 days.
    pub own_concerts: u32,
    pub participatory_events: u32,
    pub avg_lead_days: u32,
    /// Cumulative tickets sold N weeks before the event.
    pub sales_16w: u32,
    pub sales_12w: u32,
    pub sales_8w: u32,
    pub sales_4w: u32,
    pub month: Month,
    pub concert_type: String,
    pub day_of_week: DayOfWeek,
    /// `HH:MM:SS`; passed to the models as-is.
    pub time_of_day: String,
}

// ---------------------------------------------------------------------------
// Feature record: the row handed to the models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureValue::Number(n) => write!(f, "{n}"),
            FeatureValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Named columns in insertion order. Lookups are linear; rows have a dozen columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRecord {
    columns: Vec<(String, FeatureValue)>,
}

impl FeatureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number(mut self, name: &str, value: f64) -> Self {
        self.insert(name, FeatureValue::Number(value));
        self
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, FeatureValue::Text(value.into()));
        self
    }

    fn insert(&mut self, name: &str, value: FeatureValue) {
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.columns.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }
}

// ---------------------------------------------------------------------------
// PredictionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Predicted occupancy bucket.
    pub label: String,
    /// Every class of the classifier with its probability, in class order.
    pub probabilities: Vec<(String, f64)>,
    /// Predicted box-office revenue in euros. Finite and non-negative.
    pub revenue: f64,
}
