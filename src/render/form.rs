//! Form collector: input controls, their defaults, and the submitted payload.

use std::collections::HashMap;
use std::fmt::Write;

use crate::config::defaults;
use crate::render::escape;
use crate::types::{DayOfWeek, Month, PredictionRequest};

/// `(control name, label)` for every control, in page order.
const LABELS: [(&str, &str); 13] = [
    ("capacity", "Aforo total"),
    ("competitor_concerts", "N° conciertos competencia ±3d"),
    ("own_concerts", "N° conciertos propios ±7d"),
    ("participatory_events", "Num.Participativos"),
    ("avg_lead_days", "Antelación media (días)"),
    ("sales_16w", "EntradasAcum_16sem"),
    ("sales_12w", "EntradasAcum_12sem"),
    ("sales_8w", "EntradasAcum_8sem"),
    ("sales_4w", "EntradasAcum_4sem"),
    ("month", "Mes del evento"),
    ("concert_type", "TipoConcierto"),
    ("day_of_week", "DiaSemana"),
    ("time_of_day", "HoraConcierto (HH:MM:SS)"),
];

fn label(name: &str) -> &str {
    LABELS
        .iter()
        .find(|(n, _)| *n == name)
        .map_or(name, |&(_, label)| label)
}

/// Decoded form payload. Absent fields take their page default.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInput {
    pub capacity: u32,
    pub competitor_concerts: u32,
    pub own_concerts: u32,
    pub participatory_events: u32,
    pub avg_lead_days: u32,
    pub sales_16w: u32,
    pub sales_12w: u32,
    pub sales_8w: u32,
    pub sales_4w: u32,
    pub month: Month,
    /// Empty means "first trained concert type".
    pub concert_type: String,
    pub day_of_week: DayOfWeek,
    pub time_of_day: String,
}

/// Controls that failed to decode, plus everything that did.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedFields {
    /// Decoded fields keep their submitted value; rejected ones their default.
    pub input: FormInput,
    /// Control names, in page order.
    pub fields: Vec<&'static str>,
}

impl RejectedFields {
    pub fn message(&self) -> String {
        let labels: Vec<&str> = self.fields.iter().map(|f| label(f)).collect();
        format!("⚠️ Datos no válidos: {}", labels.join(", "))
    }
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            capacity: defaults::CAPACITY,
            competitor_concerts: 0,
            own_concerts: 0,
            participatory_events: 0,
            avg_lead_days: 0,
            sales_16w: 0,
            sales_12w: 0,
            sales_8w: 0,
            sales_4w: 0,
            month: Month::default(),
            concert_type: String::new(),
            day_of_week: DayOfWeek::default(),
            time_of_day: defaults::TIME_OF_DAY.to_string(),
        }
    }
}

impl FormInput {
    /// Decode each control on its own. Negative or non-integer numbers, a
    /// month outside 1..=12 and an unknown weekday are rejected; unknown keys
    /// are ignored.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, RejectedFields> {
        let mut input = FormInput::default();
        let mut rejected = Vec::new();

        let mut count = |name: &'static str, slot: &mut u32| {
            if let Some(v) = decode(fields, name, &mut rejected, |raw| raw.trim().parse::<u32>().ok()) {
                *slot = v;
            }
        };
        count("capacity", &mut input.capacity);
        count("competitor_concerts", &mut input.competitor_concerts);
        count("own_concerts", &mut input.own_concerts);
        count("participatory_events", &mut input.participatory_events);
        count("avg_lead_days", &mut input.avg_lead_days);
        count("sales_16w", &mut input.sales_16w);
        count("sales_12w", &mut input.sales_12w);
        count("sales_8w", &mut input.sales_8w);
        count("sales_4w", &mut input.sales_4w);

        if let Some(m) = decode(fields, "month", &mut rejected, |raw| {
            raw.trim().parse::<u8>().ok().and_then(Month::new)
        }) {
            input.month = m;
        }
        if let Some(t) = decode(fields, "concert_type", &mut rejected, |raw| Some(raw.to_string())) {
            input.concert_type = t;
        }
        if let Some(d) = decode(fields, "day_of_week", &mut rejected, |raw| {
            DayOfWeek::ALL.into_iter().find(|d| d.label() == raw)
        }) {
            input.day_of_week = d;
        }
        if let Some(t) = decode(fields, "time_of_day", &mut rejected, |raw| Some(raw.to_string())) {
            input.time_of_day = t;
        }

        if rejected.is_empty() {
            Ok(input)
        } else {
            Err(RejectedFields { input, fields: rejected })
        }
    }

    /// Consolidate the payload into a request. The concert type is taken as
    /// submitted; only an empty value is replaced by the first trained type.
    pub fn into_request(self, concert_types: &[String]) -> PredictionRequest {
        let concert_type = if self.concert_type.is_empty() {
            concert_types.first().cloned().unwrap_or_default()
        } else {
            self.concert_type
        };
        PredictionRequest {
            capacity: self.capacity,
            competitor_concerts: self.competitor_concerts,
            own_concerts: self.own_concerts,
            participatory_events: self.participatory_events,
            avg_lead_days: self.avg_lead_days,
            sales_16w: self.sales_16w,
            sales_12w: self.sales_12w,
            sales_8w: self.sales_8w,
            sales_4w: self.sales_4w,
            month: self.month,
            concert_type,
            day_of_week: self.day_of_week,
            time_of_day: self.time_of_day,
        }
    }
}

/// `None` when the field is absent. A present field that fails `parse` is
/// recorded in `rejected`.
fn decode<T>(
    fields: &HashMap<String, String>,
    name: &'static str,
    rejected: &mut Vec<&'static str>,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let value = parse(fields.get(name)?);
    if value.is_none() {
        rejected.push(name);
    }
    value
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// Render every control in page order, pre-filled from `input`.
pub fn render_form(input: &FormInput, concert_types: &[String]) -> String {
    let mut html = String::new();
    html.push_str(r#"<form id="prediction-form" method="post" action="/predict">"#);
    html.push('\n');

    let numeric = [
        ("capacity", input.capacity),
        ("competitor_concerts", input.competitor_concerts),
        ("own_concerts", input.own_concerts),
        ("participatory_events", input.participatory_events),
        ("avg_lead_days", input.avg_lead_days),
        ("sales_16w", input.sales_16w),
        ("sales_12w", input.sales_12w),
        ("sales_8w", input.sales_8w),
        ("sales_4w", input.sales_4w),
    ];
    for (name, value) in numeric {
        let _ = writeln!(
            html,
            r#"<label for="{name}">{}</label><input id="{name}" name="{name}" type="number" min="0" step="1" value="{value}" required>"#,
            label(name),
        );
    }

    let months: Vec<(String, String)> = Month::ALL
        .iter()
        .map(|m| (m.number().to_string(), m.to_string()))
        .collect();
    let selected_month = input.month.number().to_string();
    select(&mut html, "month", &months, &selected_month);

    let types: Vec<(String, String)> = concert_types.iter().map(|t| (t.clone(), t.clone())).collect();
    let selected_type = if input.concert_type.is_empty() {
        concert_types.first().map(String::as_str).unwrap_or_default()
    } else {
        input.concert_type.as_str()
    };
    select(&mut html, "concert_type", &types, selected_type);

    let days: Vec<(String, String)> = DayOfWeek::ALL
        .iter()
        .map(|d| (d.label().to_string(), d.label().to_string()))
        .collect();
    select(&mut html, "day_of_week", &days, input.day_of_week.label());

    let _ = writeln!(
        html,
        r#"<label for="time_of_day">{}</label><input id="time_of_day" name="time_of_day" type="text" pattern="[0-9]{{2}}:[0-9]{{2}}:[0-9]{{2}}" placeholder="HH:MM:SS" value="{}">"#,
        label("time_of_day"),
        escape(&input.time_of_day),
    );

    html.push_str(r#"<button type="submit">Calcular predicciones</button>"#);
    html.push_str("\n</form>\n");
    html
}

/// `options` are `(value, shown label)` pairs.
fn select(html: &mut String, name: &str, options: &[(String, String)], selected: &str) {
    let _ = write!(html, r#"<label for="{name}">{}</label><select id="{name}" name="{name}">"#, label(name));
    for (value, shown) in options {
        let mark = if value == selected { " selected" } else { "" };
        let _ = write!(html, r#"<option value="{}"{mark}>{}</option>"#, escape(value), escape(shown));
    }
    html.push_str("</select>\n");
}
