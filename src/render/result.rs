use std::fmt::Write;

use crate::render::escape;
use crate::types::PredictionResult;

/// `0.125` → `12.50%`.
pub fn format_percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// `1234567.891` → `€1,234,567.89`.
pub fn format_currency(v: f64) -> String {
    let digits = format!("{:.2}", v.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let is_zero = digits.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if v < 0.0 && !is_zero { "-" } else { "" };
    format!("{sign}€{grouped}.{cents}")
}

/// Result block: the label, every class probability, then the revenue estimate.
pub fn render_result(result: &PredictionResult) -> String {
    let mut html = String::new();
    html.push_str("<h2>📊 Resultados</h2>\n");
    let _ = writeln!(
        html,
        r#"<h1 class="occupancy">% de Aforo: {}</h1>"#,
        escape(&result.label)
    );
    html.push_str("<h4>Probabilidades:</h4>\n<ul class=\"probabilities\">\n");
    for (class, p) in &result.probabilities {
        let _ = writeln!(html, "<li><strong>{}</strong>: {}</li>", escape(class), format_percent(*p));
    }
    html.push_str("</ul>\n");
    let _ = writeln!(
        html,
        r#"<h1 class="revenue">Taquilla estimada: {}</h1>"#,
        format_currency(result.revenue)
    );
    html
}

pub fn render_error(message: &str) -> String {
    format!("<div class=\"error\" role=\"alert\">{}</div>\n", escape(message))
}
