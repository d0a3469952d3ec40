use crate::config::PAGE_TITLE;
use crate::render::form::{render_form, FormInput};
use crate::render::result::{render_error, render_result};
use crate::types::PredictionResult;

/// What the output region shows. Editing any input clears it back to `Idle`
/// in the browser before the next submission.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Idle,
    ShowingResult(PredictionResult),
    ShowingError(String),
}

const STYLE: &str = r#"body { font-family: sans-serif; max-width: 42rem; margin: 2rem auto; padding: 0 1rem; }
form { display: grid; grid-template-columns: 1fr; gap: .35rem; }
label { margin-top: .4rem; font-weight: 600; }
button { margin-top: 1rem; padding: .6rem; font-size: 1rem; }
.occupancy { color: teal; text-align: center; }
.revenue { color: crimson; text-align: center; }
.error { background: #fde8e8; color: #9b1c1c; padding: .8rem; border-radius: .3rem; margin-top: 1rem; }"#;

/// Clears the output region as soon as the user edits the form.
const RESET_ON_INPUT: &str = r#"document.getElementById('prediction-form').addEventListener('input', function () {
  var out = document.getElementById('output');
  if (out) { out.innerHTML = ''; }
});"#;

pub fn render_page(input: &FormInput, concert_types: &[String], view: &View) -> String {
    let output = match view {
        View::Idle => String::new(),
        View::ShowingResult(result) => render_result(result),
        View::ShowingError(message) => render_error(message),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<style>
{STYLE}
</style>
</head>
<body>
<h1>🎟️ {PAGE_TITLE}</h1>
<p>Introduce los datos del concierto a predecir.<br>
Los datos de Entradas acumuladas en las diferentes semanas deben cumplir:
<code>4sem ≥ 8sem ≥ 12sem ≥ 16sem</code></p>
{form}<section id="output" aria-live="polite">
{output}</section>
<script>
{RESET_ON_INPUT}
</script>
</body>
</html>
"#,
        form = render_form(input, concert_types),
    )
}
