use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Router,
};
use tracing::{error, info, warn};

use crate::api::health::{get_health, Outcome, SubmissionStats};
use crate::api::latency::PredictionLatency;
use crate::model::ModelStore;
use crate::predictor::{self, validate};
use crate::render::{render_page, FormInput, View};

/// Shared, read-only after startup apart from the counters.
#[derive(Clone)]
pub struct ApiState {
    pub models: Arc<ModelStore>,
    pub stats: Arc<SubmissionStats>,
    pub latency: Arc<PredictionLatency>,
}

impl ApiState {
    pub fn new(models: Arc<ModelStore>) -> Self {
        Self {
            models,
            stats: Arc::new(SubmissionStats::new()),
            latency: Arc::new(PredictionLatency::new()),
        }
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(get_form))
        .route("/predict", post(post_predict))
        .route("/health", get(get_health))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_form(State(state): State<ApiState>) -> Html<String> {
    let concert_types = state.models.classifier.valid_concert_types();
    Html(render_page(&FormInput::default(), concert_types, &View::Idle))
}

/// One submission: decode, validate, predict, render. Exactly one of a result
/// or an error message is shown.
async fn post_predict(
    State(state): State<ApiState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let concert_types = state.models.classifier.valid_concert_types();

    let decoded = match form {
        Ok(Form(fields)) => FormInput::from_fields(&fields),
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "Form body rejected");
            state.stats.record(Outcome::RejectedInput);
            let view = View::ShowingError(format!("⚠️ Datos no válidos: {}", rejection.body_text()));
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render_page(&FormInput::default(), concert_types, &view)),
            );
        }
    };

    let input = match decoded {
        Ok(input) => input,
        Err(rejected) => {
            warn!(fields = ?rejected.fields, "Form input rejected");
            state.stats.record(Outcome::RejectedInput);
            let view = View::ShowingError(rejected.message());
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render_page(&rejected.input, concert_types, &view)),
            );
        }
    };

    let request = input.clone().into_request(concert_types);

    if let Err(violation) = validate(&request) {
        warn!(
            broken = violation.broken,
            nearer = violation.nearer,
            farther = violation.farther,
            "Cumulative sales constraint violated"
        );
        state.stats.record(Outcome::ConstraintViolation);
        let view = View::ShowingError(violation.to_string());
        return (StatusCode::OK, Html(render_page(&input, concert_types, &view)));
    }

    let started = Instant::now();
    let outcome = predictor::run(&request, &state.models.classifier, &state.models.regressor);
    state.latency.record(started.elapsed());

    match outcome {
        Ok(result) => {
            info!(
                label = %result.label,
                revenue = result.revenue,
                concert_type = %request.concert_type,
                "Prediction served"
            );
            state.stats.record(Outcome::Predicted);
            let view = View::ShowingResult(result);
            (StatusCode::OK, Html(render_page(&input, concert_types, &view)))
        }
        Err(e) => {
            error!("Prediction error: {e}");
            state.stats.record(Outcome::PredictionFailure);
            let view = View::ShowingError(format!("⚠️ No se pudo calcular la predicción: {e}"));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_page(&input, concert_types, &view)),
            )
        }
    }
}
