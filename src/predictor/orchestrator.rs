use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::model::{OccupancyModel, RevenueModel};
use crate::types::{FeatureRecord, PredictionRequest, PredictionResult};

/// Column names exactly as the models were trained on them.
pub mod columns {
    pub const CAPACITY: &str = "Aforo";
    pub const COMPETITOR_CONCERTS: &str = "NConcCompProx";
    pub const OWN_CONCERTS: &str = "ConcProxFil";
    pub const PARTICIPATORY_EVENTS: &str = "Num.Participativos";
    pub const AVG_LEAD_DAYS: &str = "Antelacion_Media";
    pub const SALES_16W: &str = "EntradasAcum_16sem";
    pub const SALES_12W: &str = "EntradasAcum_12sem";
    pub const SALES_8W: &str = "EntradasAcum_8sem";
    pub const SALES_4W: &str = "EntradasAcum_4sem";
    pub const MONTH: &str = "Mes_evento";
    pub const CONCERT_TYPE: &str = "TipoConcierto";
    pub const DAY_OF_WEEK: &str = "DiaSemana";
    pub const TIME_OF_DAY: &str = "HoraConcierto";
}

/// Single-row feature record in training column order.
pub fn feature_record(req: &PredictionRequest) -> FeatureRecord {
    FeatureRecord::new()
        .number(columns::CAPACITY, f64::from(req.capacity))
        .number(columns::COMPETITOR_CONCERTS, f64::from(req.competitor_concerts))
        .number(columns::OWN_CONCERTS, f64::from(req.own_concerts))
        .number(columns::PARTICIPATORY_EVENTS, f64::from(req.participatory_events))
        .number(columns::AVG_LEAD_DAYS, f64::from(req.avg_lead_days))
        .number(columns::SALES_16W, f64::from(req.sales_16w))
        .number(columns::SALES_12W, f64::from(req.sales_12w))
        .number(columns::SALES_8W, f64::from(req.sales_8w))
        .number(columns::SALES_4W, f64::from(req.sales_4w))
        .number(columns::MONTH, f64::from(req.month.number()))
        .text(columns::CONCERT_TYPE, req.concert_type.as_str())
        .text(columns::DAY_OF_WEEK, req.day_of_week.label())
        .text(columns::TIME_OF_DAY, req.time_of_day.as_str())
}

/// Run both models on an already-validated request. Any model error aborts the
/// whole submission; there are no partial results.
pub fn run<C, R>(req: &PredictionRequest, classifier: &C, regressor: &R) -> Result<PredictionResult>
where
    C: OccupancyModel + ?Sized,
    R: RevenueModel + ?Sized,
{
    let record = feature_record(req);

    let label = classifier.predict(&record)?;
    let probabilities = classifier.predict_proba(&record)?;
    let revenue = regressor.predict(&record)?;

    if !revenue.is_finite() {
        return Err(AppError::Prediction(format!("regressor returned {revenue}")));
    }
    let revenue = if revenue < 0.0 {
        warn!(revenue, "Negative revenue estimate clamped to zero");
        0.0
    } else {
        revenue
    };

    debug!(
        label = %label,
        revenue,
        classes = probabilities.len(),
        columns = record.len(),
        "Prediction complete"
    );

    Ok(PredictionResult { label, probabilities, revenue })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use crate::types::{DayOfWeek, FeatureValue, Month};
    use std::cell::Cell;

    fn scenario_a(concert_type: &str) -> PredictionRequest {
        PredictionRequest {
            capacity: 1000,
            competitor_concerts: 0,
            own_concerts: 0,
            participatory_events: 0,
            avg_lead_days: 0,
            sales_16w: 0,
            sales_12w: 0,
            sales_8w: 0,
            sales_4w: 0,
            month: Month::ALL[0],
            concert_type: concert_type.to_string(),
            day_of_week: DayOfWeek::Monday,
            time_of_day: "19:30:00".to_string(),
        }
    }

    struct FixedClassifier;

    impl OccupancyModel for FixedClassifier {
        fn predict(&self, _: &FeatureRecord) -> Result<String> {
            Ok("50-80%".to_string())
        }
        fn predict_proba(&self, _: &FeatureRecord) -> Result<Vec<(String, f64)>> {
            Ok(vec![("0-50%".to_string(), 0.25), ("50-80%".to_string(), 0.75)])
        }
    }

    struct FixedRegressor(f64);

    impl RevenueModel for FixedRegressor {
        fn predict(&self, _: &FeatureRecord) -> Result<f64> {
            Ok(self.0)
        }
    }

    /// Fails and counts how often it was asked.
    struct FailingClassifier {
        calls: Cell<u32>,
    }

    impl OccupancyModel for FailingClassifier {
        fn predict(&self, _: &FeatureRecord) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Err(AppError::Prediction("unknown category".to_string()))
        }
        fn predict_proba(&self, _: &FeatureRecord) -> Result<Vec<(String, f64)>> {
            self.calls.set(self.calls.get() + 1);
            Err(AppError::Prediction("unknown category".to_string()))
        }
    }

    #[test]
    fn feature_record_uses_training_column_names() {
        let record = feature_record(&scenario_a("Pop"));
        let names: Vec<&str> = record.names().collect();
        assert_eq!(
            names,
            [
                "Aforo",
                "NConcCompProx",
                "ConcProxFil",
                "Num.Participativos",
                "Antelacion_Media",
                "EntradasAcum_16sem",
                "EntradasAcum_12sem",
                "EntradasAcum_8sem",
                "EntradasAcum_4sem",
                "Mes_evento",
                "TipoConcierto",
                "DiaSemana",
                "HoraConcierto",
            ]
        );
        assert_eq!(record.get("Aforo"), Some(&FeatureValue::Number(1000.0)));
        assert_eq!(record.get("DiaSemana"), Some(&FeatureValue::Text("Lunes".to_string())));
    }

    #[test]
    fn scenario_a_with_trained_models() {
        let store = fixtures::store();
        let first_type = store.classifier.valid_concert_types()[0].clone();
        let result = run(&scenario_a(&first_type), &store.classifier, &store.regressor).unwrap();

        assert!(store.classifier.classes().contains(&result.label));
        assert_eq!(result.probabilities.len(), store.classifier.classes().len());
        let total: f64 = result.probabilities.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(result.revenue.is_finite() && result.revenue >= 0.0);
    }

    #[test]
    fn identical_requests_give_identical_results() {
        let store = fixtures::store();
        let req = scenario_a("Rock");
        let a = run(&req, &store.classifier, &store.regressor).unwrap();
        let b = run(&req, &store.classifier, &store.regressor).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn combines_both_model_outputs() {
        let result = run(&scenario_a("Pop"), &FixedClassifier, &FixedRegressor(1234.5)).unwrap();
        assert_eq!(result.label, "50-80%");
        assert_eq!(result.probabilities[1], ("50-80%".to_string(), 0.75));
        assert_eq!(result.revenue, 1234.5);
    }

    #[test]
    fn negative_revenue_is_clamped() {
        let result = run(&scenario_a("Pop"), &FixedClassifier, &FixedRegressor(-5.0)).unwrap();
        assert_eq!(result.revenue, 0.0);
    }

    #[test]
    fn non_finite_revenue_is_a_failure() {
        let err = run(&scenario_a("Pop"), &FixedClassifier, &FixedRegressor(f64::NAN)).unwrap_err();
        assert!(matches!(err, AppError::Prediction(_)));
    }

    #[test]
    fn classifier_failure_propagates_without_retry() {
        let clf = FailingClassifier { calls: Cell::new(0) };
        let err = run(&scenario_a("Pop"), &clf, &FixedRegressor(1.0)).unwrap_err();
        assert!(matches!(err, AppError::Prediction(_)));
        assert_eq!(clf.calls.get(), 1);
    }

    #[test]
    fn unseen_concert_type_fails_with_trained_models() {
        let store = fixtures::store();
        let err = run(&scenario_a("Zarzuela"), &store.classifier, &store.regressor).unwrap_err();
        assert!(err.to_string().contains("Zarzuela"), "{err}");
    }
}
