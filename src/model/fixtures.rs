//! Small trained-by-hand pipelines shared by tests.

use std::path::{Path, PathBuf};

use crate::model::artifact::Artifact;
use crate::model::store::{Classifier, ModelStore, Regressor};

pub const CLASSIFIER_JSON: &str = include_str!("../../fixtures/rf_pipeline.json");
pub const REGRESSOR_JSON: &str = include_str!("../../fixtures/best_model_reg.json");

pub fn classifier() -> Classifier {
    let artifact: Artifact = serde_json::from_str(CLASSIFIER_JSON).expect("classifier fixture parses");
    Classifier::from_artifact(artifact).expect("classifier fixture is valid")
}

pub fn regressor() -> Regressor {
    let artifact: Artifact = serde_json::from_str(REGRESSOR_JSON).expect("regressor fixture parses");
    Regressor::from_artifact(artifact).expect("regressor fixture is valid")
}

pub fn store() -> ModelStore {
    ModelStore {
        classifier: classifier(),
        regressor: regressor(),
    }
}

/// The fixture classifier retrained without Sunday concerts: its weekday block
/// has six categories and still rejects unknown values.
pub fn classifier_without_sundays() -> Classifier {
    let json = CLASSIFIER_JSON.replace(r#", "Domingo"]"#, "]");
    assert_ne!(json, CLASSIFIER_JSON, "fixture weekday list changed");
    let artifact: Artifact = serde_json::from_str(&json).expect("classifier fixture parses");
    Classifier::from_artifact(artifact).expect("classifier fixture is valid")
}

/// Both fixtures written under a per-test temp directory. The directory is
/// removed when the guard drops, pass or fail.
pub struct TempArtifacts {
    dir: PathBuf,
}

impl TempArtifacts {
    pub fn new(test_name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("concert-forecast-{}-{test_name}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        std::fs::write(dir.join("rf_pipeline.json"), CLASSIFIER_JSON).expect("write classifier");
        std::fs::write(dir.join("best_model_reg.json"), REGRESSOR_JSON).expect("write regressor");
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl Drop for TempArtifacts {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_artifacts_are_removed_on_drop() {
        let artifacts = TempArtifacts::new("temp_artifacts_are_removed_on_drop");
        let dir = artifacts.dir().to_path_buf();
        assert!(artifacts.join("rf_pipeline.json").is_file());
        assert!(artifacts.join("best_model_reg.json").is_file());
        drop(artifacts);
        assert!(!dir.exists());
    }

    #[test]
    fn sunday_free_classifier_rejects_sundays() {
        use crate::predictor::orchestrator::feature_record;
        use crate::types::{DayOfWeek, Month, PredictionRequest};

        let clf = classifier_without_sundays();
        let mut req = PredictionRequest {
            capacity: 1000,
            competitor_concerts: 0,
            own_concerts: 0,
            participatory_events: 0,
            avg_lead_days: 0,
            sales_16w: 0,
            sales_12w: 0,
            sales_8w: 0,
            sales_4w: 0,
            month: Month::default(),
            concert_type: "Jazz".to_string(),
            day_of_week: DayOfWeek::Saturday,
            time_of_day: "19:30:00".to_string(),
        };
        assert!(clf.predict(&feature_record(&req)).is_ok());
        req.day_of_week = DayOfWeek::Sunday;
        let err = clf.predict(&feature_record(&req)).unwrap_err();
        assert!(err.to_string().contains("Domingo"), "{err}");
    }
}
