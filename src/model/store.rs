use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::CONCERT_TYPE_COLUMN;
use crate::error::{AppError, Result};
use crate::model::artifact::{Artifact, Estimator, Preprocessor};
use crate::model::tree::{Node, Tree};
use crate::model::{OccupancyModel, RevenueModel};
use crate::types::FeatureRecord;

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Random-forest occupancy classifier. Immutable after load.
#[derive(Debug)]
pub struct Classifier {
    preprocessor: Preprocessor,
    classes: Vec<String>,
    trees: Vec<Tree>,
    concert_types: Vec<String>,
}

impl Classifier {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let artifact = read_artifact(path)?;
        Self::from_artifact(artifact).map_err(|reason| AppError::artifact(path.display().to_string(), reason))
    }

    pub fn from_artifact(artifact: Artifact) -> std::result::Result<Self, String> {
        let Artifact { preprocessor, estimator } = artifact;
        let (classes, trees) = match estimator {
            Estimator::Classifier { classes, trees } => (classes, trees),
            other => return Err(format!("expected a classifier, found a {}", other.kind())),
        };

        preprocessor.check()?;
        if classes.is_empty() {
            return Err("classifier has no classes".to_string());
        }
        check_trees(&trees, preprocessor.width(), classes.len())?;
        for (t, tree) in trees.iter().enumerate() {
            for node in &tree.nodes {
                if let Node::Leaf { value } = node {
                    if value.iter().any(|v| *v < 0.0) || value.iter().sum::<f64>() <= 0.0 {
                        return Err(format!("tree {t} has a leaf with no class mass"));
                    }
                }
            }
        }

        let concert_types = preprocessor
            .categorical_column(CONCERT_TYPE_COLUMN)
            .map(|c| c.categories.clone())
            .ok_or_else(|| format!("classifier has no {CONCERT_TYPE_COLUMN} categorical column"))?;

        Ok(Self { preprocessor, classes, trees, concert_types })
    }

    /// Class labels in the order the forest reports them.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Concert types seen at training time, in trained order.
    pub fn valid_concert_types(&self) -> &[String] {
        &self.concert_types
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Mean of per-tree normalized leaf distributions.
    pub fn predict_proba(&self, record: &FeatureRecord) -> Result<Vec<(String, f64)>> {
        let x = self.preprocessor.encode(record).map_err(AppError::Prediction)?;
        let mut acc = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.leaf(&x);
            let total: f64 = leaf.iter().sum();
            for (a, v) in acc.iter_mut().zip(leaf) {
                *a += v / total;
            }
        }
        let n = self.trees.len() as f64;
        Ok(self
            .classes
            .iter()
            .cloned()
            .zip(acc.into_iter().map(|a| a / n))
            .collect())
    }

    /// Most probable class; the first class wins ties.
    pub fn predict(&self, record: &FeatureRecord) -> Result<String> {
        let proba = self.predict_proba(record)?;
        let mut best: Option<&(String, f64)> = None;
        for entry in &proba {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(label, _)| label.clone())
            .ok_or_else(|| AppError::Prediction("classifier produced no classes".to_string()))
    }
}

impl OccupancyModel for Classifier {
    fn predict(&self, record: &FeatureRecord) -> Result<String> {
        Classifier::predict(self, record)
    }

    fn predict_proba(&self, record: &FeatureRecord) -> Result<Vec<(String, f64)>> {
        Classifier::predict_proba(self, record)
    }
}

// ---------------------------------------------------------------------------
// Regressor
// ---------------------------------------------------------------------------

/// Random-forest box-office regressor. Immutable after load.
#[derive(Debug)]
pub struct Regressor {
    preprocessor: Preprocessor,
    trees: Vec<Tree>,
}

impl Regressor {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let artifact = read_artifact(path)?;
        Self::from_artifact(artifact).map_err(|reason| AppError::artifact(path.display().to_string(), reason))
    }

    pub fn from_artifact(artifact: Artifact) -> std::result::Result<Self, String> {
        let Artifact { preprocessor, estimator } = artifact;
        let trees = match estimator {
            Estimator::Regressor { trees } => trees,
            other => return Err(format!("expected a regressor, found a {}", other.kind())),
        };
        preprocessor.check()?;
        check_trees(&trees, preprocessor.width(), 1)?;
        Ok(Self { preprocessor, trees })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Mean of the tree leaf values.
    pub fn predict(&self, record: &FeatureRecord) -> Result<f64> {
        let x = self.preprocessor.encode(record).map_err(AppError::Prediction)?;
        let sum: f64 = self.trees.iter().map(|t| t.leaf(&x)[0]).sum();
        Ok(sum / self.trees.len() as f64)
    }
}

impl RevenueModel for Regressor {
    fn predict(&self, record: &FeatureRecord) -> Result<f64> {
        Regressor::predict(self, record)
    }
}

// ---------------------------------------------------------------------------
// ModelStore
// ---------------------------------------------------------------------------

/// Both models, loaded once at startup and shared read-only for the process lifetime.
#[derive(Debug)]
pub struct ModelStore {
    pub classifier: Classifier,
    pub regressor: Regressor,
}

impl ModelStore {
    /// Any failure here is a configuration error; callers abort startup.
    pub fn load(classifier_path: &str, regressor_path: &str) -> Result<Arc<Self>> {
        let classifier = Classifier::load(classifier_path)?;
        info!(
            path = %classifier_path,
            classes = ?classifier.classes(),
            concert_types = classifier.valid_concert_types().len(),
            trees = classifier.tree_count(),
            "Classifier loaded"
        );

        let regressor = Regressor::load(regressor_path)?;
        info!(
            path = %regressor_path,
            trees = regressor.tree_count(),
            "Regressor loaded"
        );

        Ok(Arc::new(Self { classifier, regressor }))
    }
}

fn read_artifact(path: &Path) -> Result<Artifact> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|e| AppError::artifact(&display, e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| AppError::artifact(&display, format!("unreadable format: {e}")))
}

fn check_trees(trees: &[Tree], width: usize, leaf_width: usize) -> std::result::Result<(), String> {
    if trees.is_empty() {
        return Err("estimator has no trees".to_string());
    }
    for (t, tree) in trees.iter().enumerate() {
        tree.check(width, leaf_width).map_err(|e| format!("tree {t}: {e}"))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
