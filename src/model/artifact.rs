//! On-disk shape of a trained pipeline: a column preprocessor followed by a
//! tree ensemble. Files are produced by the offline training job and only read
//! here.

use serde::Deserialize;

use crate::model::tree::Tree;

#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
    pub preprocessor: Preprocessor,
    pub estimator: Estimator,
}

/// Numeric columns pass through in order, then each categorical column is
/// expanded into a one-hot block.
#[derive(Debug, Clone, Deserialize)]
pub struct Preprocessor {
    #[serde(default)]
    pub numeric: Vec<String>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoricalColumn {
    pub name: String,
    pub categories: Vec<String>,
}

/// What the one-hot encoder does with a value outside the trained vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    #[default]
    Error,
    /// Encode as an all-zero block.
    Ignore,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Estimator {
    Classifier { classes: Vec<String>, trees: Vec<Tree> },
    Regressor { trees: Vec<Tree> },
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::Classifier { .. } => "classifier",
            Estimator::Regressor { .. } => "regressor",
        }
    }
}

impl Preprocessor {
    /// Width of the encoded feature vector.
    pub fn width(&self) -> usize {
        self.numeric.len() + self.categorical.iter().map(|c| c.categories.len()).sum::<usize>()
    }

    pub fn categorical_column(&self, name: &str) -> Option<&CategoricalColumn> {
        self.categorical.iter().find(|c| c.name == name)
    }

    /// Structural checks run once at load time.
    pub fn check(&self) -> Result<(), String> {
        if self.width() == 0 {
            return Err("preprocessor declares no columns".to_string());
        }
        let mut seen: Vec<&str> = Vec::new();
        let names = self
            .numeric
            .iter()
            .map(String::as_str)
            .chain(self.categorical.iter().map(|c| c.name.as_str()));
        for name in names {
            if seen.contains(&name) {
                return Err(format!("column {name} declared twice"));
            }
            seen.push(name);
        }
        if let Some(col) = self.categorical.iter().find(|c| c.categories.is_empty()) {
            return Err(format!("categorical column {} has no categories", col.name));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_one_hot_blocks() {
        let pre: Preprocessor = serde_json::from_str(
            r#"{
                "numeric": ["Aforo", "Mes_evento"],
                "categorical": [
                    {"name": "TipoConcierto", "categories": ["Jazz", "Pop", "Rock"]},
                    {"name": "DiaSemana", "categories": ["Lunes", "Martes"]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(pre.width(), 7);
        assert_eq!(pre.handle_unknown, HandleUnknown::Error);
        assert!(pre.check().is_ok());
        assert_eq!(pre.categorical_column("DiaSemana").map(|c| c.categories.len()), Some(2));
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let pre: Preprocessor = serde_json::from_str(
            r#"{
                "numeric": ["Aforo"],
                "categorical": [{"name": "Aforo", "categories": ["x"]}]
            }"#,
        )
        .unwrap();
        assert!(pre.check().unwrap_err().contains("declared twice"));
    }

    #[test]
    fn estimator_kind_is_tagged() {
        let est: Estimator =
            serde_json::from_str(r#"{"kind": "regressor", "trees": []}"#).unwrap();
        assert_eq!(est.kind(), "regressor");
    }
}
