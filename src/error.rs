use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to load model artifact {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn artifact(path: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::ArtifactLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind_failure() -> Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::AddrInUse, "port 8501 taken"))?;
        Ok(())
    }

    #[test]
    fn artifact_error_names_the_file() {
        let err = AppError::artifact("rf_pipeline.json", "not found");
        assert_eq!(err.to_string(), "Failed to load model artifact rf_pipeline.json: not found");
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        let err = bind_failure().unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().contains("port 8501 taken"), "{err}");
    }
}
