use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("triage record not found: {0}")]
    NotFound(String),
    #[error("triage storage unavailable: {} does not exist", .0.display())]
    StorageUnavailable(PathBuf),
    #[error("failed to create triage directory: {0}")]
    RecordDirCreation(std::io::Error),
    #[error("failed to write triage file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read triage file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to delete triage file: {0}")]
    FileDelete(std::io::Error),
    #[error("failed to serialize YAML: {0}")]
    YamlSerialization(serde_yaml::Error),
    #[error("failed to deserialize YAML: {0}")]
    YamlDeserialization(serde_yaml::Error),

    #[error(transparent)]
    Uuid(#[from] triage_uuid::UuidError),
    #[error(transparent)]
    Text(#[from] triage_types::TextError),
    #[error(transparent)]
    Rules(#[from] triage_classifier::RulesError),
}

impl TriageError {
    /// True for errors caused by the caller's input rather than by storage.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TriageError::InvalidInput(_)
                | TriageError::MissingField(_)
                | TriageError::OutOfRange { .. }
                | TriageError::Uuid(_)
                | TriageError::Text(_)
        )
    }
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
