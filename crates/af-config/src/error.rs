use thiserror::Error;

/// Failures while loading or checking AcademyFlow settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not load academyflow settings: {0}")]
    Figment(#[from] figment::Error),

    /// A section the current command depends on is empty.
    #[error("[{section}] is not set: {hint}")]
    NotConfigured { section: String, hint: String },

    #[error("bad value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
