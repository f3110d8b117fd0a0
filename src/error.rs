use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeaheadError {
    #[error("network is offline")]
    Offline,

    #[error("fetch failed: {0}")]
    FetchFailed(String),

    #[error("retry attempts exhausted after {attempts} attempts")]
    RetryExhausted {
        attempts: u32,
        #[source]
        source: Box<TypeaheadError>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TypeaheadError {
    /// Whether a retry loop should keep going after this failure.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Offline | Self::FetchFailed(_))
    }

    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }
}

pub type Result<T> = std::result::Result<T, TypeaheadError>;
