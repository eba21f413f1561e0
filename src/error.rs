use thiserror::Error;

/// Errors produced while loading signature corpora or resolving rules.
#[derive(Debug, Error)]
pub enum ProscribeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    Parse { message: String },

    #[error("Bundled signatures resource not found: {name}")]
    ResourceNotFound { name: String },
}

pub type Result<T> = std::result::Result<T, ProscribeError>;

impl ProscribeError {
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse { message: message.into() }
    }

    pub fn resource_not_found<S: Into<String>>(name: S) -> Self {
        Self::ResourceNotFound { name: name.into() }
    }

    /// Returns true if the error indicates a broken rule configuration that a
    /// build front end must surface as fatal (as opposed to plain I/O trouble).
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::ResourceNotFound { .. })
    }
}
