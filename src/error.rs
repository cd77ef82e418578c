//! Error taxonomy for discovery operations

use async_graphql::ErrorExtensions;

/// Errors surfaced by the discovery engine
///
/// Repository failures pass through unchanged; nothing is retried here.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The requested corpus is empty (unknown city, no categories, ...)
    #[error("{0}")]
    NotFound(String),

    /// The caller supplied an argument the engine cannot serve
    #[error("{0}")]
    InvalidArgument(String),

    /// The entity store failed
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

impl DiscoveryError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Machine-readable code exposed to GraphQL clients
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Repository(_) => "INTERNAL",
        }
    }
}

impl ErrorExtensions for DiscoveryError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

pub type Result<T, E = DiscoveryError> = std::result::Result<T, E>;
