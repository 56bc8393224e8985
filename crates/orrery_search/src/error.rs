//! Error type shared by all searches.

use std::error::Error;
use std::fmt;

use orrery_core::ProviderError;

/// Error type for search operations.
///
/// "No event in the searched span" is not an error; single-event searches
/// return `Ok(None)` and windowed searches return an empty list.
#[derive(Debug)]
#[non_exhaustive]
pub enum SearchError {
    /// Invalid search configuration, rejected before any position is computed.
    InvalidConfig(&'static str),
    /// The position provider failed.
    Provider(ProviderError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            SearchError::Provider(e) => write!(f, "provider error: {e}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SearchError::Provider(e) => Some(e),
            SearchError::InvalidConfig(_) => None,
        }
    }
}

impl From<ProviderError> for SearchError {
    fn from(e: ProviderError) -> Self {
        SearchError::Provider(e)
    }
}
