//! Error types for search operations

use crate::error::AppError;
use crate::models::ItemCategory;

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Unknown item category, malformed order-by or malformed filter value
    #[error("{0}")]
    Validation(String),

    /// Filter name or alias with no definition in the requested category
    #[error("filter '{name}' is not defined for item category {category}")]
    UnknownFilter { name: String, category: ItemCategory },

    /// Filter name with no definition in any category
    #[error("filter '{0}' is not defined in the catalog")]
    UnknownFilterName(String),

    /// Item store or identity directory failure
    #[error("{collaborator} failed: {message}")]
    Upstream {
        collaborator: &'static str,
        message: String,
    },
}

impl SearchError {
    pub fn validation(message: impl Into<String>) -> Self {
        SearchError::Validation(message.into())
    }

    /// Wrap a collaborator failure without retrying it
    pub fn upstream(collaborator: &'static str, err: AppError) -> Self {
        let message = match err {
            AppError::Upstream { message, .. } => message,
            other => other.to_string(),
        };
        SearchError::Upstream {
            collaborator,
            message,
        }
    }

    /// Whether the request was rejected before any collaborator call
    pub fn is_rejection(&self) -> bool {
        !matches!(self, SearchError::Upstream { .. })
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Validation(msg) => AppError::Validation(msg),
            SearchError::UnknownFilter { .. } | SearchError::UnknownFilterName(_) => {
                AppError::UnknownFilter(err.to_string())
            }
            SearchError::Upstream {
                collaborator,
                message,
            } => AppError::upstream(collaborator, message),
        }
    }
}
