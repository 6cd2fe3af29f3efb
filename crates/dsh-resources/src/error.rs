//! Error types for the resource loader

use crate::owner::OwnerToken;
use crate::resource::ResourceKey;

/// Errors that can occur while fetching or releasing shared resources.
///
/// Ownership violations are programming errors and are never retried.
/// Fetch failures are handed back to the caller, who decides whether the
/// requesting feature can live without the asset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    /// The owner already holds this resource.
    #[error("{owner} already owns resource {key}")]
    DuplicateOwner { key: ResourceKey, owner: OwnerToken },

    /// A unique resource was requested by a second owner.
    #[error("resource {key} is unique and already owned by {holder}")]
    UniqueViolation { key: ResourceKey, holder: OwnerToken },

    /// The owner does not hold this resource.
    #[error("{owner} does not own resource {key}")]
    NotOwned { key: ResourceKey, owner: OwnerToken },

    /// No entry is registered under the key.
    #[error("resource not found: {0}")]
    NotFound(ResourceKey),

    /// The asset loader rejected the load.
    #[error("failed to fetch {key}: {reason}")]
    Fetch { key: ResourceKey, reason: String },

    /// The owner was released while its fetch was still in flight.
    #[error("fetch of {key} abandoned: {owner} was released")]
    Abandoned { key: ResourceKey, owner: OwnerToken },

    /// The entry kept being torn down underneath the fetch.
    #[error("resource {0} was unloaded while being fetched")]
    Unloaded(ResourceKey),
}

impl ResourceError {
    /// Whether this error describes a misuse of the ownership protocol
    /// rather than an environmental failure.
    pub fn is_illegal_state(&self) -> bool {
        matches!(
            self,
            Self::DuplicateOwner { .. } | Self::UniqueViolation { .. } | Self::NotOwned { .. }
        )
    }
}

/// Result type alias for resource operations
pub type ResourceResult<T> = Result<T, ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceKind;

    #[test]
    fn test_error_display() {
        let key = ResourceKey::new(ResourceKind::Script, "/lib/a.js");

        let err = ResourceError::DuplicateOwner {
            key: key.clone(),
            owner: OwnerToken::Application(3),
        };
        assert_eq!(err.to_string(), "app#3 already owns resource script:/lib/a.js");

        let err = ResourceError::Fetch {
            key,
            reason: "404".to_string(),
        };
        assert_eq!(err.to_string(), "failed to fetch script:/lib/a.js: 404");
    }

    #[test]
    fn test_illegal_state_classification() {
        let key = ResourceKey::new(ResourceKind::Style, "/a.css");
        assert!(ResourceError::UniqueViolation {
            key: key.clone(),
            holder: OwnerToken::Window(1),
        }
        .is_illegal_state());
        assert!(!ResourceError::NotFound(key).is_illegal_state());
    }
}
