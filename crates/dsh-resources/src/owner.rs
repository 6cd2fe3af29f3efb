//! Owner tokens

use serde::{Deserialize, Serialize};

/// Anything that can hold a reference to a shared resource.
///
/// Applications request assets while they are still being constructed, before
/// they have an id. Those requests use a [`OwnerToken::Bootstrap`] token which
/// is rebound to the real application once construction finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum OwnerToken {
    /// A running application
    Application(u64),
    /// A single window
    Window(u64),
    /// Temporary token used during application construction
    Bootstrap(u64),
}

impl OwnerToken {
    /// Check if this is a temporary bootstrap token
    #[inline]
    pub fn is_bootstrap(&self) -> bool {
        matches!(self, OwnerToken::Bootstrap(_))
    }
}

impl std::fmt::Display for OwnerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnerToken::Application(id) => write!(f, "app#{}", id),
            OwnerToken::Window(id) => write!(f, "window#{}", id),
            OwnerToken::Bootstrap(id) => write!(f, "bootstrap#{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_display() {
        assert_eq!(OwnerToken::Application(7).to_string(), "app#7");
        assert_eq!(OwnerToken::Window(2).to_string(), "window#2");
        assert_eq!(OwnerToken::Bootstrap(9).to_string(), "bootstrap#9");
    }

    #[test]
    fn test_bootstrap_tokens_are_distinct_from_apps() {
        assert_ne!(OwnerToken::Bootstrap(1), OwnerToken::Application(1));
        assert!(OwnerToken::Bootstrap(1).is_bootstrap());
        assert!(!OwnerToken::Window(1).is_bootstrap());
    }
}
