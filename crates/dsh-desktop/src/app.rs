//! Applications as seen by the compositor

use dsh_resources::OwnerToken;
use crate::window::WindowId;

/// Unique application identifier
pub type AppId = u64;

/// Hook run when an application exits. A failure is logged and teardown
/// continues.
pub type ExitHook = Box<dyn FnMut() -> Result<(), String>>;

/// Configuration for registering an application
#[derive(Clone, Debug, Default)]
pub struct ApplicationConfig {
    /// Display name
    pub name: String,
    /// Stable identity used to key persisted window bounds
    /// (empty = bounds are not persisted)
    pub identity: String,
    /// Never group this application's windows in the taskbar
    pub no_window_grouping: bool,
    /// Token used for resources fetched while the application was being
    /// constructed; rebound to the application on registration
    pub bootstrap_token: Option<u64>,
}

/// A registered application
pub struct Application {
    pub id: AppId,
    pub name: String,
    pub identity: String,
    pub no_window_grouping: bool,
    /// First window initialized for this application
    pub main_window: Option<WindowId>,
    /// Every window the application created, in creation order
    pub windows: Vec<WindowId>,
    pub(crate) exit_hook: Option<ExitHook>,
}

impl Application {
    pub(crate) fn new(id: AppId, config: ApplicationConfig) -> Self {
        Self {
            id,
            name: config.name,
            identity: config.identity,
            no_window_grouping: config.no_window_grouping,
            main_window: None,
            windows: Vec::new(),
            exit_hook: None,
        }
    }

    /// Owner token under which this application holds resources
    #[inline]
    pub fn owner_token(&self) -> OwnerToken {
        OwnerToken::Application(self.id)
    }

    /// Key under which the main window's bounds are persisted
    pub fn bounds_key(&self) -> Option<String> {
        if self.identity.is_empty() {
            None
        } else {
            Some(format!("window-bounds:{}", self.identity))
        }
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("identity", &self.identity)
            .field("no_window_grouping", &self.no_window_grouping)
            .field("main_window", &self.main_window)
            .field("windows", &self.windows)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_key_requires_identity() {
        let anonymous = Application::new(1, ApplicationConfig::default());
        assert!(anonymous.bounds_key().is_none());

        let files = Application::new(
            2,
            ApplicationConfig {
                name: "Files".to_string(),
                identity: "files".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(files.bounds_key().as_deref(), Some("window-bounds:files"));
        assert_eq!(files.owner_token(), OwnerToken::Application(2));
    }
}
