//! Application registration and teardown

use dsh_resources::OwnerToken;
use tracing::{debug, info, warn};
use crate::app::{AppId, Application, ApplicationConfig, ExitHook};
use crate::error::{DesktopError, DesktopResult};
use crate::window::Lifecycle;
use super::DesktopEngine;

impl DesktopEngine {
    /// Register an application.
    ///
    /// Resources fetched under the configured bootstrap token while the
    /// application was being constructed move to the application.
    pub fn register_application(&mut self, config: ApplicationConfig) -> DesktopResult<AppId> {
        let id = self.allocate_app_id();
        let bootstrap = config.bootstrap_token;
        let app = Application::new(id, config);

        if let Some(token) = bootstrap {
            let moved = self
                .resources
                .rebind(OwnerToken::Bootstrap(token), app.owner_token())?;
            debug!(app_id = id, token, moved, "bootstrap resources rebound");
        }

        info!(app_id = id, name = %app.name, "application registered");
        self.apps.insert(id, app);
        Ok(id)
    }

    /// Install the hook run when the application exits
    pub fn set_exit_hook(&mut self, app_id: AppId, hook: ExitHook) -> DesktopResult<()> {
        let app = self
            .apps
            .get_mut(&app_id)
            .ok_or(DesktopError::ApplicationNotFound(app_id))?;
        app.exit_hook = Some(hook);
        Ok(())
    }

    /// Get an application by ID
    pub fn application(&self, app_id: AppId) -> Option<&Application> {
        self.apps.get(&app_id)
    }

    /// Exit an application: run its exit hook, dispose its windows and
    /// release every resource it holds.
    ///
    /// A failing hook is logged and does not stop the teardown.
    pub fn exit_application(&mut self, app_id: AppId) -> DesktopResult<()> {
        let (hook, windows) = {
            let app = self
                .apps
                .get_mut(&app_id)
                .ok_or(DesktopError::ApplicationNotFound(app_id))?;
            (app.exit_hook.take(), app.windows.clone())
        };

        if let Some(mut hook) = hook {
            if let Err(reason) = hook() {
                warn!(app_id, %reason, "exit hook failed, continuing teardown");
            }
        }

        for id in windows {
            let stage = match self.windows.get(id) {
                Some(window) => window.stage(),
                None => continue,
            };
            match stage {
                Lifecycle::Ready => {
                    if let Err(err) = self.dispose_window(id) {
                        warn!(app_id, window_id = id, %err, "window disposal failed during exit");
                    }
                }
                Lifecycle::Uninitialized | Lifecycle::Initializing => self.forget_window(id),
                Lifecycle::Disposing | Lifecycle::Disposed => {}
            }
        }

        let released = self.resources.sever(OwnerToken::Application(app_id));
        self.apps.remove(&app_id);
        info!(app_id, released, "application exited");
        Ok(())
    }
}
