//! Desktop engine coordinating all components
//!
//! This module is split into focused submodules:
//! - `apps`: Application registration and teardown
//! - `windows`: Window lifecycle, geometry and display state
//! - `placement`: First-show packing and cascade placement
//! - `input`: Pointer event handling and drag operations
//! - `presentation`: Projection onto the presenter and full-surface layers

mod apps;
mod windows;
mod placement;
mod input;
mod presentation;

use std::collections::HashMap;
use std::rc::Rc;
use dsh_resources::ResourceManager;
use crate::app::{AppId, Application};
use crate::config::DesktopConfig;
use crate::input::InputRouter;
use crate::math::Rect;
use crate::persistence::BoundsStore;
use crate::presentation::{FullSurfaceStack, Presenter};
use crate::taskbar::Taskbar;
use crate::window::{WindowEvents, WindowId, WindowManager};

pub use windows::CloseOutcome;

/// Collaborators the compositor talks to, passed in explicitly
pub struct ShellContext {
    pub presenter: Box<dyn Presenter>,
    pub store: Box<dyn BoundsStore>,
    pub resources: Rc<ResourceManager>,
    pub config: DesktopConfig,
}

impl ShellContext {
    /// Create a context with default preferences
    pub fn new(
        presenter: impl Presenter + 'static,
        store: impl BoundsStore + 'static,
        resources: Rc<ResourceManager>,
    ) -> Self {
        Self {
            presenter: Box::new(presenter),
            store: Box::new(store),
            resources,
            config: DesktopConfig::default(),
        }
    }

    /// Replace the preferences
    pub fn with_config(mut self, config: DesktopConfig) -> Self {
        self.config = config;
        self
    }
}

/// Desktop engine coordinating all desktop components
///
/// This is the main entry point for compositor operations, managing:
/// - Applications and the windows they own
/// - Window manager (window storage, z-order, hit testing)
/// - Input router (drag/resize state machine)
/// - Taskbar grouping
/// - Full-surface layers
pub struct DesktopEngine {
    /// Window manager
    pub windows: WindowManager,
    /// Input router
    pub input: InputRouter,
    /// Taskbar groups
    pub taskbar: Taskbar,
    pub(crate) apps: HashMap<AppId, Application>,
    pub(crate) events: HashMap<WindowId, WindowEvents>,
    pub(crate) full_surface: FullSurfaceStack,
    pub(crate) presenter: Box<dyn Presenter>,
    pub(crate) store: Box<dyn BoundsStore>,
    pub(crate) resources: Rc<ResourceManager>,
    pub(crate) config: DesktopConfig,
    /// Compositing area windows live in and maximize to
    pub(crate) area: Rect,
    next_app_id: AppId,
}

impl DesktopEngine {
    /// Create a new desktop engine over a compositing area
    pub fn new(context: ShellContext, area: Rect) -> Self {
        Self {
            windows: WindowManager::new(),
            input: InputRouter::new(),
            taskbar: Taskbar::new(),
            apps: HashMap::new(),
            events: HashMap::new(),
            full_surface: FullSurfaceStack::new(),
            presenter: context.presenter,
            store: context.store,
            resources: context.resources,
            config: context.config,
            area,
            next_app_id: 1,
        }
    }

    /// Current compositing area
    #[inline]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Active preferences
    #[inline]
    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    /// Shared resource manager
    #[inline]
    pub fn resources(&self) -> &Rc<ResourceManager> {
        &self.resources
    }

    /// Resize the compositing area. Maximized windows follow it, including
    /// those waiting under the minimized overlay.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        let maximized: Vec<WindowId> = self
            .windows
            .all_windows()
            .filter(|w| w.is_maximized_underneath())
            .map(|w| w.id)
            .collect();

        for id in maximized {
            let Some(window) = self.windows.get_mut(id) else {
                continue;
            };
            window.position = area.position();
            let resized = window.size != area.size();
            window.size = area.size();
            let shown = window.is_shown();

            if shown {
                self.project(id);
            }
            if resized {
                self.emit_resize(id);
            }
        }
    }

    /// Topmost window currently shown
    #[inline]
    pub fn focused(&self) -> Option<WindowId> {
        self.windows.focused()
    }

    fn allocate_app_id(&mut self) -> AppId {
        let id = self.next_app_id;
        self.next_app_id += 1;
        id
    }
}
