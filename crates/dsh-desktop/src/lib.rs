//! Window compositor for the dsh desktop shell
//!
//! This crate provides the core of the shell's windowing:
//! - Window lifecycle (create, init, show, close, dispose)
//! - Z-ordering, focus and hit testing
//! - Pointer-driven move and resize, with maximize/minimize/restore
//! - Taskbar grouping of an application's windows
//! - Layered full-surface presentation
//! - Last-bounds persistence for main windows
//!
//! ## Architecture
//!
//! - [`math`]: Geometry types (`Vec2`, `Rect`, `Size`)
//! - [`window`]: Window state and the z-ordered window manager
//! - [`input`]: Drag state machine and resize arithmetic
//! - [`taskbar`]: Taskbar grouping
//! - [`presentation`]: The `Presenter` seam and a headless implementation
//! - [`persistence`]: Saved bounds and their key/value store
//!
//! Shared assets are loaded through [`dsh_resources`]; disposing a window
//! or exiting an application releases what it held.
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use dsh_desktop::{
//!     ApplicationConfig, DesktopEngine, DisplayState, HeadlessPresenter, MemoryStore, Rect,
//!     ShellContext, WindowConfig,
//! };
//! use dsh_resources::{AssetLoader, LoadFuture, ResourceKind, ResourceManager};
//!
//! struct NoAssets;
//!
//! impl AssetLoader for NoAssets {
//!     fn load(&self, _kind: ResourceKind, _url: &str) -> LoadFuture {
//!         Box::pin(async { Err::<(), String>("offline".to_string()) })
//!     }
//!     fn unload(&self, _kind: ResourceKind, _url: &str) {}
//! }
//!
//! let resources = Rc::new(ResourceManager::new(Rc::new(NoAssets)));
//! let context = ShellContext::new(HeadlessPresenter::default(), MemoryStore::new(), resources);
//! let mut engine = DesktopEngine::new(context, Rect::new(0.0, 0.0, 1920.0, 1040.0));
//!
//! let app = engine.register_application(ApplicationConfig {
//!     name: "Notes".to_string(),
//!     ..Default::default()
//! })?;
//! let window = engine.create_window(app, WindowConfig {
//!     title: "Untitled".to_string(),
//!     ..Default::default()
//! })?;
//! engine.init_window(window)?;
//! engine.set_visible(window, true)?;
//!
//! assert_eq!(engine.display_state(window)?, DisplayState::Normal);
//! # Ok::<(), dsh_desktop::DesktopError>(())
//! ```

pub mod app;
pub mod config;
pub mod input;
pub mod math;
pub mod persistence;
pub mod presentation;
pub mod taskbar;
pub mod window;

mod engine;
mod error;

// Re-export core types for convenience
pub use app::{AppId, Application, ApplicationConfig, ExitHook};
pub use config::DesktopConfig;
pub use engine::{CloseOutcome, DesktopEngine, ShellContext};
pub use error::{DesktopError, DesktopResult};
pub use input::{calculate_resize, DragState, InputResult, InputRouter};
pub use math::{Rect, Size, Vec2};
pub use persistence::{BoundsStore, MemoryStore, SavedBounds};
pub use presentation::{FullSurfaceStack, HeadlessPresenter, Presenter};
pub use taskbar::{GroupId, GroupMode, Taskbar, TaskbarAction, TaskbarGroup};
pub use window::{
    ClosePolicy, DisplayState, Lifecycle, ResizeDirection, Restored, Window, WindowConfig,
    WindowEvent, WindowEventKind, WindowId, WindowManager,
};
