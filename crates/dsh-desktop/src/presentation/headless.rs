//! Presenter that records state instead of drawing

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use crate::math::{Rect, Size};
use crate::window::WindowId;
use super::Presenter;

/// Recorded state of one surface
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceState {
    pub rect: Rect,
    pub z: usize,
    pub visible: bool,
    pub title: String,
}

/// Everything a [`HeadlessPresenter`] has been told
#[derive(Clone, Debug, Default)]
pub struct HeadlessState {
    pub surfaces: HashMap<WindowId, SurfaceState>,
    pub placeholder: Option<Rect>,
    pub cursor: Option<&'static str>,
    pub full_surface: Option<WindowId>,
    pub notices: Vec<String>,
    /// Windows measured while their surface was hidden
    pub hidden_measures: Vec<WindowId>,
    natural_sizes: HashMap<WindowId, Size>,
    default_natural: Size,
}

/// Presenter for headless runs and tests.
///
/// Clones share state, so a test can keep one handle and give another to
/// the compositor.
#[derive(Clone, Debug)]
pub struct HeadlessPresenter {
    state: Rc<RefCell<HeadlessState>>,
}

impl Default for HeadlessPresenter {
    fn default() -> Self {
        Self::new(Size::new(640.0, 480.0))
    }
}

impl HeadlessPresenter {
    /// Create a presenter whose content measures `default_natural`
    pub fn new(default_natural: Size) -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState {
                default_natural,
                ..Default::default()
            })),
        }
    }

    /// Override the natural content size of one window
    pub fn set_natural_size(&self, id: WindowId, size: Size) {
        self.state.borrow_mut().natural_sizes.insert(id, size);
    }

    /// Snapshot of the recorded state
    pub fn state(&self) -> HeadlessState {
        self.state.borrow().clone()
    }

    pub fn surface(&self, id: WindowId) -> Option<SurfaceState> {
        self.state.borrow().surfaces.get(&id).cloned()
    }

    pub fn has_surface(&self, id: WindowId) -> bool {
        self.state.borrow().surfaces.contains_key(&id)
    }

    fn with_surface(&self, id: WindowId, f: impl FnOnce(&mut SurfaceState)) {
        if let Some(surface) = self.state.borrow_mut().surfaces.get_mut(&id) {
            f(surface);
        }
    }
}

impl Presenter for HeadlessPresenter {
    fn attach_surface(&mut self, id: WindowId) {
        self.state.borrow_mut().surfaces.entry(id).or_default();
    }

    fn detach_surface(&mut self, id: WindowId) {
        self.state.borrow_mut().surfaces.remove(&id);
    }

    fn place(&mut self, id: WindowId, rect: Rect) {
        self.with_surface(id, |s| s.rect = rect);
    }

    fn set_z(&mut self, id: WindowId, z: usize) {
        self.with_surface(id, |s| s.z = z);
    }

    fn set_visible(&mut self, id: WindowId, visible: bool) {
        self.with_surface(id, |s| s.visible = visible);
    }

    fn set_title(&mut self, id: WindowId, title: &str) {
        self.with_surface(id, |s| s.title = title.to_string());
    }

    fn measure_content(&mut self, id: WindowId) -> Size {
        let mut state = self.state.borrow_mut();
        let hidden = state.surfaces.get(&id).map_or(true, |s| !s.visible);
        if hidden {
            state.hidden_measures.push(id);
        }
        state
            .natural_sizes
            .get(&id)
            .copied()
            .unwrap_or(state.default_natural)
    }

    fn show_placeholder(&mut self, rect: Rect) {
        self.state.borrow_mut().placeholder = Some(rect);
    }

    fn hide_placeholder(&mut self) {
        self.state.borrow_mut().placeholder = None;
    }

    fn set_cursor(&mut self, cursor: &'static str) {
        self.state.borrow_mut().cursor = Some(cursor);
    }

    fn enter_full_surface(&mut self, id: WindowId) {
        self.state.borrow_mut().full_surface = Some(id);
    }

    fn exit_full_surface(&mut self) {
        self.state.borrow_mut().full_surface = None;
    }

    fn show_fallback_notice(&mut self, message: &str) {
        self.state.borrow_mut().notices.push(message.to_string());
    }
}
