//! Layered full-surface presentation

use crate::window::WindowId;

/// Stack of windows presented full-surface. The top entry owns the screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FullSurfaceStack {
    layers: Vec<WindowId>,
}

impl FullSurfaceStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a window on top. A window already on the stack moves to the top.
    pub fn present(&mut self, id: WindowId) {
        self.layers.retain(|&w| w != id);
        self.layers.push(id);
    }

    /// Pop the top layer and return the one now on top
    pub fn rewind(&mut self) -> Option<WindowId> {
        self.layers.pop();
        self.top()
    }

    /// Drop every layer. Returns whether anything was presented.
    pub fn leave_all(&mut self) -> bool {
        let had_layers = !self.layers.is_empty();
        self.layers.clear();
        had_layers
    }

    /// Drop a window wherever it sits. Returns whether it was the top layer.
    pub fn remove(&mut self, id: WindowId) -> bool {
        let was_top = self.top() == Some(id);
        self.layers.retain(|&w| w != id);
        was_top
    }

    #[inline]
    pub fn top(&self) -> Option<WindowId> {
        self.layers.last().copied()
    }

    #[inline]
    pub fn contains(&self, id: WindowId) -> bool {
        self.layers.contains(&id)
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
