//! First-show packing and cascade placement

use tracing::debug;
use crate::math::Vec2;
use crate::window::WindowId;
use super::DesktopEngine;

impl DesktopEngine {
    /// Size a window to its natural content size, clamped to the
    /// compositing area. Measured before the surface is made visible.
    pub(crate) fn pack(&mut self, id: WindowId) {
        let natural = self.presenter.measure_content(id);
        let size = natural.at_most(self.area.size());
        if let Some(window) = self.windows.get_mut(id) {
            let packed = window.apply_packed_size(size);
            debug!(window_id = id, width = window.size.width, height = window.size.height, "window packed");
            if packed.is_some() {
                self.emit_resize(id);
            }
        }
    }

    /// Place a window at the first cascade origin no other shown window
    /// occupies
    pub(crate) fn place_new(&mut self, id: WindowId) {
        let position = self.cascade_position(id);
        if let Some(window) = self.windows.get_mut(id) {
            window.apply_placed_position(position);
            debug!(window_id = id, x = position.x, y = position.y, "window placed");
        }
    }

    fn cascade_position(&self, id: WindowId) -> Vec2 {
        let tolerance = self.config.overlap_tolerance;
        let step = self.config.cascade_step;
        let origin = self.area.position() + self.config.cascade_origin;

        let taken: Vec<Vec2> = self
            .windows
            .all_windows()
            .filter(|w| w.id != id && w.has_been_shown())
            .map(|w| w.position())
            .collect();

        // One more candidate than there are windows is always free
        (0..=taken.len())
            .map(|i| origin + Vec2::new(step, step) * i as f32)
            .find(|candidate| !taken.iter().any(|p| p.approx_eq(*candidate, tolerance)))
            .unwrap_or(origin)
    }
}
