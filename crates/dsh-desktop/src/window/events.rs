//! Window events and handler registry

use crate::math::Size;
use super::WindowId;

/// Kind of window event a handler subscribes to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindowEventKind {
    /// Close requested (cancelable)
    Closing,
    /// Window disposed
    Closed,
    /// Back navigation requested (cancelable)
    BackNav,
    /// Live size changed
    Resize,
}

impl WindowEventKind {
    /// Whether handlers may cancel the default action
    #[inline]
    pub fn is_cancelable(self) -> bool {
        matches!(self, WindowEventKind::Closing | WindowEventKind::BackNav)
    }
}

/// An event delivered to window handlers.
///
/// The default action for a cancelable event runs only if no handler called
/// [`WindowEvent::cancel`].
#[derive(Clone, Debug, PartialEq)]
pub struct WindowEvent {
    pub window_id: WindowId,
    pub kind: WindowEventKind,
    /// New size for [`WindowEventKind::Resize`]
    pub size: Option<Size>,
    cancelable: bool,
    canceled: bool,
}

impl WindowEvent {
    pub fn new(window_id: WindowId, kind: WindowEventKind) -> Self {
        Self {
            window_id,
            kind,
            size: None,
            cancelable: kind.is_cancelable(),
            canceled: false,
        }
    }

    /// An event of a normally cancelable kind that handlers can only observe,
    /// e.g. `closing` on a child whose parent is going away
    pub fn notice(window_id: WindowId, kind: WindowEventKind) -> Self {
        Self {
            cancelable: false,
            ..Self::new(window_id, kind)
        }
    }

    pub fn resize(window_id: WindowId, size: Size) -> Self {
        Self {
            size: Some(size),
            ..Self::new(window_id, WindowEventKind::Resize)
        }
    }

    /// Prevent the default action. Ignored for non-cancelable events.
    pub fn cancel(&mut self) {
        if self.cancelable {
            self.canceled = true;
        }
    }

    #[inline]
    pub fn is_cancelable(&self) -> bool {
        self.cancelable
    }

    #[inline]
    pub fn is_canceled(&self) -> bool {
        self.canceled
    }
}

/// Event handler callback
pub type EventHandler = Box<dyn FnMut(&mut WindowEvent)>;

/// Handlers registered on one window, called in registration order
#[derive(Default)]
pub struct WindowEvents {
    handlers: Vec<(WindowEventKind, EventHandler)>,
}

impl WindowEvents {
    /// Subscribe to an event kind
    pub fn on(&mut self, kind: WindowEventKind, handler: EventHandler) {
        self.handlers.push((kind, handler));
    }

    /// Deliver an event to every matching handler
    pub fn dispatch(&mut self, event: &mut WindowEvent) {
        for (kind, handler) in self.handlers.iter_mut() {
            if *kind == event.kind {
                handler(event);
            }
        }
    }
}

impl std::fmt::Debug for WindowEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowEvents")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_cancel_only_applies_to_cancelable_events() {
        let mut closing = WindowEvent::new(1, WindowEventKind::Closing);
        closing.cancel();
        assert!(closing.is_canceled());

        let mut closed = WindowEvent::new(1, WindowEventKind::Closed);
        closed.cancel();
        assert!(!closed.is_canceled());

        let mut notice = WindowEvent::notice(1, WindowEventKind::Closing);
        assert!(!notice.is_cancelable());
        notice.cancel();
        assert!(!notice.is_canceled());
    }

    #[test]
    fn test_dispatch_filters_by_kind() {
        let calls = Rc::new(Cell::new(0));
        let mut events = WindowEvents::default();

        let c = calls.clone();
        events.on(WindowEventKind::Resize, Box::new(move |e| {
            assert_eq!(e.size, Some(Size::new(10.0, 20.0)));
            c.set(c.get() + 1);
        }));
        events.on(WindowEventKind::Closing, Box::new(|e| e.cancel()));

        let mut resize = WindowEvent::resize(4, Size::new(10.0, 20.0));
        events.dispatch(&mut resize);
        assert_eq!(calls.get(), 1);
        assert!(!resize.is_canceled());

        let mut closing = WindowEvent::new(4, WindowEventKind::Closing);
        events.dispatch(&mut closing);
        assert!(closing.is_canceled());
        assert_eq!(calls.get(), 1);
    }
}
