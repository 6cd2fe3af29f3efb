//! Taskbar grouping
//!
//! Every shown window gets a taskbar control. Windows of one application
//! share a single group unless grouping is disabled for that application or
//! for the whole desktop.

use serde::Serialize;
use crate::app::AppId;
use crate::window::WindowId;

/// Unique taskbar group identifier
pub type GroupId = u64;

/// How a group reacts to activation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    /// One window: activation toggles it directly
    Single,
    /// Several windows: activation opens a selector
    Multi,
}

/// What the compositor should do when a group is activated
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskbarAction {
    /// Focus, minimize or restore the window depending on its state
    ToggleWindow(WindowId),
    /// Let the user pick one of the group's windows
    OpenSelector {
        group_id: GroupId,
        windows: Vec<WindowId>,
    },
}

/// One taskbar control
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskbarGroup {
    pub id: GroupId,
    pub app_id: AppId,
    /// Whether other windows of the application may join
    pub grouped: bool,
    /// Member windows in insertion order
    pub windows: Vec<WindowId>,
}

impl TaskbarGroup {
    /// Current activation mode
    pub fn mode(&self) -> GroupMode {
        if self.windows.len() > 1 {
            GroupMode::Multi
        } else {
            GroupMode::Single
        }
    }
}

/// Ordered set of taskbar groups
#[derive(Debug)]
pub struct Taskbar {
    groups: Vec<TaskbarGroup>,
    next_id: GroupId,
}

impl Default for Taskbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Taskbar {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a window, joining its application's group when `grouped` is set.
    ///
    /// Adding a window that is already present returns its current group.
    pub fn add_window(&mut self, window_id: WindowId, app_id: AppId, grouped: bool) -> GroupId {
        if let Some(group) = self.group_of(window_id) {
            return group.id;
        }

        if grouped {
            if let Some(group) = self
                .groups
                .iter_mut()
                .find(|g| g.grouped && g.app_id == app_id)
            {
                group.windows.push(window_id);
                return group.id;
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.groups.push(TaskbarGroup {
            id,
            app_id,
            grouped,
            windows: vec![window_id],
        });
        id
    }

    /// Remove a window. The group goes away with its last window.
    ///
    /// Returns whether the window was present.
    pub fn remove_window(&mut self, window_id: WindowId) -> bool {
        let Some(idx) = self
            .groups
            .iter()
            .position(|g| g.windows.contains(&window_id))
        else {
            return false;
        };

        let group = &mut self.groups[idx];
        group.windows.retain(|&w| w != window_id);
        if group.windows.is_empty() {
            self.groups.remove(idx);
        }
        true
    }

    /// Action for activating a group
    pub fn activate(&self, group_id: GroupId) -> Option<TaskbarAction> {
        let group = self.get(group_id)?;
        match group.mode() {
            GroupMode::Single => group.windows.first().copied().map(TaskbarAction::ToggleWindow),
            GroupMode::Multi => Some(TaskbarAction::OpenSelector {
                group_id,
                windows: group.windows.clone(),
            }),
        }
    }

    pub fn get(&self, group_id: GroupId) -> Option<&TaskbarGroup> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    /// Group containing a window
    pub fn group_of(&self, window_id: WindowId) -> Option<&TaskbarGroup> {
        self.groups.iter().find(|g| g.windows.contains(&window_id))
    }

    /// Groups in display order
    #[inline]
    pub fn groups(&self) -> &[TaskbarGroup] {
        &self.groups
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_of_one_app_share_group() {
        let mut taskbar = Taskbar::new();
        let g1 = taskbar.add_window(10, 1, true);
        let g2 = taskbar.add_window(11, 1, true);
        let other = taskbar.add_window(20, 2, true);

        assert_eq!(g1, g2);
        assert_ne!(g1, other);
        assert_eq!(taskbar.len(), 2);
        assert_eq!(taskbar.get(g1).unwrap().mode(), GroupMode::Multi);
        assert_eq!(taskbar.get(other).unwrap().mode(), GroupMode::Single);
    }

    #[test]
    fn test_ungrouped_windows_get_own_controls() {
        let mut taskbar = Taskbar::new();
        let g1 = taskbar.add_window(10, 1, false);
        let g2 = taskbar.add_window(11, 1, false);
        let g3 = taskbar.add_window(12, 1, true);

        assert_ne!(g1, g2);
        assert_ne!(g2, g3);
        assert_eq!(taskbar.len(), 3);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut taskbar = Taskbar::new();
        let g1 = taskbar.add_window(10, 1, true);
        assert_eq!(taskbar.add_window(10, 1, true), g1);
        assert_eq!(taskbar.get(g1).unwrap().windows, vec![10]);
    }

    #[test]
    fn test_removing_last_window_destroys_group() {
        let mut taskbar = Taskbar::new();
        let group = taskbar.add_window(10, 1, true);
        taskbar.add_window(11, 1, true);

        assert!(taskbar.remove_window(10));
        assert_eq!(taskbar.get(group).unwrap().mode(), GroupMode::Single);

        assert!(taskbar.remove_window(11));
        assert!(taskbar.get(group).is_none());
        assert!(taskbar.is_empty());
        assert!(!taskbar.remove_window(11));
    }

    #[test]
    fn test_activation_by_mode() {
        let mut taskbar = Taskbar::new();
        let group = taskbar.add_window(10, 1, true);
        assert_eq!(taskbar.activate(group), Some(TaskbarAction::ToggleWindow(10)));

        taskbar.add_window(11, 1, true);
        assert_eq!(
            taskbar.activate(group),
            Some(TaskbarAction::OpenSelector {
                group_id: group,
                windows: vec![10, 11],
            })
        );
        assert_eq!(taskbar.activate(99), None);
    }
}
