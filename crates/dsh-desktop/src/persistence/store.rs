//! Key/value storage for saved bounds

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// String key/value store backing bounds persistence
pub trait BoundsStore {
    fn load(&self, key: &str) -> Option<String>;

    fn store(&mut self, key: &str, value: String);
}

/// In-memory store. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl BoundsStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn store(&mut self, key: &str, value: String) {
        self.entries.borrow_mut().insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let mut writer = store.clone();

        writer.store("window-bounds:files", "[false,[0,0,1,1]]".to_string());

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.load("window-bounds:files").as_deref(),
            Some("[false,[0,0,1,1]]")
        );
        assert!(store.load("missing").is_none());
    }
}
