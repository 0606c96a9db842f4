//! FocusRing — keyboard focus cycling between panes.

use crate::action::ComponentId;

pub struct FocusRing {
    items: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    pub fn new(items: Vec<ComponentId>) -> Self {
        Self { items, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.items.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        self.current()
    }

    pub fn prev(&mut self) -> Option<ComponentId> {
        if self.items.is_empty() {
            return None;
        }
        self.current = if self.current == 0 {
            self.items.len() - 1
        } else {
            self.current - 1
        };
        self.current()
    }

    pub fn set(&mut self, id: ComponentId) {
        if let Some(pos) = self.items.iter().position(|&x| x == id) {
            self.current = pos;
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current() == Some(id)
    }

    /// Replace the ring, keeping the focused pane when it is still present.
    pub fn set_items(&mut self, items: Vec<ComponentId>) {
        let old = self.current();
        self.items = items;
        self.current = old
            .and_then(|id| self.items.iter().position(|&x| x == id))
            .unwrap_or(0);
    }
}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_both_ways() {
        let mut ring = FocusRing::new(vec![ComponentId::VideoGrid, ComponentId::PlaylistPanel]);
        assert_eq!(ring.current(), Some(ComponentId::VideoGrid));
        assert_eq!(ring.next(), Some(ComponentId::PlaylistPanel));
        assert_eq!(ring.next(), Some(ComponentId::VideoGrid));
        assert_eq!(ring.prev(), Some(ComponentId::PlaylistPanel));
        assert!(ring.is_focused(ComponentId::PlaylistPanel));
    }

    #[test]
    fn test_set_items_keeps_focus() {
        let mut ring = FocusRing::new(vec![ComponentId::VideoGrid, ComponentId::PlaylistPanel]);
        ring.set(ComponentId::PlaylistPanel);
        ring.set_items(vec![
            ComponentId::VideoGrid,
            ComponentId::PlaylistPanel,
            ComponentId::LogPanel,
        ]);
        assert_eq!(ring.current(), Some(ComponentId::PlaylistPanel));
        ring.set(ComponentId::LogPanel);
        ring.set_items(vec![ComponentId::VideoGrid, ComponentId::PlaylistPanel]);
        assert_eq!(ring.current(), Some(ComponentId::VideoGrid));
    }

    #[test]
    fn test_empty_ring() {
        let mut ring = FocusRing::default();
        assert_eq!(ring.next(), None);
        assert_eq!(ring.prev(), None);
    }
}
