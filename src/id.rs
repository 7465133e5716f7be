use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use gpui::SharedString;

/// Monotonic id source for controls and fields mounted without an explicit id.
///
/// Clones share the same counter, so every scope derived from one root hands
/// out distinct ids. Separate roots count independently.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    prefix: SharedString,
    next: Arc<AtomicU64>,
}

impl IdAllocator {
    pub fn new(prefix: impl Into<SharedString>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn prefix(&self) -> &SharedString {
        &self.prefix
    }

    pub fn next_id(&self) -> SharedString {
        let value = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{value}", self.prefix).into()
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new("calm")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_across_clones() {
        let ids = IdAllocator::new("field");
        let clone = ids.clone();
        let first = ids.next_id();
        let second = clone.next_id();
        assert_ne!(first, second);
        assert_eq!(first.as_str(), "field-0");
        assert_eq!(second.as_str(), "field-1");
    }

    #[test]
    fn separate_allocators_count_independently() {
        let a = IdAllocator::new("a");
        let b = IdAllocator::new("a");
        assert_eq!(a.next_id(), b.next_id());
    }
}
