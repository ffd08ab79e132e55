use crate::storage::link::Link;
use std::collections::VecDeque;

/// In-memory link collection, newest first.
///
/// Links are only ever prepended; nothing is reordered, edited or removed
/// for the lifetime of the store.
#[derive(Debug, Default)]
pub struct LinkStore {
    links: VecDeque<Link>,
    last_id: u64,
}

impl LinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unused id. Ids only grow, so two links created in the same
    /// instant still get distinct ids.
    pub fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    /// Prepend a link; it becomes the first element of every later read
    pub fn add(&mut self, link: Link) {
        self.last_id = self.last_id.max(link.id);
        self.links.push_front(link);
    }

    pub fn all(&self) -> &VecDeque<Link> {
        &self.links
    }

    pub fn get(&self, index: usize) -> Option<&Link> {
        self.links.get(index)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
