use indexmap::IndexMap;

/// Label table built during pass 1: label name to 0-based instruction
/// index. Each instruction is one 4-byte word, so the index times 4
/// is also the byte offset.
#[derive(Debug, Default)]
pub struct Labels(IndexMap<String, u32>);

impl Labels {
    pub fn new() -> Self {
        Labels(IndexMap::new())
    }

    /// Inserts a definition, returning the previous index if the
    /// label was already defined. The later definition wins.
    pub fn insert(&mut self, name: String, index: u32) -> Option<u32> {
        self.0.insert(name, index)
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
