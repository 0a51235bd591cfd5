use serde::{Deserialize, Serialize};

/// One node of the hierarchical save structure: a name, an ordered list of
/// named string values, and an ordered list of child nodes.
///
/// This is the in-memory form the host materializes from its save file;
/// the codec reads and writes bookmarks against it without touching disk.
/// Duplicate value keys and duplicate child names are permitted, matching
/// the save format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveNode {
    name: String,
    values: Vec<(String, String)>,
    children: Vec<SaveNode>,
}

impl SaveNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First value stored under `key`, if any.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the first value stored under `key`, or appends one.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.values.push((key, value)),
        }
    }

    /// Appends a value without replacing existing ones under the same key.
    pub fn push_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.push((key.into(), value.into()));
    }

    pub fn values(&self) -> &[(String, String)] {
        &self.values
    }

    /// First child with the given name, if any.
    pub fn child(&self, name: &str) -> Option<&SaveNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut SaveNode> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// All children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SaveNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn children(&self) -> &[SaveNode] {
        &self.children
    }

    /// Appends a child and returns a mutable reference to it.
    pub fn add_child(&mut self, child: SaveNode) -> &mut SaveNode {
        self.children.push(child);
        self.children.last_mut().unwrap()
    }

    /// Removes every child with the given name. Returns how many were removed.
    pub fn remove_children(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|c| c.name != name);
        before - self.children.len()
    }
}
