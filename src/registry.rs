use std::collections::HashMap;

/// Categories in first-seen order.
///
/// A category's column in the slice is `offset + position`, where `offset`
/// is the number of header labels that precede the appended attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of `name`, registering it at the end if unseen.
    /// The bool is true when the category was newly added.
    pub fn get_or_insert(&mut self, name: &str) -> (usize, bool) {
        if let Some(&pos) = self.positions.get(name) {
            return (pos, false);
        }
        let pos = self.names.len();
        self.names.push(name.to_owned());
        self.positions.insert(name.to_owned(), pos);
        (pos, true)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
