/// One key/value pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Ordered tag set with unique keys.
///
/// Iteration follows first-insertion order. Re-adding an existing key
/// replaces its value in place, so the key keeps its original position.
/// Tag sets on OSM entities are small, so lookups are linear scans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagsCollection {
    tags: Vec<Tag>,
}

impl TagsCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tags: Vec::with_capacity(capacity),
        }
    }

    /// Insert or overwrite `key`.
    pub fn add_or_replace(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.tags.iter_mut().find(|t| t.key == key) {
            Some(existing) => existing.value = value,
            None => self.tags.push(Tag { key, value }),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.tags.iter().any(|t| t.key == key)
    }

    /// Remove `key`, returning its value. Remaining tags keep their order.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.tags.iter().position(|t| t.key == key)?;
        Some(self.tags.remove(idx).value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }
}

impl<'a> IntoIterator for &'a TagsCollection {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagsCollection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Self::new();
        for (k, v) in iter {
            tags.add_or_replace(k, v);
        }
        tags
    }
}
