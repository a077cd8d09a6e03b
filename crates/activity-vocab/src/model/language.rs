//! Per-language text for natural-language properties.

use rustc_hash::FxHashMap;

/// A mapping from language tag (e.g. `en`, `pt-BR`) to localized text.
///
/// Reads never fail: unknown tags read as the empty string and an unset map
/// has no languages.
#[derive(Debug, Clone, Default)]
pub struct LanguageMap {
    entries: Option<FxHashMap<String, String>>,
}

impl PartialEq for LanguageMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(tag, text)| other.contains(tag) && other.get(tag) == text)
    }
}

impl Eq for LanguageMap {}

impl LanguageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map that counts as written even while it holds no entries.
    pub fn created() -> Self {
        Self {
            entries: Some(FxHashMap::default()),
        }
    }

    /// Returns true once the map has been created or written to, even if
    /// every entry was later removed.
    pub fn is_created(&self) -> bool {
        self.entries.is_some()
    }

    /// Language tags present, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self
            .entries
            .iter()
            .flat_map(|entries| entries.keys().map(String::as_str))
            .collect();
        tags.sort_unstable();
        tags
    }

    /// Text for `tag`, or `""` if absent.
    pub fn get(&self, tag: &str) -> &str {
        self.entries
            .as_ref()
            .and_then(|entries| entries.get(tag))
            .map_or("", String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.as_ref().is_some_and(|entries| entries.contains_key(tag))
    }

    /// Sets the text for `tag`, creating the map on first write.
    pub fn set(&mut self, tag: impl Into<String>, text: impl Into<String>) {
        self.entries
            .get_or_insert_with(FxHashMap::default)
            .insert(tag.into(), text.into());
    }

    /// Removes `tag`, returning its text.
    pub fn remove(&mut self, tag: &str) -> Option<String> {
        self.entries.as_mut()?.remove(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, FxHashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries sorted by language tag.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .entries
            .iter()
            .flat_map(|entries| entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .collect();
        pairs.sort_unstable_by_key(|(tag, _)| *tag);
        pairs.into_iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LanguageMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = LanguageMap::new();
        for (tag, text) in iter {
            map.set(tag, text);
        }
        map
    }
}
