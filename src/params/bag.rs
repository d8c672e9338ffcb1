//! Ordered multimap of request parameters.

use url::form_urlencoded;

/// Immutable parameter bag: name → one or more values.
///
/// Keys keep the order in which they first appeared. A frozen bag cannot be
/// changed; call [`ParameterBag::thaw`] to get a builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBag {
    entries: Vec<(String, Vec<String>)>,
}

impl ParameterBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `application/x-www-form-urlencoded` text (query strings included).
    pub fn parse(encoded: impl AsRef<[u8]>) -> Self {
        let mut builder = ParameterBagBuilder::new();
        for (key, value) in form_urlencoded::parse(encoded.as_ref()) {
            builder.append(key.into_owned(), value.into_owned());
        }
        builder.freeze()
    }

    /// Last value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).last().map(String::as_str)
    }

    /// All values stored under `name`, oldest first.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-encode as urlencoded text. Keys appear in insertion order, each
    /// value as its own pair.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.entries {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// Copy into a mutable builder.
    pub fn thaw(self) -> ParameterBagBuilder {
        ParameterBagBuilder {
            entries: self.entries,
        }
    }
}

/// Mutable form of a [`ParameterBag`].
#[derive(Debug, Default)]
pub struct ParameterBagBuilder {
    entries: Vec<(String, Vec<String>)>,
}

impl ParameterBagBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value under `name`, keeping existing ones.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
        self
    }

    /// Replace every value under `name` with a single one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, values)) => *values = vec![value],
            None => self.entries.push((name, vec![value])),
        }
        self
    }

    /// Remove `name` and return all of its values.
    pub fn pop(&mut self, name: &str) -> Option<Vec<String>> {
        let index = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .and_then(|(_, values)| values.last())
            .map(String::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Freeze into an immutable bag.
    pub fn freeze(self) -> ParameterBag {
        ParameterBag {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_order_and_repeats() {
        let bag = ParameterBag::parse("b=1&a=2&b=3");

        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(bag.get_all("b"), ["1", "3"]);
        assert_eq!(bag.get("b"), Some("3")); // last value wins
        assert_eq!(bag.get("missing"), None);
        assert!(bag.get_all("missing").is_empty());
    }

    #[test]
    fn test_parse_decodes_escapes() {
        let bag = ParameterBag::parse("ic-current-url=%2Fusers%2F1%3Fx%3D1&name=a+b");

        assert_eq!(bag.get("ic-current-url"), Some("/users/1?x=1"));
        assert_eq!(bag.get("name"), Some("a b"));
    }

    #[test]
    fn test_empty_value_is_kept() {
        let bag = ParameterBag::parse("ic-request=&x");

        assert!(bag.contains_key("ic-request"));
        assert_eq!(bag.get("ic-request"), Some(""));
        assert_eq!(bag.get("x"), Some(""));
    }

    #[test]
    fn test_thaw_pop_freeze() {
        let mut builder = ParameterBag::parse("a=1&b=2&a=3").thaw();

        assert_eq!(builder.pop("a"), Some(vec!["1".to_string(), "3".to_string()]));
        assert_eq!(builder.pop("a"), None);
        builder.insert("b", "4").append("c", "5");

        let bag = builder.freeze();
        assert_eq!(bag.encode(), "b=4&c=5");
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn test_encode_round_trips_special_characters() {
        let bag = ParameterBag::parse("q=a%26b&q=c");
        assert_eq!(bag.encode(), "q=a%26b&q=c");
        assert!(ParameterBag::new().encode().is_empty());
    }
}
