//! The property model shared by every component.
//!
//! Incoming Micropub JSON carries every property as an array, stored front
//! matter may carry scalars. `PropertySet` is the strict internal shape:
//! every property maps to a non-empty list of values, always. The collapse
//! back to scalars happens in exactly one place, [`normalize`], right before
//! a document is serialized.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// The serialized (collapsed) shape of a property map, as it appears in
/// front matter: singletons are plain values, everything else stays a list.
pub type FrontMatter = IndexMap<String, Value>;

// ============================================================================
// PropertySet
// ============================================================================

/// Ordered map from property name to a non-empty list of values.
///
/// Insertion order is preserved for stable iteration; sorting for
/// deterministic output is the codec's job, not this type's.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    entries: IndexMap<String, Vec<Value>>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a property set from loosely shaped data (decoded front matter,
    /// protocol JSON): arrays keep their elements, scalars are wrapped in a
    /// singleton list. Empty arrays are dropped, keeping the non-empty
    /// invariant.
    pub fn from_loose<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut set = Self::new();
        for (name, value) in entries {
            set.insert_loose(name, value);
        }
        set
    }

    /// Insert one loosely shaped value, wrapping scalars into singletons.
    pub fn insert_loose(&mut self, name: impl Into<String>, value: Value) {
        match value {
            Value::Array(values) if values.is_empty() => {}
            Value::Array(values) => {
                self.entries.insert(name.into(), values);
            }
            scalar => {
                self.entries.insert(name.into(), vec![scalar]);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// First value of a property, if present.
    pub fn first(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).and_then(|values| values.first())
    }

    /// First value of a property as a string slice.
    pub fn first_str(&self, name: &str) -> Option<&str> {
        self.first(name).and_then(Value::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Set a property to the given value list, discarding any prior values.
    /// An empty list removes the property; value domains are never empty.
    pub fn set(&mut self, name: impl Into<String>, values: Vec<Value>) {
        let name = name.into();
        if values.is_empty() {
            self.entries.shift_remove(&name);
        } else {
            self.entries.insert(name, values);
        }
    }

    /// Set a property to a single value.
    pub fn set_scalar(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), vec![value.into()]);
    }

    /// Append values to a property: a new name is set, an existing one gets
    /// the values concatenated. Duplicates are kept; append-only properties
    /// such as syndication targets rely on that.
    pub fn append(&mut self, name: impl Into<String>, values: Vec<Value>) {
        if values.is_empty() {
            return;
        }
        self.entries.entry(name.into()).or_default().extend(values);
    }

    /// Remove a whole property. Removing an absent name is a no-op.
    pub fn remove(&mut self, name: &str) -> Option<Vec<Value>> {
        self.entries.shift_remove(name)
    }

    /// Remove each of `values` once from a property's list (multiset
    /// difference). A property whose list ends up empty is dropped entirely,
    /// preserving the non-empty invariant.
    pub fn remove_values(&mut self, name: &str, values: &[Value]) {
        let Some(current) = self.entries.get_mut(name) else {
            return;
        };
        for value in values {
            if let Some(index) = current.iter().position(|v| v == value) {
                current.remove(index);
            }
        }
        if current.is_empty() {
            self.entries.shift_remove(name);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Value>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only the named properties. Unknown names are simply absent from
    /// the result.
    pub fn filtered(&self, names: &[String]) -> Self {
        let entries = names
            .iter()
            .filter_map(|name| {
                self.entries
                    .get(name)
                    .map(|values| (name.clone(), values.clone()))
            })
            .collect();
        Self { entries }
    }
}

impl Serialize for PropertySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Collapse a property set into its front-matter shape.
///
/// Every singleton list becomes its scalar value, except `photo`, which the
/// site templates always iterate over and so must stay a list. Longer lists
/// stay lists. When a `name` property survives the collapse, its value is
/// copied to `title` — the renderer's vocabulary for the same thing.
pub fn normalize(properties: &PropertySet) -> FrontMatter {
    let mut front = FrontMatter::new();
    for (name, values) in properties.iter() {
        if name != "photo" && values.len() == 1 {
            front.insert(name.clone(), values[0].clone());
        } else {
            front.insert(name.clone(), Value::Array(values.clone()));
        }
    }
    if let Some(name) = front.get("name").cloned() {
        front.insert("title".into(), name);
    }
    front
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set_of(pairs: &[(&str, Value)]) -> PropertySet {
        PropertySet::from_loose(pairs.iter().map(|(k, v)| ((*k).to_owned(), v.clone())))
    }

    #[test]
    fn test_from_loose_wraps_scalars() {
        let set = set_of(&[("name", json!("Hello")), ("published", json!(true))]);
        assert_eq!(set.get("name"), Some(&[json!("Hello")][..]));
        assert_eq!(set.get("published"), Some(&[json!(true)][..]));
    }

    #[test]
    fn test_from_loose_keeps_lists() {
        let set = set_of(&[("category", json!(["a", "b"]))]);
        assert_eq!(set.get("category"), Some(&[json!("a"), json!("b")][..]));
    }

    #[test]
    fn test_from_loose_drops_empty_lists() {
        let set = set_of(&[("category", json!([]))]);
        assert!(!set.contains("category"));
    }

    #[test]
    fn test_append_concatenates_without_dedup() {
        let mut set = set_of(&[("syndication", json!(["https://a/1"]))]);
        set.append("syndication", vec![json!("https://a/1")]);
        assert_eq!(set.get("syndication").unwrap().len(), 2);
    }

    #[test]
    fn test_append_sets_new_name() {
        let mut set = PropertySet::new();
        set.append("category", vec![json!("rust")]);
        assert_eq!(set.get("category"), Some(&[json!("rust")][..]));
    }

    #[test]
    fn test_remove_values_removes_each_once() {
        let mut set = set_of(&[("category", json!(["a", "b", "a"]))]);
        set.remove_values("category", &[json!("a")]);
        assert_eq!(set.get("category"), Some(&[json!("b"), json!("a")][..]));
    }

    #[test]
    fn test_remove_values_drops_emptied_property() {
        let mut set = set_of(&[("category", json!(["a"]))]);
        set.remove_values("category", &[json!("a")]);
        assert!(!set.contains("category"));
    }

    #[test]
    fn test_remove_values_absent_name_is_noop() {
        let mut set = set_of(&[("category", json!(["a"]))]);
        set.remove_values("missing", &[json!("a")]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_filtered_keeps_requested_names_only() {
        let set = set_of(&[("name", json!("x")), ("category", json!(["a"]))]);
        let filtered = set.filtered(&["category".into(), "missing".into()]);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains("category"));
    }

    #[test]
    fn test_normalize_collapses_singletons() {
        let set = set_of(&[("summary", json!("short"))]);
        let front = normalize(&set);
        assert_eq!(front.get("summary"), Some(&json!("short")));
    }

    #[test]
    fn test_normalize_keeps_longer_lists() {
        let set = set_of(&[("category", json!(["a", "b"]))]);
        let front = normalize(&set);
        assert_eq!(front.get("category"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_normalize_photo_always_stays_list() {
        let set = set_of(&[("photo", json!(["one.jpg"]))]);
        let front = normalize(&set);
        assert_eq!(front.get("photo"), Some(&json!(["one.jpg"])));
    }

    #[test]
    fn test_normalize_derives_title_from_name() {
        let set = set_of(&[("name", json!("My Post"))]);
        let front = normalize(&set);
        assert_eq!(front.get("title"), Some(&json!("My Post")));
    }

    #[test]
    fn test_normalize_no_name_no_title() {
        let set = set_of(&[("summary", json!("short"))]);
        let front = normalize(&set);
        assert!(!front.contains_key("title"));
    }

    #[test]
    fn test_normalize_is_idempotent_through_reload() {
        // Collapsing, re-wrapping the way decode does, and collapsing again
        // must land on the same front matter.
        let set = set_of(&[
            ("name", json!("My Post")),
            ("category", json!(["a", "b"])),
            ("photo", json!(["one.jpg"])),
        ]);
        let once = normalize(&set);
        let again = normalize(&PropertySet::from_loose(once.clone()));
        assert_eq!(once, again);
    }
}
