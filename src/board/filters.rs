use super::page::{FILTER_FIELDS, Page};
use indexmap::IndexMap;

pub const FREE_ONLY_KEY: &str = "free_only";

/// Filter name to value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    values: IndexMap<String, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pairs that will be sent as query parameters; empty values mean "no
    /// constraint" and are skipped.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

/// Reads the current form state. Values are passed through unvalidated; a
/// field missing from the form contributes nothing.
pub fn collect_filters(page: &Page) -> FilterSet {
    let mut filters = FilterSet::new();
    if let Some(form) = page.filters_form.as_ref() {
        for name in FILTER_FIELDS {
            if let Some(value) = form.value(name) {
                filters.insert(name, value);
            }
        }
    }

    if page.free_only.as_ref().is_some_and(|checkbox| checkbox.checked) {
        filters.insert(FREE_ONLY_KEY, "true");
    }

    filters
}
