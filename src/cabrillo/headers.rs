//! Header table and the per-tag collection policies.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Canonical name of the `QSO:` tag.
pub const QSO_TAG: &str = "qso";
/// Canonical name of the `X-QSO:` tag.
pub const CROSS_QSO_TAG: &str = "xQso";

/// Header value: a single string, or an ordered list for multi-valued tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    /// Last-write-wins value.
    Single(String),
    /// Every occurrence, in file order.
    List(Vec<String>),
}

impl HeaderValue {
    /// Single value, if this is not a list.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Single(v) => Some(v),
            Self::List(_) => None,
        }
    }
}

/// Raw headers keyed by canonical (camelCase) tag name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderTable(HashMap<String, HeaderValue>);

impl HeaderTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for `tag`.
    pub fn get(&self, tag: &str) -> Option<&HeaderValue> {
        self.0.get(tag)
    }

    /// Single-valued header for `tag`.
    pub fn get_str(&self, tag: &str) -> Option<&str> {
        self.get(tag).and_then(HeaderValue::as_str)
    }

    /// Iterates all tags in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no headers were collected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn set(&mut self, tag: String, data: String) {
        self.0.insert(tag, HeaderValue::Single(data));
    }

    fn append(&mut self, tag: String, data: String) {
        match self.0.entry(tag).or_insert_with(|| HeaderValue::List(Vec::new())) {
            HeaderValue::List(items) => items.push(data),
            single => *single = HeaderValue::List(vec![data]),
        }
    }
}

/// How a canonical tag is folded into the [`HeaderTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// Stored under `version`.
    Version,
    /// Consumed and dropped.
    Discard,
    /// Appended to an ordered list.
    Append,
    /// Replaces any earlier value.
    Overwrite,
}

const HEADER_POLICIES: &[(&str, HeaderPolicy)] = &[
    ("startOfLog", HeaderPolicy::Version),
    ("endOfLog", HeaderPolicy::Discard),
    ("soapbox", HeaderPolicy::Append),
    ("address", HeaderPolicy::Append),
];

/// Policy for a canonical tag name.
pub fn policy_for(tag: &str) -> HeaderPolicy {
    HEADER_POLICIES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, policy)| *policy)
        .unwrap_or(HeaderPolicy::Overwrite)
}

/// Accumulates non-QSO header lines.
#[derive(Debug, Default)]
pub struct HeaderCollector {
    table: HeaderTable,
}

impl HeaderCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one header line, `tag` already canonical.
    pub fn collect(&mut self, tag: &str, data: &str) {
        match policy_for(tag) {
            HeaderPolicy::Version => self.table.set("version".to_string(), data.to_string()),
            HeaderPolicy::Discard => {}
            HeaderPolicy::Append => self.table.append(tag.to_string(), data.to_string()),
            HeaderPolicy::Overwrite => self.table.set(tag.to_string(), data.to_string()),
        }
    }

    /// Headers seen so far.
    pub fn table(&self) -> &HeaderTable {
        &self.table
    }

    /// Finishes collection.
    pub fn into_table(self) -> HeaderTable {
        self.table
    }
}

/// Canonicalizes a Cabrillo tag: `CATEGORY-OPERATOR` becomes `categoryOperator`.
pub fn to_camel_case(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    for word in tag.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        let lower = word.to_lowercase();
        if out.is_empty() {
            out.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_cases_cabrillo_tags() {
        assert_eq!(to_camel_case("CATEGORY-OPERATOR"), "categoryOperator");
        assert_eq!(to_camel_case("X-QSO"), CROSS_QSO_TAG);
        assert_eq!(to_camel_case("QSO"), QSO_TAG);
        assert_eq!(to_camel_case("START-OF-LOG"), "startOfLog");
        assert_eq!(to_camel_case("-CALLSIGN-"), "callsign");
    }

    #[test]
    fn start_of_log_becomes_version_and_end_is_dropped() {
        let mut headers = HeaderCollector::new();
        headers.collect("startOfLog", "3.0");
        headers.collect("endOfLog", "");
        let table = headers.into_table();
        assert_eq!(table.get_str("version"), Some("3.0"));
        assert!(table.get("endOfLog").is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn list_tags_append_and_others_overwrite() {
        let mut headers = HeaderCollector::new();
        headers.collect("soapbox", "FIRST");
        headers.collect("club", "OLD CLUB");
        headers.collect("soapbox", "SECOND");
        headers.collect("club", "NEW CLUB");
        let table = headers.table();
        assert_eq!(
            table.get("soapbox"),
            Some(&HeaderValue::List(vec!["FIRST".to_string(), "SECOND".to_string()]))
        );
        assert_eq!(table.get_str("club"), Some("NEW CLUB"));
        assert_eq!(table.get_str("soapbox"), None);
    }
}
