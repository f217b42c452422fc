//! Address-to-name label table.
//!
//! Built once per analysis session and then shared read-only by every render
//! call. Address 0 never carries a label.

use std::collections::HashMap;

/// Mapping from addresses to symbolic names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    labels: HashMap<u64, String>,
}

impl LabelMap {
    /// Creates an empty label map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `address`, returning the previous name if any.
    pub fn insert(&mut self, address: u64, name: impl Into<String>) -> Option<String> {
        self.labels.insert(address, name.into())
    }

    /// Returns the label for `address`.
    ///
    /// Address 0 always yields `None`, even if it was inserted.
    pub fn get(&self, address: u64) -> Option<&str> {
        if address == 0 {
            return None;
        }
        self.labels.get(&address).map(String::as_str)
    }

    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no labels are defined.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates over `(address, name)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.labels.iter().map(|(addr, name)| (*addr, name.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(u64, S)> for LabelMap {
    fn from_iter<I: IntoIterator<Item = (u64, S)>>(iter: I) -> Self {
        Self {
            labels: iter
                .into_iter()
                .map(|(addr, name)| (addr, name.into()))
                .collect(),
        }
    }
}

/// Parses `0x`-prefixed or bare hexadecimal addresses.
pub fn parse_address(s: &str) -> Option<u64> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u64::from_str_radix(digits, 16).ok()
}

// Serialized as a JSON object keyed by hex address strings.
#[cfg(feature = "serde")]
impl serde::Serialize for LabelMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut entries: Vec<_> = self.labels.iter().collect();
        entries.sort_by_key(|(addr, _)| **addr);
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (addr, name) in entries {
            map.serialize_entry(&format!("{:#x}", addr), name)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LabelMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        let raw = HashMap::<String, String>::deserialize(deserializer)?;
        let mut labels = HashMap::with_capacity(raw.len());
        for (key, name) in raw {
            let addr = parse_address(&key)
                .ok_or_else(|| D::Error::custom(format!("invalid label address: {key}")))?;
            labels.insert(addr, name);
        }
        Ok(Self { labels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let mut labels = LabelMap::new();
        assert!(labels.is_empty());
        labels.insert(0x401000, "main");
        assert_eq!(labels.get(0x401000), Some("main"));
        assert_eq!(labels.get(0x401001), None);
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn test_zero_never_has_label() {
        let labels: LabelMap = [(0u64, "null"), (4, "four")].into_iter().collect();
        assert_eq!(labels.get(0), None);
        assert_eq!(labels.get(4), Some("four"));
    }

    #[test]
    fn test_insert_replaces() {
        let mut labels = LabelMap::new();
        assert_eq!(labels.insert(0x10, "a"), None);
        assert_eq!(labels.insert(0x10, "b"), Some("a".to_string()));
        assert_eq!(labels.get(0x10), Some("b"));
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("0x401000"), Some(0x401000));
        assert_eq!(parse_address("401000"), Some(0x401000));
        assert_eq!(parse_address("0XFF"), Some(0xff));
        assert_eq!(parse_address("main"), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_form() {
        let labels: LabelMap = [(0x402000u64, "g_table"), (0x10, "small")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"{"0x10":"small","0x402000":"g_table"}"#);

        let back: LabelMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, labels);
        assert!(serde_json::from_str::<LabelMap>(r#"{"nope":"x"}"#).is_err());
    }
}
