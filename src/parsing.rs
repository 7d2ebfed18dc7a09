use std::collections::{BTreeMap, HashMap};

/// Required label equality constraints, e.g. `aggregate=web,env=prod`.
///
/// An empty selector matches every label set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LabelSelector {
    required: BTreeMap<String, String>,
}

impl LabelSelector {
    /// Parses a comma-separated `key=value` list.
    ///
    /// Fragments that are not exactly one non-empty key and one non-empty
    /// value around a single `=` are dropped without error. There is no
    /// escaping, so values cannot contain `,` or `=`.
    pub fn parse(arg: &str) -> Self {
        Self { required: parse_label_arg(arg) }
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }

    pub fn len(&self) -> usize {
        self.required.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.required.get(key).map(String::as_str)
    }

    /// True when every required key is present in `labels` with the same value.
    pub fn matches(&self, labels: &HashMap<String, String>) -> bool {
        self.required
            .iter()
            .all(|(key, value)| labels.get(key) == Some(value))
    }
}

pub fn parse_label_arg(arg: &str) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    for pair in arg.split(',') {
        let parts: Vec<&str> = pair.split('=').collect();
        if let [key, value] = parts[..] {
            if !key.is_empty() && !value.is_empty() {
                labels.insert(key.to_string(), value.to_string());
            }
        }
    }
    labels
}

pub fn parse_namespaces(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
