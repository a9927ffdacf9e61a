#![forbid(unsafe_code)]

//! Dictionary label lookup helpers.

use serde::{Deserialize, Serialize};

/// One entry of a backend data dictionary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DictEntry {
    pub label: String,
    pub value: String,
}

/// Echo the label for a dict value; unknown values echo the value itself.
pub fn select_dict_label(entries: &[DictEntry], value: &str) -> String {
    entries
        .iter()
        .find(|e| e.value == value)
        .map(|e| e.label.clone())
        .unwrap_or_else(|| value.to_string())
}

/// Echo labels for a separator-joined value list, keeping the separator.
/// Unknown values are echoed raw, as in [`select_dict_label`].
pub fn select_dict_labels(entries: &[DictEntry], value: &str, separator: Option<&str>) -> String {
    if value.is_empty() {
        return String::new();
    }
    let sep = separator.unwrap_or(",");
    value
        .split(sep)
        .map(|v| select_dict_label(entries, v))
        .collect::<Vec<_>>()
        .join(sep)
}
