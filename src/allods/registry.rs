//! Typed two-level lookups over a decoded registry.
//!
//! Configuration code addresses values as `(section, key)`. Both names are
//! matched case-insensitively and the first match in storage order wins, so a
//! later sibling with the same name is never reachable. Missing entries and
//! type mismatches fall back to the caller's default; nothing here fails.

use super::types::registry::{RegistryNode, RegistryTree, RegistryValue};

/// Case-insensitive name comparison, Unicode-aware for Cyrillic names.
fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl RegistryTree {
    /// Finds `key` inside the top-level directory `section`.
    ///
    /// Only the first top-level node named `section` is considered; if that node
    /// is not a directory the lookup fails even when a later one is.
    pub fn node(&self, section: &str, key: &str) -> Option<&RegistryNode> {
        let section = self.sections().iter().find(|n| names_match(&n.name, section))?;
        if !section.is_directory() {
            return None;
        }
        section.children().iter().find(|n| names_match(&n.name, key))
    }

    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        match self.node(section, key).map(|n| &n.value) {
            Some(RegistryValue::String(text)) => text.clone(),
            _ => default.to_owned(),
        }
    }

    pub fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        match self.node(section, key).map(|n| &n.value) {
            Some(RegistryValue::Int(value)) => *value,
            _ => default,
        }
    }

    pub fn get_float(&self, section: &str, key: &str, default: f64) -> f64 {
        match self.node(section, key).map(|n| &n.value) {
            Some(RegistryValue::Float(value)) => *value,
            _ => default,
        }
    }

    /// Returns a copy of an int array; the tree's storage is never handed out.
    pub fn get_int_array(&self, section: &str, key: &str, default: &[i32]) -> Vec<i32> {
        match self.node(section, key).map(|n| &n.value) {
            Some(RegistryValue::IntArray(values)) => values.clone(),
            _ => default.to_vec(),
        }
    }
}
