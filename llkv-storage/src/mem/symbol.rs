use rustc_hash::FxHashMap;

use crate::traits::{NULL_SYMBOL_KEY, StaticSymbolTable, SymbolTable};

/// In-memory symbol dictionary. Keys are assigned densely from zero in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemSymbolTable {
    values: Vec<String>,
    keys: FxHashMap<String, i32>,
    has_null: bool,
}

impl MemSymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key for `value`, adding it to the dictionary when absent.
    pub fn intern(&mut self, value: Option<&str>) -> i32 {
        let Some(value) = value else {
            self.has_null = true;
            return NULL_SYMBOL_KEY;
        };
        if let Some(&key) = self.keys.get(value) {
            return key;
        }
        let key = self.values.len() as i32;
        self.values.push(value.to_string());
        self.keys.insert(value.to_string(), key);
        key
    }

    pub(crate) fn mark_null(&mut self) {
        self.has_null = true;
    }
}

impl SymbolTable for MemSymbolTable {
    fn value_of(&self, key: i32) -> Option<&str> {
        usize::try_from(key)
            .ok()
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
    }
}

impl StaticSymbolTable for MemSymbolTable {
    fn key_of(&self, value: &str) -> Option<i32> {
        self.keys.get(value).copied()
    }

    fn symbol_count(&self) -> usize {
        self.values.len()
    }

    fn contains_null_value(&self) -> bool {
        self.has_null
    }
}
