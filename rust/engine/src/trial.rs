use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Record produced by one trial.
///
/// `result` is a free-form category label aggregated into counts and
/// percentages; every entry of `fields` is aggregated numerically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub result: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, f64>,
}

impl TrialResult {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds or overwrites a numeric field.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overwrites_duplicate_fields() {
        let r = TrialResult::new("win").with("net_win", 1.0).with("net_win", 2.0);
        assert_eq!(r.get("net_win"), Some(2.0));
        assert_eq!(r.fields.len(), 1);
    }

    #[test]
    fn serializes_flat() {
        let r = TrialResult::new("lose").with("net_win", -1.0);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["result"], "lose");
        assert_eq!(v["net_win"], -1.0);
    }
}
