// Form bodies for device requests
//
// Keeps insertion order and drops unset optional values, so the device
// applies its own default for any field that is not sent.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Form {
    fields: Vec<(&'static str, String)>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric field; numbers use their shortest form (`90`, not `90.0`)
    pub fn number(mut self, key: &'static str, value: f64) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    /// Add a numeric field only when a value is present
    pub fn maybe_number(self, key: &'static str, value: Option<f64>) -> Self {
        match value {
            Some(value) => self.number(key, value),
            None => self,
        }
    }

    pub fn flag(mut self, key: &'static str, value: bool) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
