//! Submission records built from validated form values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::validation;

/// A completed registration. Serializes with the same camelCase keys the QR
/// payload uses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl RegistrationData {
    /// Build from form values that already passed `validate_form`.
    pub fn from_values(values: &HashMap<String, String>) -> Self {
        let get = |name: &str| values.get(name).cloned().unwrap_or_default();
        Self {
            first_name: get(validation::FIRST_NAME),
            last_name: get(validation::LAST_NAME),
            age: get(validation::AGE).trim().parse().unwrap_or_default(),
            email: get(validation::EMAIL),
            phone: get(validation::PHONE),
            address: get(validation::ADDRESS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_and_camel_case_keys() {
        let mut values = HashMap::new();
        values.insert(validation::FIRST_NAME.to_string(), "Ana".to_string());
        values.insert(validation::AGE.to_string(), "30".to_string());
        values.insert(validation::EMAIL.to_string(), "ana@example.com".to_string());

        let data = RegistrationData::from_values(&values);
        assert_eq!(data.first_name, "Ana");
        assert_eq!(data.age, 30);

        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("lastName").is_some());
    }
}
