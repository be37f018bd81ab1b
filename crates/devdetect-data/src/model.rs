//! In-memory dataset model shared by the binary and JSON formats.
//!
//! Both readers produce a [`RawDataset`] and both writers consume one, so
//! structural validation lives in one place.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{DataFileError, DataResult};

/// A property declared by the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: String,
    pub description: String,
    /// Value reported when no signature matches or a profile omits it.
    pub default_value: String,
}

/// One device profile: sparse values keyed by property index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: u32,
    pub values: Vec<(usize, String)>,
}

/// Ordered tokens that identify a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Index into [`RawDataset::profiles`].
    pub profile: usize,
    pub tokens: Vec<String>,
}

/// A complete dataset as stored on disk, before any property filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDataset {
    pub name: String,
    pub published: Option<NaiveDate>,
    pub next_update: Option<NaiveDate>,
    pub properties: Vec<PropertyDef>,
    pub profiles: Vec<Profile>,
    pub signatures: Vec<Signature>,
}

impl RawDataset {
    /// Check cross-references and naming rules.
    pub fn validate(&self) -> DataResult<()> {
        let mut names = HashSet::new();
        for property in &self.properties {
            if property.name.trim().is_empty() {
                return Err(invalid("property with empty name"));
            }
            if property.name.contains(',') {
                return Err(invalid(format!(
                    "property name '{}' contains a comma",
                    property.name
                )));
            }
            if !names.insert(property.name.as_str()) {
                return Err(invalid(format!("duplicate property '{}'", property.name)));
            }
        }

        let mut ids = HashSet::new();
        for profile in &self.profiles {
            if !ids.insert(profile.id) {
                return Err(invalid(format!("duplicate profile id {}", profile.id)));
            }
            let mut seen = HashSet::new();
            for (property, _) in &profile.values {
                if *property >= self.properties.len() {
                    return Err(invalid(format!(
                        "profile {} references property {property} of {}",
                        profile.id,
                        self.properties.len()
                    )));
                }
                if !seen.insert(*property) {
                    return Err(invalid(format!(
                        "profile {} sets property '{}' twice",
                        profile.id, self.properties[*property].name
                    )));
                }
            }
        }

        for (index, signature) in self.signatures.iter().enumerate() {
            if signature.profile >= self.profiles.len() {
                return Err(invalid(format!(
                    "signature {index} references profile {} of {}",
                    signature.profile,
                    self.profiles.len()
                )));
            }
            if signature.tokens.is_empty() {
                return Err(invalid(format!("signature {index} has no tokens")));
            }
            if signature.tokens.iter().any(String::is_empty) {
                return Err(invalid(format!("signature {index} has an empty token")));
            }
        }

        Ok(())
    }

    pub fn property_names(&self) -> Vec<String> {
        self.properties.iter().map(|p| p.name.clone()).collect()
    }
}

fn invalid(message: impl Into<String>) -> DataFileError {
    DataFileError::Invalid(message.into())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A tiny dataset: one mobile and one desktop profile.
    pub fn small_dataset() -> RawDataset {
        RawDataset {
            name: "Fixture".to_string(),
            published: NaiveDate::from_ymd_opt(2026, 9, 1),
            next_update: None,
            properties: vec![
                PropertyDef {
                    name: "IsMobile".to_string(),
                    description: "Device is mobile".to_string(),
                    default_value: "False".to_string(),
                },
                PropertyDef {
                    name: "DeviceType".to_string(),
                    description: String::new(),
                    default_value: "Unknown".to_string(),
                },
            ],
            profiles: vec![
                Profile {
                    id: 10,
                    values: vec![(0, "True".to_string()), (1, "SmartPhone".to_string())],
                },
                Profile {
                    id: 20,
                    values: vec![(1, "Desktop".to_string())],
                },
            ],
            signatures: vec![
                Signature {
                    profile: 0,
                    tokens: vec!["iPhone".to_string(), "Mobile/".to_string()],
                },
                Signature {
                    profile: 1,
                    tokens: vec!["Windows NT".to_string()],
                },
            ],
        }
    }
}
