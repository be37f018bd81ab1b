//! JSON source format.
//!
//! The human-editable form of a dataset. Profiles reference properties by
//! name and signatures reference profiles by id; both are resolved to
//! indices when converting to a [`RawDataset`].

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DataFileError, DataResult};
use crate::model::{Profile, PropertyDef, RawDataset, Signature};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_update: Option<NaiveDate>,
    pub properties: Vec<PropertySource>,
    pub profiles: Vec<ProfileSource>,
    pub signatures: Vec<SignatureSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySource {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub default: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSource {
    pub id: u32,
    /// Property name to value; omitted properties take their default.
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSource {
    /// Id of the profile this signature identifies.
    pub profile: u32,
    /// Substrings that must appear in the User-Agent, in this order.
    pub tokens: Vec<String>,
}

impl DatasetSource {
    /// Read a JSON source file.
    pub fn from_file(path: &Path) -> DataResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DataFileError::FileNotFound(path.display().to_string())
            } else {
                e.into()
            }
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Resolve names and ids to indices and validate the result.
    pub fn into_raw(self) -> DataResult<RawDataset> {
        let property_index: HashMap<&str, usize> = self
            .properties
            .iter()
            .enumerate()
            .map(|(index, property)| (property.name.as_str(), index))
            .collect();

        let mut profiles = Vec::with_capacity(self.profiles.len());
        for profile in &self.profiles {
            let mut values = Vec::with_capacity(profile.values.len());
            for (name, value) in &profile.values {
                let index = property_index.get(name.as_str()).copied().ok_or_else(|| {
                    DataFileError::Invalid(format!(
                        "profile {} sets undeclared property '{name}'",
                        profile.id
                    ))
                })?;
                values.push((index, value.clone()));
            }
            values.sort_by_key(|(index, _)| *index);
            profiles.push(Profile {
                id: profile.id,
                values,
            });
        }

        let profile_index: HashMap<u32, usize> = profiles
            .iter()
            .enumerate()
            .map(|(index, profile)| (profile.id, index))
            .collect();

        let signatures = self
            .signatures
            .into_iter()
            .map(|signature| {
                let profile = profile_index.get(&signature.profile).copied().ok_or_else(|| {
                    DataFileError::Invalid(format!(
                        "signature references unknown profile {}",
                        signature.profile
                    ))
                })?;
                Ok(Signature {
                    profile,
                    tokens: signature.tokens,
                })
            })
            .collect::<DataResult<Vec<_>>>()?;

        let raw = RawDataset {
            name: self.name,
            published: self.published,
            next_update: self.next_update,
            properties: self
                .properties
                .into_iter()
                .map(|p| PropertyDef {
                    name: p.name,
                    description: p.description,
                    default_value: p.default,
                })
                .collect(),
            profiles,
            signatures,
        };
        raw.validate()?;
        Ok(raw)
    }
}
