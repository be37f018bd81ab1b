//! Property filter parsing and resolution.

use std::fmt;

use crate::error::LoadError;

/// An ordered set of property names a provider is restricted to.
///
/// An empty filter enables every property the dataset defines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    names: Vec<String>,
}

impl PropertyFilter {
    /// A filter that enables every available property.
    #[must_use]
    pub const fn all() -> Self {
        Self { names: Vec::new() }
    }

    /// Parse a comma-separated list of property names.
    ///
    /// Whitespace around names is trimmed, empty entries are skipped and
    /// repeated names keep their first position.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        Self::from_names(list.split(','))
    }

    /// Build a filter from individual names, with the same normalization as
    /// [`PropertyFilter::parse`].
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() || unique.iter().any(|n| n == name) {
                continue;
            }
            unique.push(name.to_string());
        }
        Self { names: unique }
    }

    /// Whether this filter enables every property.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.names.is_empty()
    }

    /// The requested names, in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Resolve the filter against the properties a dataset defines.
    ///
    /// Returns indices into `available`, in filter order (or dataset order
    /// for an empty filter). Fails on the first name the dataset lacks.
    pub fn resolve(&self, available: &[String]) -> Result<Vec<usize>, LoadError> {
        if self.is_all() {
            return Ok((0..available.len()).collect());
        }

        self.names
            .iter()
            .map(|name| {
                available
                    .iter()
                    .position(|candidate| candidate == name)
                    .ok_or_else(|| LoadError::UnknownProperty { name: name.clone() })
            })
            .collect()
    }
}

impl From<&str> for PropertyFilter {
    fn from(list: &str) -> Self {
        Self::parse(list)
    }
}

impl fmt::Display for PropertyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            write!(f, "<all>")
        } else {
            write!(f, "{}", self.names.join(","))
        }
    }
}
