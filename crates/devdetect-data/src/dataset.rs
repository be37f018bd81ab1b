//! The signature-matching detection engine.

use devdetect_core::{DatasetInfo, DetectionEngine, MatchOutcome, PropertyFilter};

use crate::error::DataResult;
use crate::format::FORMAT_VERSION;
use crate::matcher::{CompiledSignature, SignatureMatcher};
use crate::model::RawDataset;

/// Per-match scratch: which profile the last detection resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternWorkset {
    profile: Option<usize>,
}

/// A loaded dataset restricted to the enabled properties.
///
/// Values are stored as a dense `profiles x enabled properties` table with
/// defaults already filled in, so lookups never allocate.
#[derive(Debug, Clone)]
pub struct PatternDataset {
    info: DatasetInfo,
    properties: Vec<String>,
    defaults: Vec<String>,
    values: Vec<String>,
    matcher: SignatureMatcher,
}

impl PatternDataset {
    /// Build the engine from a validated dataset, keeping only the
    /// properties `filter` enables.
    pub fn from_raw(raw: RawDataset, filter: &PropertyFilter) -> DataResult<Self> {
        let enabled = filter.resolve(&raw.property_names())?;
        let width = enabled.len();

        let properties = enabled
            .iter()
            .map(|&i| raw.properties[i].name.clone())
            .collect();
        let defaults: Vec<String> = enabled
            .iter()
            .map(|&i| raw.properties[i].default_value.clone())
            .collect();

        let mut values = Vec::with_capacity(raw.profiles.len() * width);
        for profile in &raw.profiles {
            let row = values.len();
            values.extend(defaults.iter().cloned());
            for (property, value) in &profile.values {
                if let Some(column) = enabled.iter().position(|&i| i == *property) {
                    values[row + column].clone_from(value);
                }
            }
        }

        let info = DatasetInfo {
            name: raw.name,
            format_version: FORMAT_VERSION,
            published: raw.published,
            next_update: raw.next_update,
            signature_count: raw.signatures.len(),
            profile_count: raw.profiles.len(),
        };

        let signatures = raw
            .signatures
            .into_iter()
            .enumerate()
            .map(|(index, s)| CompiledSignature::new(index, s.profile, s.tokens))
            .collect();

        Ok(Self {
            info,
            properties,
            defaults,
            values,
            matcher: SignatureMatcher::new(signatures),
        })
    }
}

impl DetectionEngine for PatternDataset {
    type Workset = PatternWorkset;

    fn info(&self) -> DatasetInfo {
        self.info.clone()
    }

    fn properties(&self) -> &[String] {
        &self.properties
    }

    fn create_workset(&self) -> Self::Workset {
        PatternWorkset::default()
    }

    fn detect(&self, workset: &mut Self::Workset, user_agent: &str) -> MatchOutcome {
        match self.matcher.best_match(user_agent) {
            Some(signature) => {
                workset.profile = Some(signature.profile);
                MatchOutcome::exact(signature.index)
            }
            None => {
                workset.profile = None;
                MatchOutcome::unmatched()
            }
        }
    }

    fn value<'a>(&'a self, workset: &'a Self::Workset, property: usize) -> &'a str {
        match workset.profile {
            Some(profile) => &self.values[profile * self.properties.len() + property],
            None => &self.defaults[property],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::small_dataset;
    use devdetect_core::MatchMethod;

    #[test]
    fn test_all_properties_enabled_by_default() {
        let engine = PatternDataset::from_raw(small_dataset(), &PropertyFilter::all()).unwrap();
        assert_eq!(engine.properties(), ["IsMobile", "DeviceType"]);
        assert_eq!(engine.info().signature_count, 2);
        assert_eq!(engine.info().profile_count, 2);
    }

    #[test]
    fn test_filter_restricts_and_reorders() {
        let filter = PropertyFilter::parse("DeviceType");
        let engine = PatternDataset::from_raw(small_dataset(), &filter).unwrap();
        assert_eq!(engine.properties(), ["DeviceType"]);

        let mut workset = engine.create_workset();
        engine.detect(&mut workset, "Mozilla/5.0 (Windows NT 10.0)");
        assert_eq!(engine.value(&workset, 0), "Desktop");
    }

    #[test]
    fn test_unknown_filter_property() {
        let filter = PropertyFilter::parse("IsMobile,PriceBand");
        let err = PatternDataset::from_raw(small_dataset(), &filter).unwrap_err();
        assert!(err.to_string().contains("PriceBand"));
    }

    #[test]
    fn test_profile_values_and_defaults() {
        let engine = PatternDataset::from_raw(small_dataset(), &PropertyFilter::all()).unwrap();
        let mut workset = engine.create_workset();

        let outcome = engine.detect(&mut workset, "(iPhone; CPU) Mobile/11D167");
        assert_eq!(outcome, MatchOutcome::exact(0));
        assert_eq!(engine.value(&workset, 0), "True");
        assert_eq!(engine.value(&workset, 1), "SmartPhone");

        // Desktop profile omits IsMobile, so the default shows through.
        engine.detect(&mut workset, "Windows NT 6.3");
        assert_eq!(engine.value(&workset, 0), "False");
        assert_eq!(engine.value(&workset, 1), "Desktop");
    }

    #[test]
    fn test_unmatched_resets_workset() {
        let engine = PatternDataset::from_raw(small_dataset(), &PropertyFilter::all()).unwrap();
        let mut workset = engine.create_workset();

        engine.detect(&mut workset, "iPhone Mobile/1");
        let outcome = engine.detect(&mut workset, "curl/8.0");
        assert_eq!(outcome.method, MatchMethod::None);
        assert_eq!(engine.value(&workset, 0), "False");
        assert_eq!(engine.value(&workset, 1), "Unknown");
    }
}
