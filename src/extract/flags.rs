//! Marker-based property flag rules.
//!
//! A flag is set when its marker occurs verbatim in a record's description.
//! Matching is case-sensitive substring containment with no tokenizing, so
//! "생분해 불가" still sets the biodegradable flag.

use crate::models::RecordProperties;

/// A property flag a marker can set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyFlag {
    Biodegradable,
    Biocompatible,
    DistributionAvailable,
    ExportAvailable,
}

impl PropertyFlag {
    fn set(self, properties: &mut RecordProperties) {
        match self {
            PropertyFlag::Biodegradable => properties.biodegradable = true,
            PropertyFlag::Biocompatible => properties.biocompatible = true,
            PropertyFlag::DistributionAvailable => properties.distribution_available = true,
            PropertyFlag::ExportAvailable => properties.export_available = true,
        }
    }
}

/// Ordered table of `marker -> flag` rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagRules {
    rules: Vec<(String, PropertyFlag)>,
}

impl Default for FlagRules {
    fn default() -> Self {
        Self::empty()
            .rule("생분해", PropertyFlag::Biodegradable)
            .rule("생체적합", PropertyFlag::Biocompatible)
            .rule("분양가능", PropertyFlag::DistributionAvailable)
            .rule("국외반출가능", PropertyFlag::ExportAvailable)
    }
}

impl FlagRules {
    /// A table with no rules; every flag derives to false
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule
    pub fn rule(mut self, marker: impl Into<String>, flag: PropertyFlag) -> Self {
        self.rules.push((marker.into(), flag));
        self
    }

    /// Iterate the rules in insertion order
    pub fn rules(&self) -> impl Iterator<Item = (&str, PropertyFlag)> {
        self.rules.iter().map(|(m, f)| (m.as_str(), *f))
    }

    /// Derive all flags for a description
    pub fn derive(&self, description: &str) -> RecordProperties {
        let mut properties = RecordProperties::default();
        for (marker, flag) in &self.rules {
            if derive_flag(description, marker) {
                flag.set(&mut properties);
            }
        }
        properties
    }
}

/// True iff `marker` occurs in `description`
pub fn derive_flag(description: &str, marker: &str) -> bool {
    description.contains(marker)
}
