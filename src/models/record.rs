//! Registry record model representing one hit scraped from the external registry.

use serde::{Deserialize, Serialize};

/// Placeholder used when a registry field is missing from the markup
pub const NO_INFO: &str = "정보 없음";

/// Boolean attributes derived from a record's description text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordProperties {
    pub biodegradable: bool,
    pub biocompatible: bool,
    pub distribution_available: bool,
    pub export_available: bool,
}

/// A material record extracted from a registry search page
///
/// Records are built once by the extractor and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryRecord {
    /// Identifier (content hash of name and detail URL)
    pub id: String,

    /// Material name
    pub name: String,

    /// Free-form description ("label: value, label: value")
    pub description: String,

    /// Category label
    pub category: String,

    /// Material cluster label
    pub cluster: String,

    /// Resource type label
    pub resource_type: String,

    /// Application tags
    pub applications: Vec<String>,

    /// Heuristic property flags
    pub properties: RecordProperties,

    /// Name of the registry the record came from
    pub source: String,

    /// Detail page URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl RegistryRecord {
    /// Create a new record with required fields
    pub fn new(id: String, name: String, description: String, source: String) -> Self {
        Self {
            id,
            name,
            description,
            category: NO_INFO.to_string(),
            cluster: NO_INFO.to_string(),
            resource_type: NO_INFO.to_string(),
            applications: Vec::new(),
            properties: RecordProperties::default(),
            source,
            url: None,
        }
    }
}

/// Builder for constructing RegistryRecord objects
#[derive(Debug, Clone)]
pub struct RegistryRecordBuilder {
    record: RegistryRecord,
}

impl RegistryRecordBuilder {
    /// Create a new builder with required fields
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            record: RegistryRecord::new(id.into(), name.into(), description.into(), source.into()),
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.record.category = category.into();
        self
    }

    pub fn cluster(mut self, cluster: impl Into<String>) -> Self {
        self.record.cluster = cluster.into();
        self
    }

    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.record.resource_type = resource_type.into();
        self
    }

    pub fn applications(mut self, applications: Vec<String>) -> Self {
        self.record.applications = applications;
        self
    }

    pub fn properties(mut self, properties: RecordProperties) -> Self {
        self.record.properties = properties;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.record.url = Some(url.into());
        self
    }

    /// Build the RegistryRecord
    pub fn build(self) -> RegistryRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = RegistryRecordBuilder::new("bioone-1", "대장균 K-12", "소재클러스터: 미생물", "BioOne")
            .category("미생물")
            .cluster("미생물")
            .resource_type("균주")
            .applications(vec!["미생물".to_string(), "균주".to_string()])
            .url("https://www.bioone.re.kr/view/1")
            .build();

        assert_eq!(record.name, "대장균 K-12");
        assert_eq!(record.cluster, "미생물");
        assert_eq!(record.applications.len(), 2);
        assert_eq!(record.url.as_deref(), Some("https://www.bioone.re.kr/view/1"));
    }

    #[test]
    fn test_record_defaults_to_no_info() {
        let record = RegistryRecord::new(
            "id".to_string(),
            "name".to_string(),
            "desc".to_string(),
            "BioOne".to_string(),
        );
        assert_eq!(record.category, NO_INFO);
        assert_eq!(record.resource_type, NO_INFO);
        assert!(record.url.is_none());
    }

    #[test]
    fn test_record_json_field_names() {
        let record = RegistryRecordBuilder::new("id", "name", "desc", "BioOne")
            .properties(RecordProperties {
                distribution_available: true,
                ..Default::default()
            })
            .build();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["resourceType"], NO_INFO);
        assert_eq!(json["properties"]["distributionAvailable"], true);
        assert_eq!(json["properties"]["exportAvailable"], false);
        assert!(json.get("url").is_none());
    }
}
