//! Biomaterial model, the application-facing shape shared by every data source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Working temperature range in °C
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

/// Physical and biological properties of a material
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialProperties {
    pub biodegradable: bool,
    pub biocompatible: bool,

    /// Tensile strength in MPa
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tensile_strength: Option<f64>,

    /// Elastic modulus in GPa
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elastic_modulus: Option<f64>,

    /// Degradation time, e.g. "3-6개월"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degradation_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<TemperatureRange>,
}

impl MaterialProperties {
    /// Properties with only the two biological flags set
    pub fn flags(biodegradable: bool, biocompatible: bool) -> Self {
        Self {
            biodegradable,
            biocompatible,
            ..Default::default()
        }
    }
}

/// Unit price of a material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    /// e.g. "kg당", "per sample"
    pub unit: String,
    pub currency: String,
}

impl Price {
    pub fn new(amount: f64, unit: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
            currency: currency.into(),
        }
    }
}

/// A biomaterial from any source
///
/// Catalog entries and converted registry records share this shape so the
/// filter and facet code never has to know where a material came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biomaterial {
    pub id: String,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub description: String,
    pub properties: MaterialProperties,
    pub applications: Vec<String>,
    pub suppliers: Vec<String>,
    pub certification: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_sheet: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,

    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Biomaterial {
    /// Whether any application tag equals one of `wanted`
    pub fn has_any_application(&self, wanted: &[String]) -> bool {
        wanted.iter().any(|w| self.applications.contains(w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(applications: &[&str]) -> Biomaterial {
        let now = Utc::now();
        Biomaterial {
            id: "1".to_string(),
            name: "PLA".to_string(),
            category: "생분해성 플라스틱".to_string(),
            subcategory: "열가소성 수지".to_string(),
            description: "생분해성 플라스틱".to_string(),
            properties: MaterialProperties::flags(true, true),
            applications: applications.iter().map(|s| s.to_string()).collect(),
            suppliers: Vec::new(),
            certification: Vec::new(),
            image_url: None,
            data_sheet: None,
            price: None,
            in_stock: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_has_any_application() {
        let m = material(&["3D 프린팅", "포장재"]);
        assert!(m.has_any_application(&["포장재".to_string()]));
        assert!(!m.has_any_application(&["화장품".to_string()]));
        assert!(!m.has_any_application(&[]));
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let json = serde_json::to_value(material(&[])).unwrap();
        assert!(json.get("price").is_none());
        assert!(json.get("imageUrl").is_none());
        assert!(json["properties"].get("tensileStrength").is_none());
        assert_eq!(json["inStock"], true);
    }
}
