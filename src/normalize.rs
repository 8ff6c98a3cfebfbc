//! Conversion of registry records into [`Biomaterial`]s.

use chrono::{DateTime, Utc};

use crate::models::{Biomaterial, MaterialProperties, Price, RegistryRecord};

/// Supplier listed for every registry material
pub const REGISTRY_SUPPLIER: &str = "BioOne 연계기관";

/// Image shown for materials that have none of their own
pub const PLACEHOLDER_IMAGE: &str = "/images/biomaterial-placeholder.jpg";

/// Registry samples carry no price; this one stands in
pub fn registry_price() -> Price {
    Price::new(0.0, "per sample", "KRW")
}

/// Convert a registry record, stamping it with the current time
pub fn normalize_record(record: &RegistryRecord) -> Biomaterial {
    normalize_record_at(record, Utc::now())
}

/// Convert a registry record using `now` for both timestamps.
///
/// Never fails: every field is either copied from the record or one of the
/// fixed registry defaults.
pub fn normalize_record_at(record: &RegistryRecord, now: DateTime<Utc>) -> Biomaterial {
    Biomaterial {
        id: record.id.clone(),
        name: record.name.clone(),
        category: record.category.clone(),
        subcategory: record.resource_type.clone(),
        description: record.description.clone(),
        properties: MaterialProperties::flags(
            record.properties.biodegradable,
            record.properties.biocompatible,
        ),
        applications: record.applications.clone(),
        suppliers: vec![REGISTRY_SUPPLIER.to_string()],
        certification: Vec::new(),
        image_url: Some(PLACEHOLDER_IMAGE.to_string()),
        data_sheet: None,
        price: Some(registry_price()),
        in_stock: record.properties.distribution_available,
        created_at: now,
        updated_at: now,
    }
}
