//! Core data models for registry records, materials and search operations.

mod material;
mod record;
mod search;

pub use material::{Biomaterial, MaterialProperties, Price, TemperatureRange};
pub use record::{RecordProperties, RegistryRecord, RegistryRecordBuilder, NO_INFO};
pub use search::{MaterialFilter, PriceRange, SearchEnvelope, SearchQuery, DEFAULT_LIMIT};
