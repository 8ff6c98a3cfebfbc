//! In-memory faceted filtering over biomaterials.

use serde::{Deserialize, Serialize};

use crate::models::{Biomaterial, MaterialFilter};

/// Keep the materials matching every set dimension of `filter`, in order
pub fn filter_materials(materials: &[Biomaterial], filter: &MaterialFilter) -> Vec<Biomaterial> {
    materials
        .iter()
        .filter(|m| matches(m, filter))
        .cloned()
        .collect()
}

/// Whether one material satisfies `filter`
pub fn matches(material: &Biomaterial, filter: &MaterialFilter) -> bool {
    if let Some(query) = filter.query.as_deref().filter(|q| !q.is_empty()) {
        if !matches_query(material, &query.to_lowercase()) {
            return false;
        }
    }

    if let Some(category) = &filter.category {
        if &material.category != category {
            return false;
        }
    }

    if let Some(subcategory) = &filter.subcategory {
        if &material.subcategory != subcategory {
            return false;
        }
    }

    if let Some(biodegradable) = filter.biodegradable {
        if material.properties.biodegradable != biodegradable {
            return false;
        }
    }

    if filter.biocompatible && !material.properties.biocompatible {
        return false;
    }

    if filter.in_stock && !material.in_stock {
        return false;
    }

    if !filter.applications.is_empty() && !material.has_any_application(&filter.applications) {
        return false;
    }

    if let Some(range) = filter.price_range {
        match &material.price {
            Some(price) if range.contains(price.amount) => {}
            _ => return false,
        }
    }

    true
}

/// `needle` must already be lowercase
fn matches_query(material: &Biomaterial, needle: &str) -> bool {
    material.name.to_lowercase().contains(needle)
        || material.description.to_lowercase().contains(needle)
        || material.category.to_lowercase().contains(needle)
        || material.subcategory.to_lowercase().contains(needle)
        || material
            .applications
            .iter()
            .any(|a| a.to_lowercase().contains(needle))
}

/// Facet values and summary counts for a result list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub categories: Vec<String>,
    pub subcategories: Vec<String>,
    pub applications: Vec<String>,
    pub total: usize,
    pub biocompatible: usize,
    pub biodegradable: usize,
}

impl Facets {
    /// Distinct values in first-seen order plus flag counts
    pub fn collect(materials: &[Biomaterial]) -> Self {
        let mut facets = Facets {
            total: materials.len(),
            ..Default::default()
        };

        for material in materials {
            push_unique(&mut facets.categories, &material.category);
            push_unique(&mut facets.subcategories, &material.subcategory);
            for application in &material.applications {
                push_unique(&mut facets.applications, application);
            }
            if material.properties.biocompatible {
                facets.biocompatible += 1;
            }
            if material.properties.biodegradable {
                facets.biodegradable += 1;
            }
        }

        facets
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_biomaterials;

    fn names(materials: &[Biomaterial]) -> Vec<&str> {
        materials.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_is_noop() {
        let catalog = sample_biomaterials();
        let result = filter_materials(&catalog, &MaterialFilter::default());
        assert_eq!(result, catalog);
    }

    #[test]
    fn test_query_pla_matches_single_material() {
        let catalog = sample_biomaterials();
        let result = filter_materials(&catalog, &MaterialFilter::new().query("PLA"));
        assert_eq!(names(&result), vec!["PLA (폴리락트산)"]);
    }

    #[test]
    fn test_query_searches_applications_and_subcategory() {
        let catalog = sample_biomaterials();

        let by_application = filter_materials(&catalog, &MaterialFilter::new().query("백신"));
        assert_eq!(names(&by_application), vec!["HeLa 세포주", "CHO 세포주", "HEK293 세포주"]);

        let by_subcategory = filter_materials(&catalog, &MaterialFilter::new().query("다당류"));
        assert_eq!(names(&by_subcategory), vec!["키토산"]);
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let catalog = sample_biomaterials();
        let upper = filter_materials(&catalog, &MaterialFilter::new().query("BACILLUS"));
        let lower = filter_materials(&catalog, &MaterialFilter::new().query("bacillus"));
        assert_eq!(upper.len(), 1);
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_empty_query_is_skipped() {
        let catalog = sample_biomaterials();
        let result = filter_materials(&catalog, &MaterialFilter::new().query(""));
        assert_eq!(result.len(), catalog.len());
    }

    #[test]
    fn test_unknown_category_yields_nothing() {
        let catalog = sample_biomaterials();
        let result = filter_materials(&catalog, &MaterialFilter::new().category("존재하지 않는 분류"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_category_and_subcategory() {
        let catalog = sample_biomaterials();
        let cells = filter_materials(&catalog, &MaterialFilter::new().category("배양세포주"));
        assert_eq!(cells.len(), 4);

        let stem = filter_materials(
            &catalog,
            &MaterialFilter::new().category("배양세포주").subcategory("줄기세포"),
        );
        assert_eq!(names(&stem), vec!["iPSC (유도만능줄기세포)"]);
    }

    #[test]
    fn test_biodegradable_tri_state() {
        let catalog = sample_biomaterials();
        let yes = filter_materials(&catalog, &MaterialFilter::new().biodegradable(true));
        let no = filter_materials(&catalog, &MaterialFilter::new().biodegradable(false));
        assert_eq!(yes.len() + no.len(), catalog.len());
        assert!(yes.iter().all(|m| m.properties.biodegradable));
        assert!(no.iter().all(|m| !m.properties.biodegradable));
    }

    #[test]
    fn test_in_stock_and_biocompatible() {
        let catalog = sample_biomaterials();
        let result = filter_materials(&catalog, &MaterialFilter::new().in_stock(true).biocompatible(true));
        assert_eq!(result.len(), 9);
        assert!(result.iter().all(|m| m.in_stock));
    }

    #[test]
    fn test_applications_any_of() {
        let catalog = sample_biomaterials();
        let filter = MaterialFilter::new().application("화장품").application("3D 프린팅");
        let result = filter_materials(&catalog, &filter);
        assert_eq!(names(&result), vec!["PLA (폴리락트산)", "콜라겐"]);
    }

    #[test]
    fn test_price_range() {
        let catalog = sample_biomaterials();
        let cheap = filter_materials(&catalog, &MaterialFilter::new().price_range(0.0, 12_000.0));
        assert_eq!(names(&cheap), vec!["PLA (폴리락트산)", "PCL (폴리카프로락톤)"]);

        let mut unpriced = catalog[0].clone();
        unpriced.price = None;
        assert!(!matches(&unpriced, &MaterialFilter::new().price_range(0.0, f64::MAX)));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = sample_biomaterials();
        let filter = MaterialFilter::new().query("세포").in_stock(true);
        let once = filter_materials(&catalog, &filter);
        let twice = filter_materials(&once, &filter);
        assert_eq!(once, twice);
        assert!(!once.is_empty());
    }

    #[test]
    fn test_facets() {
        let catalog = sample_biomaterials();
        let facets = Facets::collect(&catalog);
        assert_eq!(facets.total, 11);
        assert_eq!(facets.categories[0], "생분해성 플라스틱");
        assert_eq!(facets.categories.len(), 6);
        assert_eq!(facets.biocompatible, 11);
        assert_eq!(facets.biodegradable, 6);
        assert!(facets.applications.contains(&"조직공학".to_string()));

        assert_eq!(Facets::collect(&[]), Facets::default());
    }
}
