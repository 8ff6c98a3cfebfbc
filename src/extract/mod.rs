//! HTML extraction of registry records.
//!
//! [`MarkupExtractor`] turns a registry search page into [`RegistryRecord`]s
//! in two passes:
//!
//! 1. **Primary** - `ul.search_list > li` result cards, with the name taken
//!    from `div.cont_box > a.go_view` and a label/value list read from
//!    `ul.info_list > li` (`span.tit` / `span.dat`).
//! 2. **Fallback** - only when the primary pass finds nothing. Generic
//!    `li`, `tr`, `div.item` and `div.result` nodes are kept when their text
//!    is long enough and mentions the query.
//!
//! Property flags for every record come from [`FlagRules`].

mod flags;

pub use flags::{derive_flag, FlagRules, PropertyFlag};

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use sha2::{Digest, Sha256};

use crate::models::{RegistryRecord, RegistryRecordBuilder, NO_INFO};
use crate::sources::SourceError;

/// Label holding the material cluster in the info list
pub const CLUSTER_LABEL: &str = "소재클러스터";

/// Label holding the resource type in the info list
pub const RESOURCE_TYPE_LABEL: &str = "자원종류";

/// Description used when a result card has no label/value pairs
pub const EMPTY_DESCRIPTION: &str = "자세한 정보는 링크를 확인하세요.";

/// Fallback nodes need strictly more characters than this
pub const FALLBACK_MIN_TEXT_LEN: usize = 20;

/// Fallback record names are cut to this many characters
pub const FALLBACK_NAME_LEN: usize = 100;

const CONTAINER_CSS: &str = "ul.search_list > li";
const NAME_CSS: &str = "div.cont_box > a.go_view";
const INFO_ITEM_CSS: &str = "ul.info_list > li";
const INFO_LABEL_CSS: &str = "span.tit";
const INFO_VALUE_CSS: &str = "span.dat";
const TOTAL_CSS: &str = "div.search_result_box > p.total > span";
const FALLBACK_CSS: &str = "li, tr, div.item, div.result";

static COUNT_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\s*(\d+)").ok());

/// Which extraction pass produced the records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPass {
    Primary,
    Fallback,
}

/// Records found in one document plus the total-count estimate
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<RegistryRecord>,
    /// Count parsed from the page, or `records.len()` when the page has none
    pub total: usize,
    pub pass: ExtractionPass,
}

#[derive(Debug, Clone)]
struct Selectors {
    container: Selector,
    name: Selector,
    info_item: Selector,
    info_label: Selector,
    info_value: Selector,
    total: Selector,
    fallback: Selector,
}

impl Selectors {
    fn new() -> Result<Self, SourceError> {
        Ok(Self {
            container: parse_selector(CONTAINER_CSS)?,
            name: parse_selector(NAME_CSS)?,
            info_item: parse_selector(INFO_ITEM_CSS)?,
            info_label: parse_selector(INFO_LABEL_CSS)?,
            info_value: parse_selector(INFO_VALUE_CSS)?,
            total: parse_selector(TOTAL_CSS)?,
            fallback: parse_selector(FALLBACK_CSS)?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css)
        .map_err(|e| SourceError::Parse(format!("Invalid selector '{}': {}", css, e)))
}

/// Extracts registry records from search result markup
#[derive(Debug, Clone)]
pub struct MarkupExtractor {
    base_url: String,
    source_name: String,
    flags: FlagRules,
    selectors: Selectors,
}

impl MarkupExtractor {
    /// Create an extractor resolving detail links against `base_url`
    pub fn new(base_url: impl Into<String>, source_name: impl Into<String>) -> Result<Self, SourceError> {
        Ok(Self {
            base_url: base_url.into(),
            source_name: source_name.into(),
            flags: FlagRules::default(),
            selectors: Selectors::new()?,
        })
    }

    /// Replace the property flag rules
    pub fn with_flag_rules(mut self, flags: FlagRules) -> Self {
        self.flags = flags;
        self
    }

    pub fn flag_rules(&self) -> &FlagRules {
        &self.flags
    }

    /// Extract records from `html`.
    ///
    /// `query` drives the fallback keyword check and `search_url` is used as
    /// the record URL when a card has no detail link.
    pub fn extract(&self, html: &str, query: &str, search_url: &str) -> Extraction {
        let document = Html::parse_document(html);

        let mut records = self.primary_pass(&document, search_url);
        let mut pass = ExtractionPass::Primary;

        if records.is_empty() {
            records = self.fallback_pass(&document, query, search_url);
            pass = ExtractionPass::Fallback;
            tracing::debug!(
                found = records.len(),
                "Primary selectors matched nothing, used fallback pass"
            );
        }

        let total = self.parse_total(&document).unwrap_or(records.len());

        Extraction {
            records,
            total,
            pass,
        }
    }

    fn primary_pass(&self, document: &Html, search_url: &str) -> Vec<RegistryRecord> {
        document
            .select(&self.selectors.container)
            .enumerate()
            .filter_map(|(index, container)| {
                let record = self.parse_container(&container, index, search_url);
                if record.is_none() {
                    tracing::debug!(index, "Skipping result card without a name");
                }
                record
            })
            .collect()
    }

    /// Parse one result card; `None` when the card has no name
    fn parse_container(
        &self,
        container: &ElementRef,
        index: usize,
        search_url: &str,
    ) -> Option<RegistryRecord> {
        let anchor = container.select(&self.selectors.name).next();
        let name = anchor.map(|a| element_text(&a)).unwrap_or_default();
        if name.is_empty() {
            return None;
        }

        let details = self.parse_details(container);
        let lookup = |label: &str| {
            details
                .iter()
                .find(|(k, _)| k == label)
                .map(|(_, v)| v.clone())
                .unwrap_or_else(|| NO_INFO.to_string())
        };
        let cluster = lookup(CLUSTER_LABEL);
        let resource_type = lookup(RESOURCE_TYPE_LABEL);

        let joined = details
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        let properties = self.flags.derive(&joined);
        let description = if joined.is_empty() {
            EMPTY_DESCRIPTION.to_string()
        } else {
            joined
        };

        let url = anchor
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(|href| self.resolve_url(href))
            .unwrap_or_else(|| search_url.to_string());

        let mut applications: Vec<String> = Vec::new();
        for tag in [&cluster, &resource_type] {
            if tag != NO_INFO && !applications.contains(tag) {
                applications.push(tag.clone());
            }
        }

        let id = record_id(&name, &description, &url, index);
        Some(
            RegistryRecordBuilder::new(id, name, description, &self.source_name)
                .category(cluster.clone())
                .cluster(cluster)
                .resource_type(resource_type)
                .applications(applications)
                .properties(properties)
                .url(url)
                .build(),
        )
    }

    /// Label/value pairs in document order; later duplicates replace earlier values
    fn parse_details(&self, container: &ElementRef) -> Vec<(String, String)> {
        let mut details: Vec<(String, String)> = Vec::new();
        for item in container.select(&self.selectors.info_item) {
            let label = item
                .select(&self.selectors.info_label)
                .next()
                .map(|e| element_text(&e))
                .unwrap_or_default();
            let value = item
                .select(&self.selectors.info_value)
                .next()
                .map(|e| element_text(&e))
                .unwrap_or_default();
            if label.is_empty() || value.is_empty() {
                continue;
            }
            match details.iter_mut().find(|(k, _)| *k == label) {
                Some(entry) => entry.1 = value,
                None => details.push((label, value)),
            }
        }
        details
    }

    fn fallback_pass(&self, document: &Html, query: &str, search_url: &str) -> Vec<RegistryRecord> {
        let needle = query.to_lowercase();

        document
            .select(&self.selectors.fallback)
            .enumerate()
            .filter_map(|(index, node)| {
                let text = collapse_whitespace(&node.text().collect::<Vec<_>>().join(" "));
                if text.chars().count() <= FALLBACK_MIN_TEXT_LEN
                    || !text.to_lowercase().contains(&needle)
                {
                    return None;
                }

                let name: String = text.chars().take(FALLBACK_NAME_LEN).collect();
                let properties = self.flags.derive(&text);
                let id = record_id(&name, &text, search_url, index);
                Some(
                    RegistryRecordBuilder::new(id, name, text, &self.source_name)
                        .properties(properties)
                        .url(search_url)
                        .build(),
                )
            })
            .collect()
    }

    fn parse_total(&self, document: &Html) -> Option<usize> {
        let text = document
            .select(&self.selectors.total)
            .next()
            .map(|e| element_text(&e))?;
        parse_count(&text)
    }

    fn resolve_url(&self, href: &str) -> String {
        url::Url::parse(&self.base_url)
            .and_then(|base| base.join(href))
            .map(|u| u.to_string())
            .unwrap_or_else(|_| format!("{}{}", self.base_url, href))
    }
}

/// Parse a displayed count such as "1,234" or "1,234건"
pub fn parse_count(text: &str) -> Option<usize> {
    let cleaned = text.replace(',', "");
    COUNT_RE.as_ref()?.captures(&cleaned)?.get(1)?.as_str().parse().ok()
}

/// Stable identifier derived from record content and its position on the page
fn record_id(name: &str, description: &str, url: &str, index: usize) -> String {
    let mut hasher = Sha256::new();
    for part in [name, description, url] {
        hasher.update(part.as_bytes());
        hasher.update(b"\n");
    }
    hasher.update(index.to_le_bytes());
    let digest = format!("{:x}", hasher.finalize());
    format!("bioone-{}", &digest[..16])
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
