//! BiblioCommons gateway client for the Carnegie Library of Pittsburgh catalog
//!
//! Uses the blocking reqwest client; one request is in flight at a time.

use crate::error::{CheckerError, Result};
use crate::models::{CatalogResult, AVAILABLE_STATUS};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER};
use serde::Deserialize;
use std::time::Duration;

/// Gateway base URL for the `acl` library
pub const GATEWAY_URL: &str = "https://gateway.bibliocommons.com/v2/libraries/acl";

/// Public catalog page for a bib, `{RECORD_URL}/{bib_id}`
pub const RECORD_URL: &str = "https://acl.bibliocommons.com/v2/record";

const CATALOG_ORIGIN: &str = "https://acl.bibliocommons.com";
const CATALOG_REFERER: &str = "https://acl.bibliocommons.com/";
// The gateway rejects requests that don't look like they come from the catalog site
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

pub const SEARCH_LIMIT: u32 = 10;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Facet id carrying per-branch availability counts
const STATUS_FIELD_ID: &str = "STATUS";

/// Search and availability lookups the checker needs from a catalog
pub trait Catalog {
    /// Search the catalog. Failures are logged and yield no results.
    fn search(&self, query: &str) -> Vec<CatalogResult>;

    /// Whether `branch` has a copy of the bib on the shelf right now
    fn branch_has_copy(&self, bib_id: &str, branch: &str) -> bool;
}

// ── Wire format ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct SearchResponse {
    entities: Option<SearchEntities>,
    catalog_search: Option<CatalogSearch>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SearchEntities {
    /// Kept as raw JSON so iteration follows the response's key order
    bibs: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Bib {
    brief_info: Option<BriefInfo>,
    availability: Option<BibAvailability>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BriefInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    format: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct BibAvailability {
    status: Option<String>,
    available_copies: Option<u32>,
    total_copies: Option<u32>,
    held_copies: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CatalogSearch {
    fields: Option<Vec<SearchField>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct SearchField {
    id: Option<String>,
    field_filters: Option<Vec<FieldFilter>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FieldFilter {
    value: Option<String>,
    label: Option<String>,
    count: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AvailabilityResponse {
    entities: Option<AvailabilityEntities>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct AvailabilityEntities {
    bib_items: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BibItem {
    branch: Option<ItemBranch>,
    availability: Option<ItemAvailability>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ItemBranch {
    name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ItemAvailability {
    status: Option<String>,
}

impl BibItem {
    fn on_shelf_at(&self, branch: &str) -> bool {
        let at_branch = self
            .branch
            .as_ref()
            .and_then(|b| b.name.as_deref())
            .is_some_and(|name| name == branch);
        let available = self
            .availability
            .as_ref()
            .and_then(|a| a.status.as_deref())
            .is_some_and(|status| status == AVAILABLE_STATUS);
        at_branch && available
    }
}

impl CatalogSearch {
    /// Branch labels with copies, from the STATUS facet of the whole response
    fn branch_labels(&self) -> Vec<String> {
        self.fields
            .iter()
            .flatten()
            .filter(|field| field.id.as_deref() == Some(STATUS_FIELD_ID))
            .flat_map(|field| field.field_filters.iter().flatten())
            .filter(|filter| filter.count.unwrap_or(0) > 0)
            .filter_map(|filter| {
                let value = filter.value.as_deref().unwrap_or_default();
                if value.starts_with('_') {
                    return None;
                }
                Some(filter.label.clone().unwrap_or_else(|| value.to_string()))
            })
            .collect()
    }
}

impl SearchResponse {
    fn into_results(self) -> Vec<CatalogResult> {
        // The search response has no per-bib branch data, so every result
        // carries the same response-wide list.
        let branches = self
            .catalog_search
            .map(|search| search.branch_labels())
            .unwrap_or_default();

        let bibs = self.entities.and_then(|e| e.bibs).unwrap_or_default();
        bibs.into_iter()
            .filter_map(|(bib_id, value)| match serde_json::from_value::<Bib>(value) {
                Ok(bib) => Some(bib.into_result(bib_id, branches.clone())),
                Err(e) => {
                    log::warn!("Skipping bib {} with unexpected shape: {}", bib_id, e);
                    None
                }
            })
            .collect()
    }
}

impl Bib {
    fn into_result(self, bib_id: String, branches: Vec<String>) -> CatalogResult {
        let catalog_url = record_url(&bib_id);
        let brief = self.brief_info.unwrap_or_default();
        let availability = self.availability.unwrap_or_default();
        CatalogResult {
            title: brief.title.unwrap_or_else(|| "Unknown".to_string()),
            author: brief.authors.unwrap_or_default().join(", "),
            format: brief.format.unwrap_or_else(|| "Unknown".to_string()),
            status: availability.status.unwrap_or_else(|| "Unknown".to_string()),
            available_copies: availability.available_copies.unwrap_or(0),
            total_copies: availability.total_copies.unwrap_or(0),
            held_copies: availability.held_copies.unwrap_or(0),
            branches,
            catalog_url,
            bib_id,
        }
    }
}

/// Public catalog page for a bib
pub fn record_url(bib_id: &str) -> String {
    format!("{}/{}", RECORD_URL, bib_id)
}

// ── Client ───────────────────────────────────────────────────────────

/// Blocking client for the catalog gateway
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl CatalogClient {
    /// Client for the live gateway
    pub fn new() -> Result<Self> {
        Self::with_base_url(GATEWAY_URL)
    }

    /// Client for the given gateway base URL (for testing with mock servers)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Client for the given gateway base URL with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ORIGIN, HeaderValue::from_static(CATALOG_ORIGIN));
        headers.insert(REFERER, HeaderValue::from_static(CATALOG_REFERER));

        let http = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search URL for a free-text or ISBN query
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/bibs/search?query={}&searchType=smart&limit={}&locale=en-US",
            self.base_url,
            urlencoding::encode(query),
            SEARCH_LIMIT
        )
    }

    /// Search the catalog, returning the error instead of swallowing it
    pub fn try_search(&self, query: &str) -> Result<Vec<CatalogResult>> {
        let url = self.search_url(query);
        log::debug!("Searching catalog: {}", url);

        let response = self.http.get(&url).send()?;
        if !response.status().is_success() {
            return Err(CheckerError::HttpStatus(response.status()));
        }

        let body: SearchResponse = serde_json::from_str(&response.text()?)?;
        let results = body.into_results();
        log::debug!("Catalog returned {} results for '{}'", results.len(), query);
        Ok(results)
    }

    /// Check the item list of one bib for a copy on the shelf at `branch`
    pub fn try_branch_has_copy(&self, bib_id: &str, branch: &str) -> Result<bool> {
        let url = format!(
            "{}/bibs/{}/availability?locale=en-US",
            self.base_url,
            urlencoding::encode(bib_id)
        );
        log::debug!("Fetching bib availability: {}", url);

        let response = self.http.get(&url).send()?;
        if !response.status().is_success() {
            return Err(CheckerError::HttpStatus(response.status()));
        }

        let body: AvailabilityResponse = serde_json::from_str(&response.text()?)?;
        let items = body.entities.and_then(|e| e.bib_items).unwrap_or_default();
        for (item_id, value) in items {
            match serde_json::from_value::<BibItem>(value) {
                Ok(item) if item.on_shelf_at(branch) => return Ok(true),
                Ok(_) => {}
                Err(e) => log::warn!("Skipping item {} of bib {}: {}", item_id, bib_id, e),
            }
        }
        Ok(false)
    }
}

impl Catalog for CatalogClient {
    fn search(&self, query: &str) -> Vec<CatalogResult> {
        match self.try_search(query) {
            Ok(results) => results,
            Err(e) => {
                log::warn!("Error searching for '{}': {}", query, e);
                Vec::new()
            }
        }
    }

    fn branch_has_copy(&self, bib_id: &str, branch: &str) -> bool {
        match self.try_branch_has_copy(bib_id, branch) {
            Ok(found) => found,
            Err(e) => {
                log::warn!(
                    "Error checking {} availability for bib {}: {}",
                    branch,
                    bib_id,
                    e
                );
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
