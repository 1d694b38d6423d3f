/// Blocking Wikidata API client
use crate::bio::taxonomy::TaxonId;
use crate::core::config::WikidataConfig;
use crate::error::{LookupFailure, TaxonResult, TaxonTreeError};
use crate::wikidata::entity::{parse_entity_response, ClaimProperties, TaxonEntity};
use crate::wikidata::{EntityResolver, ResolvedTaxon};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Resolves taxa with one `wbgetentities` request per identifier
pub struct WikidataClient {
    api_url: Url,
    properties: ClaimProperties,
    client: reqwest::blocking::Client,
}

impl WikidataClient {
    /// Create a client from the `[wikidata]` configuration section
    pub fn new(config: &WikidataConfig) -> TaxonResult<Self> {
        let api_url = Url::parse(&config.api_url).map_err(|e| {
            TaxonTreeError::Configuration(format!("Invalid api_url '{}': {}", config.api_url, e))
        })?;

        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| {
                TaxonTreeError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            api_url,
            properties: config.claim_properties(),
            client,
        })
    }

    /// URL of the `wbgetentities` request for one identifier
    pub fn request_url(&self, id: &TaxonId) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("action", "wbgetentities")
            .append_pair("ids", id.as_str())
            .append_pair("props", "claims")
            .append_pair("format", "json");
        url
    }

    /// Fetch and parse a single entity, without applying parent selection
    pub fn fetch_entity(&self, id: &TaxonId) -> TaxonResult<TaxonEntity> {
        let url = self.request_url(id);
        debug!(%id, %url, "Fetching entity");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TaxonTreeError::lookup(id, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TaxonTreeError::lookup(id, LookupFailure::Status(status.as_u16())));
        }

        let body = response.text().map_err(|e| TaxonTreeError::lookup(id, e))?;
        parse_entity_response(&body, id, &self.properties).map_err(|e| TaxonTreeError::lookup(id, e))
    }
}

impl EntityResolver for WikidataClient {
    fn resolve(&self, id: &TaxonId) -> TaxonResult<ResolvedTaxon> {
        let resolved = self.fetch_entity(id)?.into_resolved();
        debug!(%id, name = %resolved.name, parents = resolved.parents.len(), "Resolved taxon");
        Ok(resolved)
    }
}
