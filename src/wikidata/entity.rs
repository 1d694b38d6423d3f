//! Parsing of `wbgetentities` responses and parent selection
use crate::bio::taxonomy::{ParentLink, SnakType, StatementRank, TaxonId, TaxonName};
use crate::error::LookupFailure;
use crate::wikidata::ResolvedTaxon;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Wikidata property "taxon name"
pub const TAXON_NAME_PROPERTY: &str = "P225";
/// Wikidata property "parent taxon"
pub const PARENT_TAXON_PROPERTY: &str = "P171";

/// Property ids read from each entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimProperties {
    pub taxon_name: String,
    pub parent_taxon: String,
}

impl Default for ClaimProperties {
    fn default() -> Self {
        Self {
            taxon_name: TAXON_NAME_PROPERTY.to_string(),
            parent_taxon: PARENT_TAXON_PROPERTY.to_string(),
        }
    }
}

/// Everything taken from one entity before parent selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonEntity {
    pub id: TaxonId,
    /// Value of the first taxon-name statement, if it has one
    pub name: Option<String>,
    /// All parent-taxon statements in claim order
    pub parent_links: Vec<ParentLink>,
}

impl TaxonEntity {
    pub fn display_name(&self) -> TaxonName {
        self.name.clone().unwrap_or_else(|| self.id.to_string())
    }

    pub fn selected_parents(&self) -> Vec<TaxonId> {
        select_parents(&self.parent_links)
    }

    pub fn into_resolved(self) -> ResolvedTaxon {
        let parents = self.selected_parents();
        ResolvedTaxon {
            name: self.display_name(),
            parents,
        }
    }
}

#[derive(Deserialize)]
struct GetEntitiesResponse {
    #[serde(default)]
    entities: Option<HashMap<String, Value>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Deserialize)]
struct Statement {
    rank: StatementRank,
    mainsnak: Snak,
}

#[derive(Deserialize)]
struct Snak {
    snaktype: SnakType,
    #[serde(default)]
    datavalue: Option<Value>,
}

/// Parse a raw `wbgetentities` body and pick out the entity for `id`
pub fn parse_entity_response(
    body: &str,
    id: &TaxonId,
    properties: &ClaimProperties,
) -> Result<TaxonEntity, LookupFailure> {
    let response: GetEntitiesResponse = serde_json::from_str(body)
        .map_err(|e| LookupFailure::Malformed(format!("invalid JSON: {}", e)))?;

    if let Some(error) = response.error {
        return Err(LookupFailure::Api {
            code: error.code,
            info: error.info,
        });
    }

    let entities = response
        .entities
        .ok_or_else(|| LookupFailure::Malformed("no `entities` object".to_string()))?;
    let entity = entities.get(id.as_str()).ok_or(LookupFailure::MissingEntity)?;

    parse_entity(entity, id, properties)
}

/// Extract the taxon name and parent links from one entity object
pub fn parse_entity(
    entity: &Value,
    id: &TaxonId,
    properties: &ClaimProperties,
) -> Result<TaxonEntity, LookupFailure> {
    let object = entity
        .as_object()
        .ok_or_else(|| LookupFailure::Malformed("entity is not an object".to_string()))?;

    if object.contains_key("missing") {
        return Err(LookupFailure::MissingEntity);
    }

    let claims = match object.get("claims") {
        Some(Value::Object(claims)) => Some(claims),
        // PHP serializes an empty claim map as an empty list
        Some(Value::Array(items)) if items.is_empty() => None,
        Some(_) => {
            return Err(LookupFailure::Malformed(
                "`claims` is not an object".to_string(),
            ))
        }
        None => return Err(LookupFailure::Malformed("entity has no `claims`".to_string())),
    };

    let name = claims
        .and_then(|c| c.get(&properties.taxon_name))
        .and_then(first_string_value);

    let parent_links = match claims.and_then(|c| c.get(&properties.parent_taxon)) {
        Some(statements) => parse_parent_links(statements)?,
        None => Vec::new(),
    };

    Ok(TaxonEntity {
        id: id.clone(),
        name,
        parent_links,
    })
}

fn first_string_value(statements: &Value) -> Option<String> {
    statements
        .get(0)?
        .get("mainsnak")?
        .get("datavalue")?
        .get("value")?
        .as_str()
        .map(str::to_string)
}

fn parse_parent_links(statements: &Value) -> Result<Vec<ParentLink>, LookupFailure> {
    let statements = Vec::<Statement>::deserialize(statements)
        .map_err(|e| LookupFailure::Malformed(format!("bad parent taxon statement: {}", e)))?;

    statements
        .into_iter()
        .map(|statement| {
            let Statement { rank, mainsnak } = statement;
            if mainsnak.snaktype != SnakType::Value {
                return Ok(ParentLink::without_value(mainsnak.snaktype, rank));
            }
            let target = mainsnak
                .datavalue
                .as_ref()
                .and_then(|datavalue| datavalue.get("value"))
                .and_then(item_id);
            match target {
                Some(target) => Ok(ParentLink::value(target, rank)),
                // Only ranks the selection policy can pick need a usable target
                None if rank.is_selectable() => Err(LookupFailure::Malformed(
                    "parent taxon value has no item id".to_string(),
                )),
                None => Ok(ParentLink {
                    target: None,
                    rank,
                    snak_type: SnakType::Value,
                }),
            }
        })
        .collect()
}

fn item_id(value: &Value) -> Option<TaxonId> {
    if let Some(id) = value.get("id").and_then(Value::as_str) {
        return Some(TaxonId::from(id));
    }
    // Older serializations only carry the numeric id
    value
        .get("numeric-id")
        .and_then(Value::as_u64)
        .map(|n| TaxonId::new(format!("Q{}", n)))
}

/// Rank whose statements supply the parents: preferred when any
/// preferred-rank statement has a concrete value, normal otherwise
pub fn winning_rank(links: &[ParentLink]) -> StatementRank {
    let has_preferred = links
        .iter()
        .any(|link| link.is_selected(StatementRank::Preferred));
    if has_preferred {
        StatementRank::Preferred
    } else {
        StatementRank::Normal
    }
}

/// Preferred-rank targets if there are any, otherwise normal-rank targets
///
/// Claim order is kept. Statements without a concrete value and statements
/// of any other rank never contribute.
pub fn select_parents(links: &[ParentLink]) -> Vec<TaxonId> {
    let rank = winning_rank(links);
    links
        .iter()
        .filter(|link| link.is_selected(rank))
        .filter_map(ParentLink::value_target)
        .cloned()
        .collect()
}
