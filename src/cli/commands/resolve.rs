use crate::bio::taxonomy::{ParentLink, TaxonId};
use crate::cli::output::*;
use crate::core::config::Config;
use crate::error::TaxonTreeError;
use crate::wikidata::{winning_rank, WikidataClient};
use clap::Args;
use colored::*;
use serde::Serialize;

#[derive(Args)]
pub struct ResolveArgs {
    /// Wikidata item id of the taxon (e.g. Q146)
    #[arg(value_name = "ITEM_ID")]
    pub item_id: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Wikidata API endpoint (for testing/mirrors)
    #[arg(long, value_name = "URL", hide = true)]
    pub api_url: Option<String>,
}

#[derive(Serialize)]
struct ResolveOutput<'a> {
    id: &'a TaxonId,
    name: String,
    name_claim_present: bool,
    selected_parents: Vec<TaxonId>,
    parent_links: &'a [ParentLink],
}

pub fn run(args: ResolveArgs, config: &Config) -> anyhow::Result<()> {
    let mut wikidata = config.wikidata.clone();
    if let Some(api_url) = &args.api_url {
        wikidata.api_url = api_url.clone();
    }

    let client = WikidataClient::new(&wikidata)?;
    let id = TaxonId::new(args.item_id.as_str());
    let entity = client.fetch_entity(&id)?;
    let selected = entity.selected_parents();

    if args.json {
        let output = ResolveOutput {
            id: &entity.id,
            name: entity.display_name(),
            name_claim_present: entity.name.is_some(),
            selected_parents: selected,
            parent_links: &entity.parent_links,
        };
        let rendered = serde_json::to_string_pretty(&output).map_err(TaxonTreeError::from)?;
        println!("{}", rendered);
        return Ok(());
    }

    section_header(&format!("{} ({})", entity.display_name(), entity.id));
    match &entity.name {
        Some(name) => tree_item(false, "Taxon name", Some(name.as_str())),
        None => {
            let fallback = "none, using item id".dimmed().to_string();
            tree_item(false, "Taxon name", Some(fallback.as_str()))
        }
    }
    tree_item(
        false,
        "Parent statements",
        Some(entity.parent_links.len().to_string().as_str()),
    );
    let selected_list = if selected.is_empty() {
        "none".to_string()
    } else {
        selected.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
    };
    tree_item(true, "Selected parents", Some(selected_list.as_str()));

    if entity.parent_links.is_empty() {
        info("No parent taxon statements: this is the top of the tree");
        return Ok(());
    }

    let mut table = create_standard_table();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Target"),
        header_cell("Rank"),
        header_cell("Snak type"),
        header_cell("Selected"),
    ]);

    let rank = winning_rank(&entity.parent_links);
    for (i, link) in entity.parent_links.iter().enumerate() {
        let target = link
            .target
            .as_ref()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        let is_selected = link.is_selected(rank);
        table.add_row(vec![
            (i + 1).to_string(),
            target,
            link.rank.to_string(),
            link.snak_type.to_string(),
            if is_selected { "yes".to_string() } else { String::new() },
        ]);
    }
    println!("{}", table);

    Ok(())
}
