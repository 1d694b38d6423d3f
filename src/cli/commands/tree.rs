use crate::bio::taxonomy::TaxonId;
use crate::cli::output::*;
use crate::core::config::Config;
use crate::core::tree_builder::build_request_tree;
use crate::error::TaxonResult;
use crate::report::{render, OutputFormat, ReportOptions, TaxonReport};
use crate::wikidata::{EntityResolver, ResolvedTaxon, WikidataClient};
use anyhow::Context;
use clap::Args;
use indicatif::ProgressBar;
use std::cell::Cell;
use std::path::PathBuf;

#[derive(Args)]
pub struct TreeArgs {
    /// Wikidata item id of the taxon (e.g. Q146)
    #[arg(value_name = "ITEM_ID")]
    pub item_id: String,

    /// Output format (defaults to the output file extension, then the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the rendered tree to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Do not print item ids next to taxon names
    #[arg(long)]
    pub no_ids: bool,

    /// Do not show the lookup spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Wikidata API endpoint (for testing/mirrors)
    #[arg(long, value_name = "URL", hide = true)]
    pub api_url: Option<String>,
}

/// Forwards lookups while keeping the spinner message current
struct ProgressResolver<'a, R: ?Sized> {
    inner: &'a R,
    spinner: Option<&'a ProgressBar>,
    lookups: Cell<usize>,
}

impl<'a, R: EntityResolver + ?Sized> ProgressResolver<'a, R> {
    fn new(inner: &'a R, spinner: Option<&'a ProgressBar>) -> Self {
        Self {
            inner,
            spinner,
            lookups: Cell::new(0),
        }
    }
}

impl<R: EntityResolver + ?Sized> EntityResolver for ProgressResolver<'_, R> {
    fn resolve(&self, id: &TaxonId) -> TaxonResult<ResolvedTaxon> {
        let lookups = self.lookups.get() + 1;
        self.lookups.set(lookups);
        if let Some(pb) = self.spinner {
            pb.set_message(format!("Resolving {} ({} taxa so far)", id, lookups));
        }
        self.inner.resolve(id)
    }
}

/// `--format`, then the output file extension, then `[output].format`
pub fn output_format(args: &TreeArgs, config: &Config) -> OutputFormat {
    args.format
        .or_else(|| args.output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or(config.output.format)
}

pub fn run(args: TreeArgs, config: &Config) -> anyhow::Result<()> {
    let mut wikidata = config.wikidata.clone();
    if let Some(api_url) = &args.api_url {
        wikidata.api_url = api_url.clone();
    }

    let client = WikidataClient::new(&wikidata)?;
    let id = TaxonId::new(args.item_id.as_str());

    let spinner = if args.quiet {
        None
    } else {
        Some(create_spinner(&format!("Resolving {}", id))?)
    };
    let resolver = ProgressResolver::new(&client, spinner.as_ref());
    let result = build_request_tree(&resolver, &id);
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let outcome = result?;

    let truncated = outcome.tree.truncated_count();
    if truncated > 0 {
        warning(&format!(
            "{} branch(es) cut short because a taxon is listed as its own ancestor",
            truncated
        ));
    }

    let report = TaxonReport::new(&outcome, &wikidata.entity_url);
    let options = ReportOptions {
        format: output_format(&args, config),
        show_ids: config.output.show_ids && !args.no_ids,
    };
    let rendered = render(&report, &options)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            success(&format!(
                "Wrote {} ({} taxa looked up)",
                path.display(),
                outcome.cache.len()
            ));
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wikidata::MockEntityResolver;
    use rstest::rstest;

    fn tree_args(format: Option<OutputFormat>, output: Option<&str>) -> TreeArgs {
        TreeArgs {
            item_id: "Q146".to_string(),
            format,
            output: output.map(PathBuf::from),
            no_ids: false,
            quiet: true,
            api_url: None,
        }
    }

    fn config_with(format: OutputFormat) -> Config {
        let mut config = Config::default();
        config.output.format = format;
        config
    }

    #[rstest]
    #[case::flag_beats_extension(Some(OutputFormat::Text), Some("cat.html"), OutputFormat::Json, OutputFormat::Text)]
    #[case::extension_beats_config(None, Some("cat.html"), OutputFormat::Json, OutputFormat::Html)]
    #[case::unknown_extension_uses_config(None, Some("cat.out"), OutputFormat::Json, OutputFormat::Json)]
    #[case::stdout_uses_config(None, None, OutputFormat::Html, OutputFormat::Html)]
    fn test_output_format_precedence(
        #[case] flag: Option<OutputFormat>,
        #[case] output: Option<&str>,
        #[case] configured: OutputFormat,
        #[case] expected: OutputFormat,
    ) {
        let args = tree_args(flag, output);
        assert_eq!(output_format(&args, &config_with(configured)), expected);
    }

    #[test]
    fn test_progress_resolver_counts_and_forwards() {
        let mut mock = MockEntityResolver::new();
        mock.expect_resolve()
            .times(2)
            .returning(|id| Ok(ResolvedTaxon::new(id.to_string(), vec![])));

        let resolver = ProgressResolver::new(&mock, None);
        let first = resolver.resolve(&TaxonId::from("Q1")).unwrap();
        resolver.resolve(&TaxonId::from("Q2")).unwrap();

        assert_eq!(first.name, "Q1");
        assert_eq!(resolver.lookups.get(), 2);
    }
}
