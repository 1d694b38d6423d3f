use crate::bio::taxonomy::{TaxonId, TaxonTree};
use crate::report::{ReportOptions, TaxonReport};
use anyhow::Result;
use std::fmt::Write;

/// Render the tree as an indented ASCII tree, the queried taxon first
pub fn render_text(report: &TaxonReport, options: &ReportOptions) -> Result<String> {
    let mut output = String::new();

    writeln!(&mut output, "{}", label(&report.taxon_name, &report.item_id, options))?;
    write_parents(&mut output, &report.tree, "", options)?;

    Ok(output)
}

fn write_parents(
    output: &mut String,
    tree: &TaxonTree,
    prefix: &str,
    options: &ReportOptions,
) -> std::fmt::Result {
    let count = tree.len();
    for (i, (name, entry)) in tree.iter().enumerate() {
        let is_last = i + 1 == count;
        let branch = if is_last { "└─ " } else { "├─ " };

        write!(output, "{}{}{}", prefix, branch, label(name, &entry.id, options))?;
        if entry.cycle_truncated {
            write!(output, " [cycle]")?;
        }
        writeln!(output)?;

        let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
        write_parents(output, &entry.subtree, &child_prefix, options)?;
    }
    Ok(())
}

fn label(name: &str, id: &TaxonId, options: &ReportOptions) -> String {
    if options.show_ids {
        format!("{} ({})", name, id)
    } else {
        name.to_string()
    }
}
