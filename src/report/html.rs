/// HTML renderer for taxon ancestry trees
use crate::bio::taxonomy::{TaxonId, TaxonTree};
use crate::report::{ReportOptions, TaxonReport};
use anyhow::Result;
use std::fmt::Write;

/// Render a TaxonReport as a standalone HTML page
pub fn render_html(report: &TaxonReport, options: &ReportOptions) -> Result<String> {
    let mut html = String::new();
    let title = html_escape(&report.taxon_name);

    write!(
        &mut html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 1200px;
            margin: 0 auto;
            padding: 20px;
        }}
        ul.taxon-tree {{
            list-style: none;
            border-left: 1px solid #bdc3c7;
            padding-left: 1.2em;
        }}
        .taxon-id {{
            color: #7f8c8d;
            font-size: 0.9em;
        }}
        .cycle {{
            color: #c0392b;
            font-style: italic;
        }}
        footer {{
            margin-top: 30px;
            color: #95a5a6;
            font-size: 0.85em;
        }}
    </style>
</head>
<body>
<h1>{root}</h1>
"#,
        title = title,
        root = node_label(report, &report.taxon_name, &report.item_id, options),
    )?;

    write_tree(&mut html, report, &report.tree, options)?;

    writeln!(
        &mut html,
        "<footer>{} taxa looked up &middot; generated {}</footer>",
        report.lookups,
        html_escape(&report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    )?;
    html.push_str("</body>\n</html>\n");

    Ok(html)
}

fn write_tree(
    html: &mut String,
    report: &TaxonReport,
    tree: &TaxonTree,
    options: &ReportOptions,
) -> std::fmt::Result {
    if tree.is_empty() {
        return Ok(());
    }

    writeln!(html, "<ul class=\"taxon-tree\">")?;
    for (name, entry) in tree {
        write!(html, "<li>{}", node_label(report, name, &entry.id, options))?;
        if entry.cycle_truncated {
            write!(html, " <span class=\"cycle\">(cycle)</span>")?;
        }
        writeln!(html)?;
        write_tree(html, report, &entry.subtree, options)?;
        writeln!(html, "</li>")?;
    }
    writeln!(html, "</ul>")
}

fn node_label(report: &TaxonReport, name: &str, id: &TaxonId, options: &ReportOptions) -> String {
    let mut label = format!(
        "<a href=\"{}\"><bdi>{}</bdi></a>",
        html_escape(&report.entity_link(id)),
        html_escape(name)
    );
    if options.show_ids {
        label.push_str(&format!(
            " <span class=\"taxon-id\">({})</span>",
            html_escape(id.as_str())
        ));
    }
    label
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bio::taxonomy::ParentEntry;
    use chrono::Utc;
    use std::sync::Arc;

    fn report(name: &str, id: &str, tree: TaxonTree) -> TaxonReport {
        TaxonReport {
            taxon_name: name.to_string(),
            item_id: TaxonId::from(id),
            entity_url: "https://www.wikidata.org/wiki/".to_string(),
            generated_at: Utc::now(),
            lookups: 1,
            tree: Arc::new(tree),
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            html_escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_untrusted_names_and_ids_are_escaped() {
        let mut tree = TaxonTree::new();
        tree.insert(
            "<img src=x onerror=alert(1)>".to_string(),
            ParentEntry::new(TaxonId::from("Q1\"><b>"), Arc::new(TaxonTree::new())),
        );
        let html = render_html(
            &report("<i>Felis</i>", "Q146", tree),
            &ReportOptions::default(),
        )
        .unwrap();

        assert!(!html.contains("<img"));
        assert!(!html.contains("<i>Felis"));
        assert!(!html.contains("Q1\"><b>"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("<title>&lt;i&gt;Felis&lt;/i&gt;</title>"));
    }

    #[test]
    fn test_nested_lists_and_links() {
        let mut felis = TaxonTree::new();
        felis.insert(
            "Felis catus".to_string(),
            ParentEntry::cycle_truncated(TaxonId::from("Q146")),
        );
        let mut tree = TaxonTree::new();
        tree.insert(
            "Felis".to_string(),
            ParentEntry::new(TaxonId::from("Q147"), Arc::new(felis)),
        );

        let html = render_html(&report("Felis catus", "Q146", tree), &ReportOptions::default()).unwrap();

        assert_eq!(html.matches("<ul class=\"taxon-tree\">").count(), 2);
        assert!(html.contains("<a href=\"https://www.wikidata.org/wiki/Q147\"><bdi>Felis</bdi></a>"));
        assert!(html.contains("<span class=\"cycle\">(cycle)</span>"));
    }

    #[test]
    fn test_leaf_has_no_list() {
        let html = render_html(&report("Biota", "Q2382443", TaxonTree::new()), &ReportOptions::default()).unwrap();
        assert!(!html.contains("<ul"));
        assert!(html.contains("<h1><a href=\"https://www.wikidata.org/wiki/Q2382443\"><bdi>Biota</bdi></a>"));
    }
}
