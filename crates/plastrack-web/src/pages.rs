//! Hand-built HTML views.
//!
//! Every piece of user-supplied text goes through [`escape_html`] before it
//! reaches a page.

use plastrack_common::escape_html;
use plastrack_graphs::UsageSummary;

const NAV: &str = r#"<nav><a href="/">Home</a> | <a href="/add">Add data</a> | <a href="/analyze">Analyze</a> | <a href="/plot">Plot trends</a></nav>"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n{NAV}\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n"
    )
}

/// Landing page.
pub fn index_page() -> String {
    layout(
        "Community Plastic Usage Tracker",
        "<p>Record how much plastic each community uses, then review totals and trends.</p>\n\
         <ul>\n\
         <li><a href=\"/add\">Add a measurement</a></li>\n\
         <li><a href=\"/analyze\">Analyze usage</a></li>\n\
         <li><a href=\"/plot\">Plot usage trends</a></li>\n\
         </ul>",
    )
}

/// Submission form posting back to `/add`.
pub fn add_page() -> String {
    layout(
        "Add Plastic Usage",
        "<form method=\"post\" action=\"/add\">\n\
         <label>Community <input type=\"text\" name=\"community\" required></label><br>\n\
         <label>Date <input type=\"date\" name=\"date\" required></label><br>\n\
         <label>Plastic used (kg) <input type=\"number\" step=\"any\" name=\"plastic_used_kg\" required></label><br>\n\
         <button type=\"submit\">Submit</button>\n\
         </form>",
    )
}

/// Total and monthly tables.
pub fn analyze_page(summary: &UsageSummary) -> String {
    let totals: String = summary
        .total_by_community
        .iter()
        .map(|(community, kg)| format!("<tr><td>{}</td><td>{kg}</td></tr>\n", escape_html(community)))
        .collect();
    let monthly: String = summary
        .monthly_rows()
        .map(|(community, month, kg)| {
            format!(
                "<tr><td>{}</td><td>{month}</td><td>{kg}</td></tr>\n",
                escape_html(community)
            )
        })
        .collect();

    let body = format!(
        "<h2>Total usage by community</h2>\n<table>\n<tr><th>Community</th><th>Plastic Used (kg)</th></tr>\n{totals}</table>\n\
         <h2>Monthly usage by community</h2>\n<table>\n<tr><th>Community</th><th>Month</th><th>Plastic Used (kg)</th></tr>\n{monthly}</table>"
    );

    layout("Plastic Usage Analysis", &body)
}

/// Chart page embedding the artifact.
pub fn plot_page(chart_url: &str) -> String {
    layout(
        "Plastic Usage Trends",
        &format!(
            "<img src=\"{}\" alt=\"Plastic usage trends per community\">",
            escape_html(chart_url)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use plastrack_common::test_utils::record_fixtures;
    use plastrack_common::UsageRecord;
    use plastrack_graphs::summarize;

    #[test]
    fn test_add_page_has_form_fields() {
        let page = add_page();
        for field in ["community", "date", "plastic_used_kg"] {
            assert!(page.contains(&format!("name=\"{field}\"")));
        }
        assert!(page.contains("method=\"post\""));
    }

    #[test]
    fn test_analyze_page_lists_totals_and_months() {
        let summary = summarize(&record_fixtures::riverside_lakeside()).unwrap();
        let page = analyze_page(&summary);

        assert!(page.contains("<tr><td>Riverside</td><td>19.5</td></tr>"));
        assert!(page.contains("<tr><td>Lakeside</td><td>5</td></tr>"));
        assert!(page.contains("<tr><td>Riverside</td><td>2024-02</td><td>7</td></tr>"));
    }

    #[test]
    fn test_analyze_page_has_both_tables() {
        let summary = summarize(&record_fixtures::riverside_lakeside()).unwrap();
        let page = analyze_page(&summary);

        assert_eq!(page.matches("<table>").count(), 2);
        assert_eq!(page.matches("</table>").count(), 2);
        assert!(page.contains("<th>Community</th><th>Month</th><th>Plastic Used (kg)</th>"));
        let monthly = page.find("Monthly usage by community").unwrap();
        assert!(page.find("Total usage by community").unwrap() < monthly);
    }

    #[test]
    fn test_analyze_page_escapes_community_names() {
        let summary =
            summarize(&[UsageRecord::new("<b>North</b> & Co", "2024-01-01", 1.0)]).unwrap();
        let page = analyze_page(&summary);

        assert!(page.contains("&lt;b&gt;North&lt;/b&gt; &amp; Co"));
        assert!(!page.contains("<b>North</b>"));
    }

    #[test]
    fn test_plot_page_embeds_chart() {
        assert!(plot_page("/static/plot.png").contains("<img src=\"/static/plot.png\""));
    }
}
