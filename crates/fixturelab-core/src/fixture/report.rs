use super::field_map::FieldMap;
use super::result::ComparisonReport;
use crate::error::Result;
use std::path::Path;

/// Renders a completed comparison into a self-contained HTML report.
///
/// Three fixed sections: the summary counts, one table per failing record
/// (failing fields only), and a full tabular dump of every actual record.
/// Rendering is pure string substitution over already-aggregated data; the
/// comparator has done all the counting by the time this runs.
pub struct ReportRenderer;

impl ReportRenderer {
    pub fn render(report: &ComparisonReport, actual_records: &[FieldMap]) -> String {
        let mut html = String::new();

        html.push_str(
            "<html>\n<head>\n<title>Fixture Comparison Report</title>\n<style>\n\
             table {border-collapse: collapse; margin-bottom: 20px;}\n\
             th, td {border: 1px solid black; padding: 5px; text-align: center;}\n\
             .Failed {background-color: #ffc7ce; color: #9c0006;}\n\
             </style>\n</head>\n<body>\n",
        );
        html.push_str(&format!(
            "<p>Generated {}</p>\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ));

        render_summary(&mut html, report);
        render_failures(&mut html, report);
        render_actual(&mut html, actual_records);

        html.push_str("</body>\n</html>\n");
        html
    }

    /// Render and write the report to `path`. Terminal step: the HTML is a
    /// deliverable, not an input to anything downstream.
    pub fn write_html(
        report: &ComparisonReport,
        actual_records: &[FieldMap],
        path: &Path,
    ) -> Result<()> {
        std::fs::write(path, Self::render(report, actual_records))?;
        Ok(())
    }
}

fn render_summary(html: &mut String, report: &ComparisonReport) {
    html.push_str("<h2>Part 1: Summary</h2>\n<table>\n");
    html.push_str("<tr><th>Summary</th><th>Count</th></tr>\n");
    html.push_str(&format!(
        "<tr><td>Total tags</td><td>{}</td></tr>\n",
        report.summary.total_tags
    ));
    html.push_str(&format!(
        "<tr><td>Passed</td><td>{}</td></tr>\n",
        report.summary.passed
    ));
    html.push_str(&format!(
        "<tr><td>Failed</td><td>{}</td></tr>\n",
        report.summary.failed
    ));
    html.push_str("</table>\n");
}

fn render_failures(html: &mut String, report: &ComparisonReport) {
    html.push_str("<h2>Part 2: Failed Details</h2>\n");

    for failure in &report.failures {
        html.push_str("<table>\n<tr>\n<th>Row</th>\n");
        for outcome in &failure.fields {
            html.push_str(&format!(
                "<th>expected_{f}</th><th>actual_{f}</th><th>Status</th>\n",
                f = escape(&outcome.field)
            ));
        }
        html.push_str("</tr>\n<tr>\n");
        html.push_str(&format!("<td>{}</td>\n", failure.record));
        for outcome in &failure.fields {
            html.push_str(&format!(
                "<td>{}</td><td>{}</td><td class=\"Failed\">Failed</td>\n",
                escape(&outcome.expected),
                escape(&outcome.actual)
            ));
        }
        html.push_str("</tr>\n</table>\n");
    }
}

fn render_actual(html: &mut String, actual_records: &[FieldMap]) {
    html.push_str("<h2>Part 3: Actual Result (Full Output)</h2>\n");

    // Columns are the union of field names in first-seen order across
    // records; a record missing a column renders an empty cell.
    let mut columns: Vec<String> = Vec::new();
    for record in actual_records {
        for (field, _) in record.iter() {
            if !columns.iter().any(|c| c == field) {
                columns.push(field.to_string());
            }
        }
    }

    html.push_str("<table>\n<tr>\n");
    for column in &columns {
        html.push_str(&format!("<th>{}</th>", escape(column)));
    }
    html.push_str("\n</tr>\n");

    for record in actual_records {
        html.push_str("<tr>\n");
        for column in &columns {
            html.push_str(&format!("<td>{}</td>", escape(record.get(column).unwrap_or(""))));
        }
        html.push_str("\n</tr>\n");
    }
    html.push_str("</table>\n");
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
