use crate::reduce::CategoryScore;

/// Delimiter written after every report section.
pub const REPORT_DELIMITER: &str = "\n\n---\n\n";

/// Format the block of report summaries appended to the assistant's
/// system prompt. Returns an empty string when no report is loaded.
pub fn format_reports_context<N, S>(reports: &[(N, S)]) -> String
where
    N: AsRef<str>,
    S: AsRef<str>,
{
    if reports.is_empty() {
        return String::new();
    }

    let mut out = String::from(
        "\
## LIGHTHOUSE REPORTS AVAILABLE

The user has loaded the following Google Lighthouse reports. \
A summary of each report follows:

",
    );

    for (name, summary) in reports {
        out.push_str(&format_report_section(name.as_ref(), summary.as_ref()));
    }

    out.push_str(
        "\
Use these summaries to answer the user's questions. \
If a question needs a report and reports are loaded, analyze them directly. \
If a question does not need a specific report, answer from your general \
knowledge of web optimization.

NOTE: the summaries include the key metrics, main problems and improvement \
opportunities found in the reports.",
    );
    out
}

/// Format one report's section (header, summary, delimiter).
pub fn format_report_section(name: &str, summary: &str) -> String {
    format!("### Report: {name}\n\n{summary}{REPORT_DELIMITER}")
}

/// Deterministic summary used when the model could not produce one:
/// the error, then each category's title and 0 – 100 score.
pub fn format_fallback_summary(error: &str, categories: &[CategoryScore]) -> String {
    let mut out = format!("Failed to summarize report: {error}\n\nBasic information:");
    if !categories.is_empty() {
        out.push_str("\n\nCategories:\n");
        for cat in categories {
            match cat.percent() {
                Some(p) => out.push_str(&format!("- {}: {p}/100\n", cat.title)),
                None => out.push_str(&format!("- {}: n/a\n", cat.title)),
            }
        }
    }
    out
}
