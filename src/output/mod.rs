// Output formatting: the plain score report and its JSON form.

use anyhow::Result;
use serde::Serialize;

use crate::scoring::evaluate::ListingScores;

/// JSON shape of a report: the keyword followed by the four scores.
#[derive(Serialize)]
struct JsonReport<'a> {
    target_keyword: &'a str,
    #[serde(flatten)]
    scores: &'a ListingScores,
}

/// Render the five-line plain-text report, scores to three decimals.
pub fn format_report(keyword: &str, scores: &ListingScores) -> String {
    format!(
        "Target Keyword: {keyword}\n\
         Title Score: {:.3}\n\
         Short Description Score: {:.3}\n\
         Long Description Score: {:.3}\n\
         Overall Score: {:.3}\n",
        scores.title_score,
        scores.short_description_score,
        scores.long_description_score,
        scores.overall_score,
    )
}

/// Render the report as pretty-printed JSON. NaN scores become `null`.
pub fn format_json(keyword: &str, scores: &ListingScores) -> Result<String> {
    let report = JsonReport {
        target_keyword: keyword,
        scores,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Print a report to stdout in the requested format.
pub fn print_report(keyword: &str, scores: &ListingScores, json: bool) -> Result<()> {
    if json {
        println!("{}", format_json(keyword, scores)?);
    } else {
        print!("{}", format_report(keyword, scores));
    }
    Ok(())
}
