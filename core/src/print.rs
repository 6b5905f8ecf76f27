//! Printable markup for a single planner record.
//!
//! The fragment lives in `templates/planner.html`; askama escapes every
//! interpolated value because of the `.html` extension.

use askama::Template;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::types::PlannerRecord;

const DISPLAY_DATE: &str = "%m/%d/%Y";

#[derive(Template)]
#[template(path = "planner.html")]
struct PrintTemplate<'a> {
    id: String,
    title: &'a str,
    description: &'a str,
    start_date: String,
    end_date: String,
    location: &'a str,
    participants: String,
}

/// Render `record` as a self-contained HTML fragment for a print dialog.
///
/// Dates are shown as `MM/dd/yyyy`; a date that cannot be parsed is shown as
/// stored.
pub fn printable_content(record: &PlannerRecord) -> String {
    PrintTemplate {
        id: record.id.to_string(),
        title: &record.title,
        description: &record.description,
        start_date: format_date(&record.start_date),
        end_date: format_date(&record.end_date),
        location: &record.location,
        participants: record.participants.join(", "),
    }
    .to_string()
}

/// Format an ISO-like date as `MM/dd/yyyy`.
pub fn format_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format(DISPLAY_DATE).to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|d| d.date()))
}
