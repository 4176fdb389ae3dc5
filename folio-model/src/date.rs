//! Date attribute payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payload of a date attribute (`d` code).
///
/// Fields keep the service's string encoding; parsing happens at format
/// time so a malformed payload degrades to its raw text instead of
/// failing a whole page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    /// "date", "datetime", "daterange" or "datetimerange".
    #[serde(rename = "type")]
    pub kind: String,
    /// "YYYY-MM-DD".
    pub start_date: String,
    /// "HH:MM", present for datetime kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl DateValue {
    /// Human form: "May 28, 2019", plus the time for datetime kinds and
    /// the end date for ranges.
    pub fn format(&self) -> String {
        let with_time = self.kind.starts_with("datetime");
        let mut out = format_day(&self.start_date);
        if with_time {
            if let Some(time) = &self.start_time {
                out.push(' ');
                out.push_str(time);
            }
        }
        if let Some(end) = &self.end_date {
            out.push_str(" → ");
            out.push_str(&format_day(end));
            if with_time {
                if let Some(time) = &self.end_time {
                    out.push(' ');
                    out.push_str(time);
                }
            }
        }
        out
    }
}

fn format_day(day: &str) -> String {
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => day.to_string(),
    }
}
