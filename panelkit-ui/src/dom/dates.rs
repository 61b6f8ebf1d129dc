//! Date Formatting
//!
//! Rewrites `data-date` timestamps into the visitor's local time.

use chrono::Local;

use panelkit::format::{format_date, parse_date, DateStyle};
use panelkit::DateConfig;

use super::query_all;

/// Attribute holding the machine-readable timestamp
pub const DATE_ATTRIBUTE: &str = "data-date";
/// Optional `short` (default), `long` or `datetime`
pub const STYLE_ATTRIBUTE: &str = "data-date-style";

fn style_from(attr: Option<&str>) -> DateStyle {
    match attr.map(str::trim) {
        Some("long") => DateStyle::Long,
        Some("datetime") => DateStyle::DateTime,
        _ => DateStyle::Short,
    }
}

/// Format every `[data-date]` element; unparseable values are left alone.
/// Returns how many elements were rewritten.
pub fn format_dates(config: &DateConfig) -> usize {
    let mut formatted = 0;
    for element in query_all(&format!("[{}]", DATE_ATTRIBUTE)) {
        let Some(raw) = element.get_attribute(DATE_ATTRIBUTE) else {
            continue;
        };
        let Some(ts) = parse_date(&raw) else {
            continue;
        };

        let style = style_from(element.get_attribute(STYLE_ATTRIBUTE).as_deref());
        let text = format_date(&ts.with_timezone(&Local), style, config);
        element.set_text_content(Some(&text));
        formatted += 1;
    }
    formatted
}
