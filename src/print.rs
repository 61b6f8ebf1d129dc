//! Print Exporter
//!
//! Serialises one element subtree into a standalone document and hands it
//! to a fresh rendering surface which opens the print dialog itself.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::config::PrintConfig;
use crate::error::{ShellError, ShellResult};
use crate::format::format_timestamp_footer;

/// Resolves element ids to serialised markup
pub trait ElementSource {
    /// Outer HTML of the element with `id`, or `None` if absent
    fn outer_html(&self, id: &str) -> Option<String>;
}

/// Somewhere a print document can be written (a new window, a file)
pub trait PrintSurface {
    fn open(&mut self, document: &str) -> ShellResult<()>;
}

/// Snapshot of one subtree ready to print
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintJob {
    pub title: String,
    pub markup: String,
    pub printed_at: DateTime<Utc>,
}

const RESET_CSS: &str = "*{box-sizing:border-box}\
body{margin:0;padding:24px;font-family:-apple-system,\"Segoe UI\",Roboto,Arial,sans-serif;font-size:12pt;color:#000;background:#fff}\
h1.print-title{font-size:18pt;margin:0 0 16px}\
table{width:100%;border-collapse:collapse}\
th,td{border:1px solid #ccc;padding:4px 8px;text-align:left}\
.no-print,.btn{display:none!important}\
footer.print-footer{margin-top:24px;font-size:9pt;color:#666}";

impl PrintJob {
    /// Render the standalone document
    pub fn render(&self, config: &PrintConfig) -> String {
        let title = escape_html(&self.title);
        let heading = if self.title.is_empty() {
            String::new()
        } else {
            format!("<h1 class=\"print-title\">{}</h1>\n", title)
        };
        let extra_css = config.stylesheet.as_deref().unwrap_or("");
        let trigger = if config.auto_print {
            "<script>window.onload=function(){window.focus();window.print();};</script>\n"
        } else {
            ""
        };

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
             <style>{reset}{extra_css}</style>\n</head>\n<body>\n{heading}{markup}\n\
             <footer class=\"print-footer\">{footer}</footer>\n{trigger}</body>\n</html>\n",
            reset = RESET_CSS,
            markup = self.markup,
            footer = format_timestamp_footer(&self.printed_at, &config.timestamp_format),
        )
    }
}

/// Builds and dispatches print jobs
#[derive(Debug, Clone, Default)]
pub struct PrintExporter {
    config: PrintConfig,
}

impl PrintExporter {
    pub fn new(config: PrintConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    /// Print the subtree rooted at `element_id`
    ///
    /// Fails with [`ShellError::ElementNotFound`] without touching the
    /// surface when the id does not resolve.
    pub fn print_subtree(
        &self,
        source: &impl ElementSource,
        surface: &mut impl PrintSurface,
        element_id: &str,
        title: &str,
    ) -> ShellResult<PrintJob> {
        let Some(markup) = source.outer_html(element_id) else {
            tracing::warn!(element_id, "print target not found");
            return Err(ShellError::ElementNotFound(element_id.to_string()));
        };

        let job = PrintJob {
            title: title.to_string(),
            markup,
            printed_at: Utc::now(),
        };
        surface.open(&job.render(&self.config))?;
        tracing::info!(element_id, title, "print view opened");
        Ok(job)
    }
}

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Static HTML page used as an element source outside the browser
#[derive(Debug, Clone)]
pub struct HtmlSnapshot {
    html: String,
}

impl HtmlSnapshot {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

/// Start or end tag. Quoted attribute values are consumed whole so
/// markup inside them is never taken for a tag or attribute.
const TAG_PATTERN: &str = r#"<(/?)([A-Za-z][A-Za-z0-9-]*)((?:\s+[^\s"'>/=]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?)*)\s*(/?)>"#;

/// One attribute inside a tag's attribute list
const ATTR_PATTERN: &str = r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#;

/// Attribute names compare case-insensitively, the id value exactly
fn has_id(attrs: &str, id: &str, attr: &Regex) -> bool {
    attr.captures_iter(attrs).any(|c| {
        c[1].eq_ignore_ascii_case("id")
            && c.get(2).or_else(|| c.get(3)).or_else(|| c.get(4)).map(|v| v.as_str()) == Some(id)
    })
}

impl ElementSource for HtmlSnapshot {
    fn outer_html(&self, id: &str) -> Option<String> {
        let tag_re = Regex::new(TAG_PATTERN).ok()?;
        let attr_re = Regex::new(ATTR_PATTERN).ok()?;

        let mut tags = tag_re.captures_iter(&self.html);
        let open = tags
            .by_ref()
            .find(|c| c[1].is_empty() && has_id(&c[3], id, &attr_re))?;
        let whole = open.get(0)?;
        let tag = open[2].to_ascii_lowercase();

        if VOID_ELEMENTS.contains(&tag.as_str()) || &open[4] == "/" {
            return Some(whole.as_str().to_string());
        }

        let mut depth = 1usize;
        for m in tags {
            if !m[2].eq_ignore_ascii_case(&tag) {
                continue;
            }
            if &m[1] == "/" {
                depth -= 1;
                if depth == 0 {
                    let end = m.get(0)?.end();
                    return Some(self.html[whole.start()..end].to_string());
                }
            } else if &m[4] != "/" {
                depth += 1;
            }
        }

        tracing::warn!(id, "unterminated element, printing to end of document");
        Some(self.html[whole.start()..].to_string())
    }
}

/// Surface that keeps every document it is given
#[derive(Debug, Default)]
pub struct BufferSurface {
    pub documents: Vec<String>,
}

impl PrintSurface for BufferSurface {
    fn open(&mut self, document: &str) -> ShellResult<()> {
        self.documents.push(document.to_string());
        Ok(())
    }
}
