//! Plain-text result renderer.

use owo_colors::OwoColorize as _;

use crate::domain::{AggregatedRow, INLINE_DELIMITER};
use crate::output::OutputContext;

/// Renders each row as a `####` heading followed by its text.
pub struct PlainRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> PlainRenderer<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    #[must_use]
    pub fn delimiter(&self) -> &'static str {
        INLINE_DELIMITER
    }

    #[must_use]
    pub fn format(&self, source: Option<&str>, rows: &[AggregatedRow]) -> String {
        let mut out = String::new();
        if let Some(source) = source {
            out.push_str(&super::format_source(source, &self.ctx.styles));
        }
        for row in rows {
            let heading = format!("#### {}", row.label);
            out.push_str(&heading.style(self.ctx.styles.host).to_string());
            out.push('\n');
            out.push_str(&row.result_text);
            out.push_str("\n\n");
        }
        out
    }
}
