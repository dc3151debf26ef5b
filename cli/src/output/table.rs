//! Box-drawn and markdown tables for results and the host list.

use console::{Alignment, measure_text_width, pad_str};
use owo_colors::OwoColorize as _;

use crate::domain::{AggregatedRow, HostRegistry, TABLE_DELIMITER};
use crate::output::{OutputContext, Styles};

/// Renders aggregated rows as a two-column table.
pub struct TableRenderer<'a> {
    ctx: &'a OutputContext,
    markdown: bool,
}

impl<'a> TableRenderer<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext, markdown: bool) -> Self {
        Self { ctx, markdown }
    }

    /// Label delimiter used when coalescing for this renderer.
    #[must_use]
    pub fn delimiter(&self) -> &'static str {
        TABLE_DELIMITER
    }

    /// Format the result table, preceded by the source when given.
    #[must_use]
    pub fn format(&self, source: Option<&str>, rows: &[AggregatedRow]) -> String {
        let mut out = String::new();
        if let Some(source) = source {
            out.push_str(&super::format_source(source, &self.ctx.styles));
        }
        if self.markdown {
            out.push_str(&draw_markdown(rows));
        } else {
            let cells: Vec<Vec<String>> = rows
                .iter()
                .map(|row| {
                    vec![
                        row.label.style(self.ctx.styles.host).to_string(),
                        row.result_text.clone(),
                    ]
                })
                .collect();
            out.push_str(&draw(None, &cells));
        }
        out
    }
}

/// Draw a box table. Cells may span several lines; widths ignore ANSI codes.
#[must_use]
pub fn draw(headers: Option<&[String]>, rows: &[Vec<String>]) -> String {
    let columns = headers
        .map(<[String]>::len)
        .into_iter()
        .chain(rows.iter().map(Vec::len))
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let mut widths = vec![0usize; columns];
    for row in headers.into_iter().map(<[String]>::to_vec).chain(rows.iter().cloned()) {
        for (col, cell) in row.iter().enumerate() {
            let widest = cell.lines().map(measure_text_width).max().unwrap_or(0);
            widths[col] = widths[col].max(widest);
        }
    }

    let mut out = String::new();
    out.push_str(&rule(&widths, '┌', '┬', '┐'));
    if let Some(headers) = headers {
        push_row(&mut out, headers, &widths);
        if !rows.is_empty() {
            out.push_str(&rule(&widths, '├', '┼', '┤'));
        }
    }
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push_str(&rule(&widths, '├', '┼', '┤'));
        }
        push_row(&mut out, row, &widths);
    }
    out.push_str(&rule(&widths, '└', '┴', '┘'));
    out
}

fn rule(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}\n", segments.join(&mid.to_string()))
}

fn push_row(out: &mut String, row: &[String], widths: &[usize]) {
    let split: Vec<Vec<&str>> = widths
        .iter()
        .enumerate()
        .map(|(col, _)| row.get(col).map_or_else(Vec::new, |c| c.lines().collect()))
        .collect();
    let height = split.iter().map(Vec::len).max().unwrap_or(0).max(1);

    for line in 0..height {
        out.push('│');
        for (col, width) in widths.iter().enumerate() {
            let text = split[col].get(line).copied().unwrap_or("");
            out.push(' ');
            out.push_str(&pad_str(text, *width, Alignment::Left, None));
            out.push_str(" │");
        }
        out.push('\n');
    }
}

/// Draw result rows as a GitHub-flavoured pipe table.
#[must_use]
pub fn draw_markdown(rows: &[AggregatedRow]) -> String {
    let mut out = String::from("| Host | Result |\n| --- | --- |\n");
    for row in rows {
        let label = markdown_cell(&row.label);
        let text = markdown_cell(&row.result_text);
        out.push_str(&format!("| {label} | <pre>{text}</pre> |\n"));
    }
    out
}

fn markdown_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}

/// Format the configured hosts as a table, in registration order.
#[must_use]
pub fn format_host_list(registry: &HostRegistry, styles: &Styles) -> String {
    if registry.is_empty() {
        return "No configured hosts\n".to_string();
    }
    let headers: Vec<String> = ["name", "type", "path", "args", "tags"]
        .iter()
        .map(|h| h.style(styles.header).to_string())
        .collect();
    let rows: Vec<Vec<String>> = registry
        .iter()
        .map(|host| {
            vec![
                host.name.clone(),
                host.host_type.clone(),
                host.path.clone(),
                host.args.clone(),
                host.tags.join(","),
            ]
        })
        .collect();
    draw(Some(&headers), &rows)
}
