//! Status page rendering.

use crate::helpers::escape_html;
use crate::models::Cycle;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Plain,
    /// Telegram HTML: bold names, monospace timestamp.
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub text: String,
    /// Page count for `page_size`. Only the first page is rendered; it lists
    /// every target.
    pub pages: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone)]
pub struct ReportRenderer {
    page_size: usize,
    markup: Markup,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, Markup::Html)
    }
}

impl ReportRenderer {
    pub fn new(page_size: usize, markup: Markup) -> Self {
        Self {
            page_size: page_size.max(1),
            markup,
        }
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn render(&self, cycle: &Cycle) -> RenderedPage {
        let total = cycle.health.len();
        let checked_at = cycle.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();

        let header = match self.markup {
            Markup::Plain => format!("📊 Project Status\nLast checked: {}\n\n", checked_at),
            Markup::Html => format!(
                "📊 <b>Project Status</b>\nLast checked: <code>{}</code>\n\n",
                checked_at
            ),
        };

        let lines: Vec<String> = cycle
            .health
            .iter()
            .enumerate()
            .map(|(idx, (name, state))| {
                format!(
                    "{}. {} — {} {}",
                    idx + 1,
                    self.name(name),
                    state.glyph(),
                    state
                )
            })
            .collect();
        let body = if lines.is_empty() {
            "No projects to display.".to_string()
        } else {
            lines.join("\n")
        };

        let footer = format!("\n\nTotal projects: {}", total);

        RenderedPage {
            text: header + &body + &footer,
            pages: self.page_count(total),
            page_size: self.page_size,
        }
    }

    fn name(&self, name: &str) -> String {
        match self.markup {
            Markup::Plain => name.to_string(),
            Markup::Html => format!("<b>{}</b>", escape_html(name)),
        }
    }
}
