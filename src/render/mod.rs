//! Presentation of a query page: HTML markup for the browser layout and
//! plain text for terminals.

pub mod html;
pub mod text;

use crate::query::{pagination_controls, QueryPage};
use crate::view::ViewMode;

/// Output flavour for a rendered page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    Html,
    #[default]
    Text,
}

/// Render results plus the pagination bar
pub fn render(page: &QueryPage<'_>, mode: ViewMode, format: RenderFormat) -> String {
    let controls = pagination_controls(page.total_pages, page.page);
    match format {
        RenderFormat::Html => {
            let mut out = html::render_page(page, mode);
            out.push_str(&html::render_pagination(&controls));
            out
        }
        RenderFormat::Text => {
            let mut out = text::render_page(page, mode);
            if !controls.is_empty() {
                out.push_str(&text::render_pagination(&controls));
                out.push('\n');
            }
            out
        }
    }
}
