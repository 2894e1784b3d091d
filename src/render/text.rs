use std::fmt::Write;

use crate::core::CompressionAlgorithm;
use crate::format::format_bytes;
use crate::query::{PageControl, QueryPage};
use crate::view::ViewMode;

const NAME_WIDTH: usize = 36;

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut short: String = name.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// Plain-text rendering for terminals.
///
/// Grid and list both print one block per game; compact prints a table.
pub fn render_page(page: &QueryPage<'_>, mode: ViewMode) -> String {
    let mut out = String::new();

    if page.items.is_empty() {
        out.push_str("No games found.\n");
        return out;
    }

    match mode {
        ViewMode::Grid | ViewMode::List => {
            for record in &page.items {
                let _ = writeln!(out, "{} [{}]", record.name(), record.steam_id());
                let _ = writeln!(out, "  Original Size: {}", format_bytes(record.original_size, 2));
                if !record.has_results() {
                    out.push_str("  N/A\n");
                }
                for (algorithm, result) in record.results() {
                    let _ = writeln!(
                        out,
                        "  {:<11} {:>12}  {:>6.2}%",
                        algorithm.label(),
                        format_bytes(result.after_bytes, 2),
                        result.savings
                    );
                }
                if mode == ViewMode::Grid {
                    out.push('\n');
                }
            }
        }
        ViewMode::Compact => {
            let _ = write!(out, "{:<width$} {:>12}", "Game", "Original", width = NAME_WIDTH);
            for algorithm in CompressionAlgorithm::ALL {
                let _ = write!(out, " {:>20}", algorithm.label());
            }
            out.push('\n');

            for record in &page.items {
                let _ = write!(
                    out,
                    "{:<width$} {:>12}",
                    truncate(record.name(), NAME_WIDTH),
                    format_bytes(record.original_size, 2),
                    width = NAME_WIDTH
                );
                for algorithm in CompressionAlgorithm::ALL {
                    let cell = match record.result(algorithm) {
                        Some(r) => format!("{} ({:.1}%)", format_bytes(r.after_bytes, 2), r.savings),
                        None => "-".to_string(),
                    };
                    let _ = write!(out, " {:>20}", cell);
                }
                out.push('\n');
            }
        }
    }

    out
}

/// One-line pagination summary, e.g. `« 1 … 4 [5] 6 … 10 »`
pub fn render_pagination(controls: &[PageControl]) -> String {
    controls
        .iter()
        .map(|control| match *control {
            PageControl::Prev { disabled, .. } => if disabled { "«".to_string() } else { "‹ Prev".to_string() },
            PageControl::Page { number, active: true } => format!("[{}]", number),
            PageControl::Page { number, .. } => number.to_string(),
            PageControl::Ellipsis => "…".to_string(),
            PageControl::Next { disabled, .. } => if disabled { "»".to_string() } else { "Next ›".to_string() },
        })
        .collect::<Vec<_>>()
        .join(" ")
}
