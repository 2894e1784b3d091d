use std::fmt::Write;

use crate::core::{CompressionAlgorithm, DerivedGameRecord};
use crate::format::{cover_url, fallback_cover_url, format_bytes, store_url, thumb_url};
use crate::query::{PageControl, QueryPage};
use crate::view::ViewMode;

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the result page in the requested layout
pub fn render_page(page: &QueryPage<'_>, mode: ViewMode) -> String {
    let mut out = String::new();
    match mode {
        ViewMode::Grid => {
            out.push_str("<div class=\"game-grid\">");
            for record in &page.items {
                out.push_str(&game_card(record));
            }
        }
        ViewMode::List => {
            out.push_str("<div class=\"game-grid list-view\">");
            for record in &page.items {
                out.push_str(&game_card(record));
            }
        }
        ViewMode::Compact => {
            out.push_str("<div class=\"game-grid compact-view\">");
            out.push_str(&compact_table(&page.items));
        }
    }
    out.push_str("</div>");
    out
}

fn title_block(record: &DerivedGameRecord) -> String {
    let name = escape_html(record.name());
    format!(
        "<div class=\"game-title-container\"><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" \
         class=\"steam-link\" title=\"View on Steam Store\">\
         <img src=\"icons/open-link.svg\" alt=\"View on Steam Store\"></a>\
         <h2 title=\"{name}\">{name}</h2></div>",
        escape_html(&store_url(record.steam_id())),
        name = name,
    )
}

/// Cover card with a per-algorithm results table
pub fn game_card(record: &DerivedGameRecord) -> String {
    let id = record.steam_id();

    let mut rows = String::new();
    for (algorithm, result) in record.results() {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td class=\"savings\">{:.2}%</td></tr>",
            algorithm.label(),
            format_bytes(result.after_bytes, 2),
            result.savings
        );
    }
    if rows.is_empty() {
        rows.push_str("<tr><td colspan=\"3\">N/A</td></tr>");
    }

    format!(
        "<div class=\"game-card\"><img class=\"cover\" src=\"{cover}\" alt=\"{name} Cover\" loading=\"lazy\" \
         onerror=\"this.onerror=null;this.src='{fallback}';\">\
         <div class=\"game-info\">{title}\
         <div class=\"game-meta\">Original Size: <strong>{size}</strong></div>\
         <table class=\"compression-table\"><thead><tr><th>Algorithm</th><th>After</th><th>Saved</th></tr></thead>\
         <tbody>{rows}</tbody></table></div></div>",
        cover = escape_html(&cover_url(id)),
        fallback = escape_html(&fallback_cover_url(id)),
        name = escape_html(record.name()),
        title = title_block(record),
        size = format_bytes(record.original_size, 2),
        rows = rows,
    )
}

/// Dense table: one row per game, one column per algorithm
pub fn compact_table(records: &[&DerivedGameRecord]) -> String {
    let mut out = String::from("<div class=\"table-wrapper\"><table class=\"compact-table\"><thead><tr><th></th><th>Game</th><th>Original</th>");
    for algorithm in CompressionAlgorithm::ALL {
        let _ = write!(out, "<th>{}</th>", algorithm.label());
    }
    out.push_str("</tr></thead><tbody>");

    for record in records {
        let _ = write!(
            out,
            "<tr><td><img class=\"compact-thumb\" src=\"{}\" loading=\"lazy\" onerror=\"this.style.display='none'\"></td>\
             <td>{}</td><td><strong>{}</strong></td>",
            escape_html(&thumb_url(record.steam_id())),
            title_block(record),
            format_bytes(record.original_size, 2),
        );
        for algorithm in CompressionAlgorithm::ALL {
            match record.result(algorithm) {
                Some(result) => {
                    let _ = write!(
                        out,
                        "<td>{}<br><span class=\"savings\">({:.1}%)</span></td>",
                        format_bytes(result.after_bytes, 2),
                        result.savings
                    );
                }
                None => out.push_str("<td>-</td>"),
            }
        }
        out.push_str("</tr>");
    }

    out.push_str("</tbody></table></div>");
    out
}

/// Pagination bar; buttons carry their target page in `data-page`
pub fn render_pagination(controls: &[PageControl]) -> String {
    if controls.is_empty() {
        return String::new();
    }

    let mut out = String::from("<div class=\"pagination-controls\">");
    for control in controls {
        match *control {
            PageControl::Prev { target, disabled } => out.push_str(&page_button("&laquo; Prev", target, disabled, false)),
            PageControl::Page { number, active } => out.push_str(&page_button(&number.to_string(), number, false, active)),
            PageControl::Ellipsis => out.push_str("<span class=\"ellipsis\">...</span>"),
            PageControl::Next { target, disabled } => out.push_str(&page_button("Next &raquo;", target, disabled, false)),
        }
    }
    out.push_str("</div>");
    out
}

fn page_button(label: &str, target: u32, disabled: bool, active: bool) -> String {
    format!(
        "<button class=\"page-btn{}\" data-page=\"{}\"{}>{}</button>",
        if active { " active" } else { "" },
        target,
        if disabled { " disabled" } else { "" },
        label
    )
}
