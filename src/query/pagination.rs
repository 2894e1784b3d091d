//! Page arithmetic and the page-button window.

/// `ceil(count / page_size)`, never less than 1
pub fn total_pages(count: usize, page_size: usize) -> u32 {
    let page_size = page_size.max(1);
    let pages = count.div_ceil(page_size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamp a requested page into `[1, total_pages]`
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// One element of the pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Prev { target: u32, disabled: bool },
    Page { number: u32, active: bool },
    Ellipsis,
    Next { target: u32, disabled: bool },
}

/// Page numbers to show: first, last, and the current page's neighbours
pub fn visible_pages(total_pages: u32, current: u32) -> Vec<u32> {
    let current = clamp_page(current, total_pages);
    let mut pages = vec![1];
    let low = current.saturating_sub(1).max(2);
    let high = (current + 1).min(total_pages.saturating_sub(1));
    pages.extend(low..=high);
    if total_pages > 1 {
        pages.push(total_pages);
    }
    pages
}

/// Build the pagination bar. A single page needs no bar, so this is empty.
pub fn pagination_controls(total_pages: u32, current: u32) -> Vec<PageControl> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let current = clamp_page(current, total_pages);

    let mut controls = vec![PageControl::Prev {
        target: current.saturating_sub(1).max(1),
        disabled: current == 1,
    }];

    let mut last = 0;
    for page in visible_pages(total_pages, current) {
        if page > last + 1 {
            controls.push(PageControl::Ellipsis);
        }
        controls.push(PageControl::Page {
            number: page,
            active: page == current,
        });
        last = page;
    }

    controls.push(PageControl::Next {
        target: (current + 1).min(total_pages),
        disabled: current == total_pages,
    });
    controls
}
