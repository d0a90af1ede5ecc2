use crate::dom::Node;

pub const PREV_LABEL: &str = "← Anterior";
pub const NEXT_LABEL: &str = "Următor →";
pub const BUTTON_CLASS: &str = "btn-pagination";

pub fn total_pages(total: u64, per_page: u32) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page as u64)
}

pub fn page_info(page: u32, total_pages: u64) -> String {
    format!("Pagina {page} din {total_pages}")
}

fn nav_button(label: &str, target: Option<u32>) -> Node {
    let button = Node::element("button")
        .class(BUTTON_CLASS)
        .attr("type", "button");
    match target {
        Some(page) => button
            .attr("data-page", page.to_string())
            .child(Node::text(label)),
        None => button.flag("disabled", true).child(Node::text(label)),
    }
}

/// Previous button, page indicator, page input and next button. Empty when
/// everything fits on one page.
pub fn render(total: u64, page: u32, per_page: u32) -> Vec<Node> {
    let pages = total_pages(total, per_page);
    if pages <= 1 {
        return Vec::new();
    }
    let prev = page.checked_sub(1).filter(|p| *p >= 1);
    let next = page.checked_add(1).filter(|p| (*p as u64) <= pages);
    vec![
        nav_button(PREV_LABEL, prev),
        Node::element("span")
            .class("page-info")
            .child(Node::text(page_info(page, pages))),
        Node::element("input")
            .class("page-input")
            .attr("type", "number")
            .attr("min", "1")
            .attr("max", pages.to_string())
            .attr("value", page.to_string())
            .attr("aria-label", "Pagina curentă"),
        nav_button(NEXT_LABEL, next),
    ]
}

/// Parses a typed page number, clamped to `1..=total_pages`.
pub fn parse_page_input(raw: &str, total_pages: u64) -> Option<u32> {
    let wanted: i64 = raw.trim().parse().ok()?;
    let max = total_pages.max(1).min(u32::MAX as u64) as i64;
    Some(wanted.clamp(1, max) as u32)
}
