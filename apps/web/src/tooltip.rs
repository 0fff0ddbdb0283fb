use heatmap_core::Surface;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

const TOOLTIP_ID: &str = "tooltip";

/// Mirrors the surface tooltip into `div#tooltip`. Any previous node is
/// removed first so the page never holds more than one.
pub fn sync(document: &Document, surface: &Surface) {
    let Some(tooltip) = surface.tooltip() else {
        remove_existing(document);
        return;
    };

    if !tooltip.visible {
        if let Some(node) = existing(document) {
            let _ = node.style().set_property("display", "none");
        }
        return;
    }

    remove_existing(document);

    let Some(node) = document
        .create_element("div")
        .ok()
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    node.set_id(TOOLTIP_ID);

    if let Some(cell) = surface.cell(tooltip.cell) {
        let _ = node.set_attribute("data-year", &cell.year.to_string());
    }
    let markup: String = tooltip
        .lines()
        .iter()
        .map(|line| format!("<p>{line}</p>"))
        .collect();
    node.set_inner_html(&markup);

    let style = node.style();
    let _ = style.set_property("display", "block");
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("left", &format!("{}px", tooltip.left));
    let _ = style.set_property("top", &format!("{}px", tooltip.top));

    if let Ok(Some(container)) = document.query_selector(crate::CONTAINER_SELECTOR) {
        let _ = container.append_child(&node);
    }
}

fn existing(document: &Document) -> Option<HtmlElement> {
    document
        .get_element_by_id(TOOLTIP_ID)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

fn remove_existing(document: &Document) {
    if let Some(node) = document.get_element_by_id(TOOLTIP_ID) {
        node.remove();
    }
}
