use std::cell::RefCell;
use std::rc::Rc;

use heatmap_core::svg::render_svg;
use heatmap_core::{Dataset, HeatmapRenderer, RenderOutcome, Surface, CHART_TITLE, DATASET_URL};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, Request, RequestInit, RequestMode, Response};

mod tooltip;

const CONTAINER_SELECTOR: &str = ".heatmap-container";

#[derive(Default)]
struct ChartState {
    dataset: Option<Dataset>,
    surface: Surface,
    renderer: HeatmapRenderer,
}

type SharedState = Rc<RefCell<ChartState>>;

fn main() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };

    if let Some(title) = document.get_element_by_id("title") {
        title.set_text_content(Some(CHART_TITLE));
    }

    let state: SharedState = Rc::new(RefCell::new(ChartState::default()));
    install_pointer_handlers(&document, &state);
    spawn_local(fetch_dataset(state));
}

async fn fetch_dataset(state: SharedState) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let Ok(request) = Request::new_with_str_and_init(DATASET_URL, &opts) else {
        return;
    };

    let Ok(response_value) =
        wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request)).await
    else {
        web_sys::console::error_1(&"Failed to fetch global-temperature.json".into());
        return;
    };

    let Ok(response) = response_value.dyn_into::<Response>() else {
        web_sys::console::error_1(&"Failed to read response".into());
        return;
    };

    let Ok(body) = response.json() else {
        web_sys::console::error_1(&"Response body is not JSON".into());
        return;
    };
    let Ok(json) = wasm_bindgen_futures::JsFuture::from(body).await else {
        web_sys::console::error_1(&"Failed to read global-temperature.json body".into());
        return;
    };

    let dataset = match serde_wasm_bindgen::from_value::<Dataset>(json) {
        Ok(dataset) => dataset,
        Err(error) => {
            web_sys::console::error_1(
                &format!("Failed to parse global-temperature.json: {error}").into(),
            );
            return;
        }
    };

    state.borrow_mut().dataset = Some(dataset);
    redraw(&state);
}

/// Renders the current dataset and swaps the container's markup.
fn redraw(state: &SharedState) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };

    let mut state = state.borrow_mut();
    let ChartState {
        dataset,
        surface,
        renderer,
    } = &mut *state;

    if renderer.render(surface, dataset.as_ref()) == RenderOutcome::Skipped {
        return;
    }

    if let (Some(node), Some(text)) = (
        document.get_element_by_id("description"),
        dataset.as_ref().and_then(Dataset::description),
    ) {
        node.set_text_content(Some(&text));
    }

    let markup = match render_svg(surface) {
        Ok(markup) => markup,
        Err(error) => {
            web_sys::console::error_1(&format!("Failed to build chart markup: {error}").into());
            return;
        }
    };
    if let Ok(Some(container)) = document.query_selector(CONTAINER_SELECTOR) {
        container.set_inner_html(&markup);
    }
    tooltip::sync(&document, surface);
}

/// One delegated listener pair on the container serves every cell, so a
/// redraw never has to re-register handlers.
fn install_pointer_handlers(document: &Document, state: &SharedState) {
    let Ok(Some(container)) = document.query_selector(CONTAINER_SELECTOR) else {
        web_sys::console::error_1(&"Missing .heatmap-container".into());
        return;
    };

    let on_enter = {
        let state = state.clone();
        let document = document.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(index) = cell_index(&event) else {
                return;
            };
            let mut state = state.borrow_mut();
            state.surface.pointer_enter(index);
            tooltip::sync(&document, &state.surface);
        })
    };

    let on_leave = {
        let state = state.clone();
        let document = document.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if cell_index(&event).is_none() {
                return;
            }
            let mut state = state.borrow_mut();
            state.surface.pointer_leave();
            tooltip::sync(&document, &state.surface);
        })
    };

    if container
        .add_event_listener_with_callback("mouseover", on_enter.as_ref().unchecked_ref())
        .is_err()
        || container
            .add_event_listener_with_callback("mouseout", on_leave.as_ref().unchecked_ref())
            .is_err()
    {
        web_sys::console::error_1(&"Failed to attach pointer handlers".into());
    }

    // The container lives as long as the page.
    on_enter.forget();
    on_leave.forget();
}

fn cell_index(event: &Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let cell = target.closest("rect.cell").ok()??;
    cell.get_attribute("data-index")?.parse().ok()
}
