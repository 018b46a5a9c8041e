//! The 🔊/🔇 button next to the composer.
//!
//! Built by cloning an existing composer button so it inherits the page's
//! styling, then emptied and given a single icon paragraph.

use std::rc::Rc;

use gloo_utils::document;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use watch_core::toggle::listening_icon;
use watch_types::config::PageSelectors;
use watch_types::{Result, WatchError};

/// The icon paragraph inside the injected button
#[derive(Clone)]
pub struct ToggleIcon {
    element: Element,
}

impl ToggleIcon {
    pub fn show(&self, listening: bool) {
        self.element.set_text_content(Some(listening_icon(listening)));
    }
}

/// Called on every click with the button's icon
pub type ToggleClick = Rc<dyn Fn(ToggleIcon)>;

fn js_err(e: JsValue) -> WatchError {
    WatchError::JsInterop(format!("{:?}", e))
}

/// Insert the toggle button once. Fails with `PageElement` while the
/// composer has not rendered yet so the caller can retry.
pub fn inject_toggle_button(selectors: &PageSelectors, listening: bool, on_click: ToggleClick) -> Result<ToggleIcon> {
    let doc = document();
    let anchor = doc
        .query_selector(&selectors.toggle_anchor)
        .map_err(js_err)?
        .ok_or_else(|| WatchError::PageElement(selectors.toggle_anchor.clone()))?;
    let host = anchor
        .parent_element()
        .and_then(|p| p.parent_element())
        .and_then(|container| container.parent_element())
        .ok_or_else(|| WatchError::PageElement("composer button container".to_string()))?;

    let button: HtmlElement = anchor
        .clone_node_with_deep(true)
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| WatchError::PageElement("cloned composer button".to_string()))?;
    let style = button.style();
    style.set_property("opacity", "1").map_err(js_err)?;
    style.set_property("font-size", "large").map_err(js_err)?;
    button.remove_attribute("disabled").map_err(js_err)?;
    button.set_inner_html("");

    let icon = ToggleIcon {
        element: doc.create_element("p").map_err(js_err)?,
    };
    icon.show(listening);
    button.append_child(&icon.element).map_err(js_err)?;

    let clicked_icon = icon.clone();
    let listener = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_| on_click(clicked_icon.clone()));
    button
        .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        .map_err(js_err)?;
    listener.forget();

    host.append_child(&button).map_err(js_err)?;
    log::info!("Listening button added");
    Ok(icon)
}
