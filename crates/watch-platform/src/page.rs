//! The ChatGPT page, read and edited through web-sys.
//!
//! Markup is located with the configured CSS selectors; nothing here knows
//! what a reply means, only where it sits in the document.

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::future::{self, Either};
use gloo_timers::future::TimeoutFuture;
use gloo_utils::{document, window};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, MutationObserver, MutationObserverInit};

use watch_core::ports::{ClickHandler, PagePort};
use watch_types::config::PageSelectors;
use watch_types::{Result, WatchError};

pub struct DomPage {
    selectors: PageSelectors,
}

fn js_err(e: JsValue) -> WatchError {
    WatchError::JsInterop(format!("{:?}", e))
}

fn missing(what: &str) -> WatchError {
    WatchError::PageElement(what.to_string())
}

impl DomPage {
    pub fn new(selectors: PageSelectors) -> Self {
        Self { selectors }
    }

    fn element(&self, id: &str) -> Result<Element> {
        document().get_element_by_id(id).ok_or_else(|| missing(id))
    }
}

/// Whether every id in `ids` currently resolves in `doc`
fn all_present(doc: &web_sys::Document, ids: &[String]) -> bool {
    ids.iter().all(|id| doc.get_element_by_id(id).is_some())
}

#[async_trait(?Send)]
impl PagePort for DomPage {
    fn location_href(&self) -> String {
        window().location().href().unwrap_or_default()
    }

    fn last_reply_text(&self) -> Option<String> {
        let headings = document()
            .query_selector_all(&self.selectors.reply_heading)
            .ok()?;
        let last = headings.item(headings.length().checked_sub(1)?)?;
        let container = last.parent_element()?;
        // Streaming replies have a heading before they have a body.
        container.query_selector(&self.selectors.reply_body).ok()??;
        let container: HtmlElement = container.dyn_into().ok()?;
        Some(container.inner_text())
    }

    fn append_reply(&self, html: &str) -> Result<()> {
        let heading = &self.selectors.reply_heading;
        let template = document()
            .query_selector(heading)
            .map_err(js_err)?
            .and_then(|h| h.parent_element())
            .ok_or_else(|| missing(heading))?;
        let conversation = template
            .parent_element()
            .ok_or_else(|| missing("reply container parent"))?;

        let copy: Element = template
            .clone_node_with_deep(true)
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| missing("cloned reply container"))?;
        let body = copy
            .query_selector(&self.selectors.reply_markdown)
            .map_err(js_err)?
            .ok_or_else(|| missing(&self.selectors.reply_markdown))?;
        body.set_inner_html(html);

        conversation.append_child(&copy).map_err(js_err)?;
        Ok(())
    }

    fn navigate_to(&self, path: &str) -> Result<()> {
        window().location().set_href(path).map_err(js_err)
    }

    async fn wait_for_elements(&self, ids: &[String], deadline_ms: u32) -> bool {
        let doc = document();
        if all_present(&doc, ids) {
            return true;
        }

        let (tx, rx) = oneshot::channel::<()>();
        let mut tx = Some(tx);
        let watched = ids.to_vec();
        let observed_doc = doc.clone();
        let on_mutation = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |_records, _observer| {
                if all_present(&observed_doc, &watched) {
                    if let Some(tx) = tx.take() {
                        let _ = tx.send(());
                    }
                }
            },
        );

        let observer = match MutationObserver::new(on_mutation.as_ref().unchecked_ref()) {
            Ok(o) => o,
            Err(e) => {
                log::warn!("MutationObserver unavailable: {:?}", e);
                return false;
            }
        };
        let Some(body) = doc.body() else {
            return false;
        };
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        if let Err(e) = observer.observe_with_options(&body, &init) {
            log::warn!("Could not observe document body: {:?}", e);
            return false;
        }

        let deadline = TimeoutFuture::new(deadline_ms);
        futures::pin_mut!(deadline);
        let appeared = match future::select(rx, deadline).await {
            Either::Left((sent, _)) => sent.is_ok(),
            Either::Right(_) => all_present(&doc, ids),
        };
        observer.disconnect();
        drop(on_mutation);
        appeared
    }

    fn on_click(&self, id: &str, handler: ClickHandler) -> Result<()> {
        let element = self.element(id)?;
        let listener = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_| handler());
        element
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            .map_err(js_err)?;
        // Lives as long as the element does.
        listener.forget();
        Ok(())
    }

    fn element_text(&self, id: &str) -> Option<String> {
        let element = document().get_element_by_id(id)?;
        Some(element.text_content().unwrap_or_default())
    }

    fn set_inner_html(&self, id: &str, html: &str) -> Result<()> {
        self.element(id)?.set_inner_html(html);
        Ok(())
    }
}
