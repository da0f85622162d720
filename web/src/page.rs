use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlElement, ScrollBehavior,
    ScrollIntoViewOptions,
};

use crate::config::{
    ALERT_AUTO_HIDE_MS, DISMISSIBLE_ALERT_SELECTOR, ENTRANCE_ANIMATION_CLASS,
    ENTRANCE_ANIMATION_SELECTOR, TOOLTIP_SELECTOR,
};
use crate::dom;
use crate::error::{describe_js, DomError};
use crate::navbar::{update_navbar, DomNavbar};
use crate::user_session::SessionContext;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    type Tooltip;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, catch)]
    fn new(element: &Element) -> Result<Tooltip, JsValue>;
}

thread_local! {
    static PAGE_TIMERS: RefCell<Vec<Timeout>> = const { RefCell::new(Vec::new()) };
}

/// Runs `callback` once the document is parsed: on `DOMContentLoaded`, or
/// right away when that already happened.
pub fn on_ready(callback: impl FnOnce() + 'static) -> Result<(), DomError> {
    let document = dom::document()?;
    if still_parsing(&document.ready_state()) {
        let callback = Closure::once(callback);
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            callback.as_ref().unchecked_ref(),
        )?;
        callback.forget();
    } else {
        callback();
    }
    Ok(())
}

/// `document.readyState` before `DOMContentLoaded`.
fn still_parsing(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Page-ready wiring. Each step runs even when an earlier one failed.
pub fn bootstrap() {
    let document = match dom::document() {
        Ok(document) => document,
        Err(error) => {
            log::error!("Page bootstrap aborted, error={error}");
            return;
        }
    };
    log_step("navbar", render_navbar(&document));
    log_step("listeners", install_global_listeners(&document).map_err(Into::into));
    log_step("tooltips", init_tooltips(&document).map_err(Into::into));
    log_step("animations", add_entrance_animations(&document).map_err(Into::into));
    log_step("alerts", schedule_alert_auto_hide(&document).map_err(Into::into));
}

fn log_step(step: &str, result: anyhow::Result<()>) {
    if let Err(error) = result {
        log::error!("Page bootstrap step failed, step={step}, error={error:#}");
    }
}

fn render_navbar(document: &Document) -> anyhow::Result<()> {
    let session = SessionContext::browser()?;
    update_navbar(&session, &DomNavbar::new(document.clone(), session.clone()))
}

/// Cancels the alert auto-hide timers still pending.
pub fn teardown() {
    PAGE_TIMERS.with(|timers| timers.borrow_mut().clear());
}

/// Element id a same-page link points at. `#` alone points nowhere.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// `animation-delay` of the `index`-th animated element.
pub fn entrance_delay(index: usize) -> String {
    #[allow(clippy::cast_precision_loss)]
    let seconds = index as f64 / 10.0;
    format!("{seconds}s")
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Forms never submit natively: pages send them through the API client.
/// Same-page anchors scroll smoothly instead of jumping.
fn install_global_listeners(document: &Document) -> Result<(), DomError> {
    let on_submit = Closure::<dyn FnMut(Event)>::new(|event: Event| {
        if event_element(&event).is_some_and(|target| target.tag_name() == "FORM") {
            event.prevent_default();
        }
    });
    document.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    let scroll_document = document.clone();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(target) = event_element(&event) else {
            return;
        };
        if target.tag_name() != "A" {
            return;
        }
        let Some(href) = target.get_attribute("href") else {
            return;
        };
        if !href.starts_with('#') {
            return;
        }
        event.prevent_default();
        if let Some(section) = fragment_id(&href).and_then(|id| scroll_document.get_element_by_id(id)) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            section.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });
    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

fn init_tooltips(document: &Document) -> Result<(), DomError> {
    let triggers = dom::query_document(document, TOOLTIP_SELECTOR)?;
    let total = triggers.len();
    for trigger in triggers {
        Tooltip::new(&trigger)?;
    }
    log::debug!("Tooltips initialized, total={total}");
    Ok(())
}

fn add_entrance_animations(document: &Document) -> Result<(), DomError> {
    let elements = dom::query_document(document, ENTRANCE_ANIMATION_SELECTOR)?;
    for (index, element) in elements.into_iter().enumerate() {
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            dom::set_style(element, "animation-delay", &entrance_delay(index))?;
        }
        element.class_list().add_1(ENTRANCE_ANIMATION_CLASS)?;
    }
    Ok(())
}

/// Alerts rendered with the page close themselves through their own close
/// button, so Bootstrap runs its dismiss transition.
fn schedule_alert_auto_hide(document: &Document) -> Result<(), DomError> {
    let alerts = dom::query_document(document, DISMISSIBLE_ALERT_SELECTOR)?;
    let timers: Vec<Timeout> = alerts
        .into_iter()
        .map(|alert| {
            Timeout::new(ALERT_AUTO_HIDE_MS, move || {
                if !alert.is_connected() {
                    return;
                }
                match alert.query_selector(".btn-close") {
                    Ok(Some(close)) => {
                        if let Some(close) = close.dyn_ref::<HtmlElement>() {
                            close.click();
                        }
                    }
                    Ok(None) => {}
                    Err(error) => log::warn!("Alert auto-hide failed, error={}", describe_js(&error)),
                }
            })
        })
        .collect();
    PAGE_TIMERS.with(|pending| pending.borrow_mut().extend(timers));
    Ok(())
}
