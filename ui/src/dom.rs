use anyhow::{Result, anyhow};
use wasm_bindgen::{JsCast, JsValue, prelude::Closure};
use web_sys::{Document, Element, EventTarget, HtmlElement};

pub use leptos::leptos_dom::helpers::{document, window};

/// An attached event listener. The closure stays alive for as long as the
/// handle does; `detach` removes it from the target.
pub struct EventHandle {
    target: EventTarget,
    event: &'static str,
    capture: bool,
    closure: Option<Closure<dyn FnMut(JsValue)>>,
}

impl EventHandle {
    /// Removes the listener. The closure is returned instead of dropped so
    /// callers detaching from inside the listener itself can free it later.
    pub fn detach(mut self) -> Option<Closure<dyn FnMut(JsValue)>> {
        let closure = self.closure.take()?;
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            self.event,
            closure.as_ref().unchecked_ref(),
            self.capture,
        );
        Some(closure)
    }

    /// Keeps the listener for the lifetime of the page.
    pub fn forget(mut self) {
        if let Some(cb) = self.closure.take() {
            cb.forget();
        }
    }
}

impl Drop for EventHandle {
    fn drop(&mut self) {
        if let Some(cb) = self.closure.take() {
            let _ = self.target.remove_event_listener_with_callback_and_bool(
                self.event,
                cb.as_ref().unchecked_ref(),
                self.capture,
            );
        }
    }
}

pub fn listen<T, F>(target: &EventTarget, event: &'static str, capture: bool, mut f: F) -> Result<EventHandle>
where
    T: 'static + JsCast,
    F: 'static + FnMut(T),
{
    let cb = Closure::wrap(Box::new(move |v: JsValue| {
        if let Ok(ev) = v.dyn_into::<T>() {
            f(ev);
        }
    }) as Box<dyn FnMut(JsValue)>);

    target
        .add_event_listener_with_callback_and_bool(event, cb.as_ref().unchecked_ref(), capture)
        .map_err(|e| js_err(&format!("add {event} listener"), e))?;

    Ok(EventHandle {
        target: target.clone(),
        event,
        capture,
        closure: Some(cb),
    })
}

pub fn js_err(what: &str, e: JsValue) -> anyhow::Error {
    anyhow!("{what}: {e:?}")
}

pub fn select(root: &Document, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn select_html(root: &Document, selector: &str) -> Option<HtmlElement> {
    select(root, selector).and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Every element under `root` matching `selector`, in document order.
pub fn select_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

/// Runs `f` now if `ready` already holds, otherwise once `event` fires on `target`.
pub fn when_ready(
    ready: bool,
    target: &EventTarget,
    event: &'static str,
    f: impl FnOnce() + 'static,
) -> Result<()> {
    if ready {
        f();
        return Ok(());
    }

    let mut f = Some(f);
    listen(target, event, false, move |_: web_sys::Event| {
        if let Some(f) = f.take() {
            f();
        }
    })?
    .forget();
    Ok(())
}
