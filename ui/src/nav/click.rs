/// The parts of a click that decide whether we take it over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Click {
    pub default_prevented: bool,
    pub button: i16,
    pub meta: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Click {
    #[cfg(feature = "web")]
    pub fn from_event(e: &web_sys::MouseEvent) -> Self {
        Self {
            default_prevented: e.default_prevented(),
            button: e.button(),
            meta: e.meta_key(),
            ctrl: e.ctrl_key(),
            shift: e.shift_key(),
            alt: e.alt_key(),
        }
    }

    /// Plain left click nobody else handled. Modified or middle clicks are
    /// left to the browser (new tab, download, ...).
    pub fn is_plain(&self) -> bool {
        !self.default_prevented
            && self.button == 0
            && !(self.meta || self.ctrl || self.shift || self.alt)
    }
}

/// Scroll position for a link target. The home target always goes to the
/// top; other targets land just below the header. Missing targets fall back
/// to the top as well.
pub fn scroll_target(target_top: Option<f64>, header_height: f64, is_home: bool) -> f64 {
    match target_top {
        Some(top) if !is_home => (top - header_height).max(0.0),
        _ => 0.0,
    }
}

/// Smooth scroll when the browser supports it, plain jump otherwise.
#[cfg(feature = "web")]
pub fn scroll_window_to(win: &web_sys::Window, doc: &web_sys::Document, top: f64) {
    if supports_smooth_scroll(doc) {
        let opts = web_sys::ScrollToOptions::new();
        opts.set_top(top);
        opts.set_behavior(web_sys::ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&opts);
    } else {
        win.scroll_to_with_x_and_y(0.0, top);
    }
}

#[cfg(feature = "web")]
fn supports_smooth_scroll(doc: &web_sys::Document) -> bool {
    use wasm_bindgen::JsCast;

    doc.document_element()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        .map(|root| js_sys::Reflect::has(&root.style(), &"scrollBehavior".into()).unwrap_or(false))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_click() {
        assert!(Click::default().is_plain());
    }

    #[test]
    fn test_modifiers_are_left_alone() {
        for c in [
            Click { meta: true, ..Default::default() },
            Click { ctrl: true, ..Default::default() },
            Click { shift: true, ..Default::default() },
            Click { alt: true, ..Default::default() },
        ] {
            assert!(!c.is_plain(), "{c:?}");
        }
    }

    #[test]
    fn test_non_primary_or_prevented_is_left_alone() {
        assert!(!Click { button: 1, ..Default::default() }.is_plain());
        assert!(!Click { button: 2, ..Default::default() }.is_plain());
        assert!(!Click { default_prevented: true, ..Default::default() }.is_plain());
    }

    #[test]
    fn test_scroll_target_subtracts_header() {
        assert_eq!(scroll_target(Some(900.0), 56.0, false), 844.0);
    }

    #[test]
    fn test_scroll_target_floors() {
        assert_eq!(scroll_target(Some(20.0), 56.0, false), 0.0);
        assert_eq!(scroll_target(Some(900.0), 56.0, true), 0.0);
        assert_eq!(scroll_target(None, 56.0, false), 0.0);
    }
}
