#[cfg(feature = "web")]
use crate::config::SiteConfig;

pub const OFFSET_PROPERTY: &str = "--header-offset";

/// Space reserved below a fixed header of the given height. The extra pixel
/// lets a section activate as soon as it reaches the header edge.
pub fn header_offset(header_height: f64) -> f64 {
    if header_height > 0.0 { header_height + 1.0 } else { 0.0 }
}

pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Rendered height of the fixed header, 0 when there is none.
#[cfg(feature = "web")]
pub fn header_height(doc: &web_sys::Document, cfg: &SiteConfig) -> f64 {
    crate::dom::select_html(doc, &cfg.header_selector)
        .map(|h| h.offset_height() as f64)
        .unwrap_or(0.0)
}

/// Measures the header and pushes the page content below it, both as body
/// padding and as a CSS variable for stylesheets.
#[cfg(feature = "web")]
pub fn apply_header_offset(doc: &web_sys::Document, cfg: &SiteConfig) -> f64 {
    use wasm_bindgen::JsCast;

    let offset = header_offset(header_height(doc, cfg));
    let value = px(offset);

    if let Some(body) = doc.body() {
        let _ = body.style().set_property("padding-top", &value);
    }
    if let Some(root) = doc
        .document_element()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        let _ = root.style().set_property(OFFSET_PROPERTY, &value);
    }

    log::debug!("header offset {value}");
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_adds_one_pixel() {
        assert_eq!(header_offset(56.0), 57.0);
        assert_eq!(header_offset(1.0), 2.0);
    }

    #[test]
    fn test_missing_header_is_zero() {
        assert_eq!(header_offset(0.0), 0.0);
    }

    #[test]
    fn test_px_formatting() {
        assert_eq!(px(57.0), "57px");
        assert_eq!(px(0.0), "0px");
    }
}
