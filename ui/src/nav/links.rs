#[cfg(feature = "web")]
use web_sys::{Document, Element};

#[cfg(feature = "web")]
use crate::config::SiteConfig;

/// `"#about"` -> `Some("about")`; anything that isn't a non-empty local
/// fragment gives `None`.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(feature = "web")]
pub fn nav_links(doc: &Document, cfg: &SiteConfig) -> Vec<Element> {
    match crate::dom::select(doc, &cfg.nav_selector) {
        Some(nav) => crate::dom::select_all(&nav, &cfg.link_selector),
        None => Vec::new(),
    }
}

/// Marks the link pointing at `#id` active and clears every other link.
#[cfg(feature = "web")]
pub fn set_active_link(doc: &Document, cfg: &SiteConfig, id: &str) {
    let wanted = format!("#{id}");

    for link in nav_links(doc, cfg) {
        let href = link.get_attribute("href").unwrap_or_default();
        let classes = link.class_list();
        let _ = if href == wanted {
            classes.add_1(&cfg.active_class)
        } else {
            classes.remove_1(&cfg.active_class)
        };
    }
}

#[cfg(feature = "web")]
pub fn active_link_id(doc: &Document, cfg: &SiteConfig) -> Option<String> {
    nav_links(doc, cfg)
        .into_iter()
        .find(|l| l.class_list().contains(&cfg.active_class))
        .and_then(|l| l.get_attribute("href"))
        .and_then(|href| fragment_id(&href).map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_id() {
        assert_eq!(fragment_id("#about"), Some("about"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id(""), None);
        assert_eq!(fragment_id("/about"), None);
        assert_eq!(fragment_id("https://example.com/#x"), None);
    }
}
