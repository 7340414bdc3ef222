use anyhow::{Context, Result};
use serde::Deserialize;

/// Id of the optional `<script type="application/json">` block holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// One literal substring replacement applied while descrambling the contact address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplaceRule {
    pub from: String,
    pub to: String,
    /// replace every occurrence instead of only the first
    #[serde(default)]
    pub all: bool,
}

impl ReplaceRule {
    pub fn first(from: &str, to: &str) -> Self {
        Self { from: from.to_owned(), to: to.to_owned(), all: false }
    }

    pub fn all(from: &str, to: &str) -> Self {
        Self { from: from.to_owned(), to: to.to_owned(), all: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub header_selector: String,
    pub nav_selector: String,
    pub link_selector: String,
    pub content_selector: String,
    pub active_class: String,
    pub home_id: String,

    pub scroll_debounce_ms: u32,
    pub resize_debounce_ms: u32,
    pub settle_ms: u32,

    pub contact_id: String,
    pub mail_prefix: String,
    pub scramble_rules: Vec<ReplaceRule>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header_selector: ".navbar.fixed-top".into(),
            nav_selector: "#navbarNav".into(),
            link_selector: ".nav-link".into(),
            content_selector: "#main-content".into(),
            active_class: "active".into(),
            home_id: "home".into(),

            scroll_debounce_ms: 80,
            resize_debounce_ms: 150,
            settle_ms: 300,

            contact_id: "text-interaction".into(),
            mail_prefix: "mailto:".into(),
            scramble_rules: vec![
                ReplaceRule::first("contact me", "contact"),
                ReplaceRule::first("via", "@"),
                ReplaceRule::all(" ", ""),
                ReplaceRule::first("mail", "tom-hansen.com"),
            ],
        }
    }
}

impl SiteConfig {
    pub fn from_json(src: &str) -> Result<Self> {
        serde_json::from_str(src).context("invalid site config JSON")
    }

    /// Reads overrides from the page, falling back to defaults when the block
    /// is missing or broken.
    #[cfg(feature = "web")]
    pub fn load(doc: &web_sys::Document) -> Self {
        let Some(src) = doc
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&src) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("{e:#}; using defaults");
                Self::default()
            }
        }
    }

    /// Selector matching navigation links that point at a fragment.
    pub fn fragment_link_selector(&self) -> String {
        format!("{}[href^=\"#\"]", self.link_selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_yields_defaults() {
        let cfg = SiteConfig::from_json("{}").unwrap();
        assert_eq!(cfg, SiteConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_other_fields() {
        let cfg = SiteConfig::from_json(r#"{ "scroll_debounce_ms": 40, "home_id": "top" }"#).unwrap();
        assert_eq!(cfg.scroll_debounce_ms, 40);
        assert_eq!(cfg.home_id, "top");
        assert_eq!(cfg.resize_debounce_ms, 150);
        assert_eq!(cfg.nav_selector, "#navbarNav");
    }

    #[test]
    fn test_rules_override_replaces_list() {
        let cfg = SiteConfig::from_json(
            r#"{ "scramble_rules": [ { "from": " at ", "to": "@" } ] }"#,
        )
        .unwrap();
        assert_eq!(cfg.scramble_rules, vec![ReplaceRule::first(" at ", "@")]);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(SiteConfig::from_json("{ nope").is_err());
        assert!(SiteConfig::from_json(r#"{ "settle_ms": "soon" }"#).is_err());
    }

    #[test]
    fn test_fragment_link_selector() {
        let cfg = SiteConfig::default();
        assert_eq!(cfg.fragment_link_selector(), ".nav-link[href^=\"#\"]");
    }
}
