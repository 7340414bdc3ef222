use crate::config::ReplaceRule;

/// Rebuilds the address from its scrambled markup form by applying the rules
/// in order.
pub fn descramble(scrambled: &str, rules: &[ReplaceRule]) -> String {
    rules
        .iter()
        .filter(|r| !r.from.is_empty())
        .fold(scrambled.to_owned(), |text, r| {
            if r.all {
                text.replace(&r.from, &r.to)
            } else {
                text.replacen(&r.from, &r.to, 1)
            }
        })
}

#[cfg(feature = "web")]
pub use web::{ContactReveal, install, reveal};

#[cfg(feature = "web")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Result, anyhow};
    use gloo_timers::callback::Timeout;
    use web_sys::{Element, Event};

    use super::descramble;
    use crate::config::SiteConfig;
    use crate::dom::{self, EventHandle};

    const TRIGGERS: [&str; 2] = ["mouseenter", "focus"];

    #[derive(Default)]
    struct State {
        handles: Vec<EventHandle>,
        fired: bool,
    }

    /// One-shot interaction listener: the first hover or focus on the element
    /// runs the callback and removes every listener it installed.
    #[derive(Clone, Default)]
    pub struct ContactReveal {
        state: Rc<RefCell<State>>,
    }

    impl ContactReveal {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on(&self, element: &Element, decode: impl Fn() + 'static) -> Result<()> {
            let decode = Rc::new(decode);

            for event in TRIGGERS {
                let this = self.clone();
                let decode = decode.clone();
                let handle = dom::listen(element, event, false, move |_: Event| {
                    if this.claim() {
                        decode();
                    }
                })?;
                self.state.borrow_mut().handles.push(handle);
            }
            Ok(())
        }

        /// Detaches every listener. The closures are released on the next
        /// tick since one of them may be running right now.
        pub fn off(&self) {
            let handles = std::mem::take(&mut self.state.borrow_mut().handles);
            release(handles);
        }

        pub fn fired(&self) -> bool {
            self.state.borrow().fired
        }

        pub fn is_listening(&self) -> bool {
            !self.state.borrow().handles.is_empty()
        }

        // first caller wins; queued events that arrive after this see `fired`
        fn claim(&self) -> bool {
            {
                let mut s = self.state.borrow_mut();
                if s.fired {
                    return false;
                }
                s.fired = true;
            }
            self.off();
            true
        }
    }

    fn release(handles: Vec<EventHandle>) {
        if handles.is_empty() {
            return;
        }
        let closures: Vec<_> = handles.into_iter().filter_map(EventHandle::detach).collect();
        Timeout::new(0, move || drop(closures)).forget();
    }

    /// Descrambles the element's text in place and points its link at the
    /// real address.
    pub fn reveal(element: &Element, cfg: &SiteConfig) -> Result<String> {
        let text = element
            .first_child()
            .ok_or_else(|| anyhow!("contact element is empty"))?;
        let scrambled = text
            .node_value()
            .ok_or_else(|| anyhow!("contact element has no text node first"))?;

        let address = descramble(&scrambled, &cfg.scramble_rules);
        text.set_node_value(Some(&address));
        element
            .set_attribute("href", &format!("{}{}", cfg.mail_prefix, address))
            .map_err(|e| dom::js_err("set contact href", e))?;

        Ok(address)
    }

    /// Arms the reveal once the DOM is parsed. Pages without a contact
    /// element are left untouched.
    pub fn install(cfg: &SiteConfig) -> Result<()> {
        let doc = dom::document();
        let parsed = doc.ready_state() != "loading";
        let cfg = cfg.clone();
        let target = doc.clone();

        dom::when_ready(parsed, &target, "DOMContentLoaded", move || {
            let Some(element) = doc.get_element_by_id(&cfg.contact_id) else {
                log::debug!("no #{} on this page", cfg.contact_id);
                return;
            };

            let contact = element.clone();
            let armed = ContactReveal::new().on(&element, move || match reveal(&contact, &cfg) {
                Ok(address) => log::debug!("contact revealed: {address}"),
                Err(e) => log::debug!("contact left scrambled: {e:#}"),
            });
            if let Err(e) = armed {
                log::warn!("contact reveal not armed: {e:#}");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_default_rules_rebuild_address() {
        let cfg = SiteConfig::default();
        assert_eq!(
            descramble("contact me via mail", &cfg.scramble_rules),
            "contact@tom-hansen.com"
        );
    }

    #[test]
    fn test_only_first_match_for_single_rules() {
        let rules = vec![ReplaceRule::first("via", "@")];
        assert_eq!(descramble("via via", &rules), "@ via");
    }

    #[test]
    fn test_all_rule_replaces_every_match() {
        let rules = vec![ReplaceRule::all(" ", "")];
        assert_eq!(descramble(" a b  c ", &rules), "abc");
    }

    #[test]
    fn test_rules_apply_in_order() {
        // "mail" would also match inside "mailbox" if it ran first
        let rules = vec![
            ReplaceRule::first("mailbox", "me"),
            ReplaceRule::first("mail", "example.org"),
        ];
        assert_eq!(descramble("mailbox mail", &rules), "me example.org");
    }

    #[test]
    fn test_empty_pattern_is_skipped() {
        let rules = vec![ReplaceRule::first("", "x")];
        assert_eq!(descramble("abc", &rules), "abc");
    }

    #[test]
    fn test_already_plain_text_is_stable() {
        let cfg = SiteConfig::default();
        assert_eq!(descramble("hello", &cfg.scramble_rules), "hello");
    }
}
