/// Which link a scan should activate. `None` keeps whatever is active now.
pub fn resolve_activation<'a>(best: Option<&'a str>, scroll_y: f64, home_id: &'a str) -> Option<&'a str> {
    match best {
        Some(id) => Some(id),
        // nothing in view: only the very top of the page means "home"
        None if scroll_y == 0.0 => Some(home_id),
        None => None,
    }
}

#[cfg(feature = "web")]
pub use web::NavTracker;

#[cfg(feature = "web")]
mod web {
    use std::rc::Rc;

    use anyhow::Result;
    use gloo_timers::callback::Timeout;
    use web_sys::{Document, Element, Event, MouseEvent, Window};

    use super::resolve_activation;
    use crate::config::SiteConfig;
    use crate::debounce::{Debouncer, GlooScheduler};
    use crate::dom::{self, EventHandle};
    use crate::nav::click::{Click, scroll_target, scroll_window_to};
    use crate::nav::links::{fragment_id, set_active_link};
    use crate::nav::offset::{apply_header_offset, header_height};
    use crate::nav::visibility::{SectionBox, most_visible};

    /// Keeps the navigation highlight in step with what the reader is looking at.
    pub struct NavTracker {
        cfg: SiteConfig,
        doc: Document,
        win: Window,
    }

    impl NavTracker {
        pub fn new(cfg: SiteConfig) -> Rc<Self> {
            Rc::new(Self {
                cfg,
                doc: dom::document(),
                win: dom::window(),
            })
        }

        pub fn config(&self) -> &SiteConfig {
            &self.cfg
        }

        /// Runs `start` on page load, or right away if the page already loaded.
        pub fn install(self: &Rc<Self>) -> Result<()> {
            let tracker = self.clone();
            let complete = self.doc.ready_state() == "complete";

            dom::when_ready(complete, &self.win, "load", move || {
                if let Err(e) = tracker.start() {
                    log::warn!("nav tracker not started: {e:#}");
                }
            })
        }

        /// Wires clicks, measures the header, does the first scan and
        /// subscribes to scroll and resize for the rest of the page's life.
        pub fn start(self: &Rc<Self>) -> Result<()> {
            for handle in self.attach_link_clicks()? {
                handle.forget();
            }

            self.update_offset();
            self.refresh();

            let tracker = self.clone();
            let on_scroll = Debouncer::new(GlooScheduler, self.cfg.scroll_debounce_ms, move || {
                tracker.refresh()
            });
            dom::listen(&self.win, "scroll", false, move |_: Event| on_scroll.trigger())?.forget();

            let tracker = self.clone();
            let on_resize = Debouncer::new(GlooScheduler, self.cfg.resize_debounce_ms, move || {
                tracker.relayout()
            });
            dom::listen(&self.win, "resize", false, move |_: Event| on_resize.trigger())?.forget();

            log::info!("nav tracker started");
            Ok(())
        }

        pub fn update_offset(&self) -> f64 {
            apply_header_offset(&self.doc, &self.cfg)
        }

        /// Header size may change with the viewport, so re-measure before rescanning.
        pub fn relayout(&self) {
            self.update_offset();
            self.refresh();
        }

        /// Current layout of every identified element in the content root.
        pub fn sections(&self) -> Vec<SectionBox> {
            let root: Option<Element> = dom::select(&self.doc, &self.cfg.content_selector)
                .or_else(|| self.doc.body().map(Into::into));
            let Some(root) = root else {
                return Vec::new();
            };

            dom::select_all(&root, "[id]")
                .into_iter()
                .map(|el| {
                    let rect = el.get_bounding_client_rect();
                    SectionBox::new(el.id(), rect.top(), rect.bottom())
                })
                .collect()
        }

        pub fn viewport_height(&self) -> f64 {
            self.win
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0)
        }

        /// Rescans the sections and moves the highlight.
        pub fn refresh(&self) {
            let sections = self.sections();
            if sections.is_empty() {
                return;
            }

            let header = header_height(&self.doc, &self.cfg);
            let best = most_visible(&sections, self.viewport_height(), header);
            let scroll_y = self.win.scroll_y().unwrap_or(0.0);

            if let Some(id) = resolve_activation(best, scroll_y, &self.cfg.home_id) {
                self.activate(id);
            }
        }

        pub fn activate(&self, id: &str) {
            set_active_link(&self.doc, &self.cfg, id);
        }

        /// One click listener per fragment link in the navigation container.
        pub fn attach_link_clicks(self: &Rc<Self>) -> Result<Vec<EventHandle>> {
            let Some(nav) = dom::select(&self.doc, &self.cfg.nav_selector) else {
                return Ok(Vec::new());
            };

            dom::select_all(&nav, &self.cfg.fragment_link_selector())
                .into_iter()
                .map(|link| {
                    let tracker = self.clone();
                    let target = link.clone();
                    dom::listen(&link, "click", false, move |e: MouseEvent| {
                        tracker.on_link_click(&e, &target)
                    })
                })
                .collect()
        }

        /// Where the window should scroll to bring section `id` just below
        /// the header.
        pub fn scroll_target_for(&self, id: &str) -> f64 {
            let is_home = id == self.cfg.home_id;
            let target_top = if is_home {
                None
            } else {
                self.doc.get_element_by_id(id).map(|el| self.document_top(&el))
            };

            scroll_target(target_top, header_height(&self.doc, &self.cfg), is_home)
        }

        /// Top edge of `el` measured from the top of the document.
        pub fn document_top(&self, el: &Element) -> f64 {
            el.get_bounding_client_rect().top() + self.win.scroll_y().unwrap_or(0.0)
        }

        pub fn on_link_click(self: &Rc<Self>, e: &MouseEvent, link: &Element) {
            if !Click::from_event(e).is_plain() {
                return;
            }
            e.prevent_default();

            let href = link.get_attribute("href").unwrap_or_default();
            let Some(id) = fragment_id(&href) else {
                return;
            };

            scroll_window_to(&self.win, &self.doc, self.scroll_target_for(id));

            // show the intent right away, then correct once scrolling settles
            self.activate(id);
            let tracker = self.clone();
            Timeout::new(self.cfg.settle_ms, move || tracker.refresh()).forget();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_section_wins() {
        assert_eq!(resolve_activation(Some("about"), 0.0, "home"), Some("about"));
        assert_eq!(resolve_activation(Some("about"), 420.0, "home"), Some("about"));
    }

    #[test]
    fn test_top_of_page_falls_back_to_home() {
        assert_eq!(resolve_activation(None, 0.0, "home"), Some("home"));
    }

    #[test]
    fn test_scrolled_and_nothing_visible_keeps_current() {
        assert_eq!(resolve_activation(None, 1.0, "home"), None);
        assert_eq!(resolve_activation(None, 3000.0, "home"), None);
    }
}
