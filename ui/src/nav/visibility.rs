/// Vertical extent of a section, in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
}

impl SectionBox {
    pub fn new(id: impl Into<String>, top: f64, bottom: f64) -> Self {
        Self { id: id.into(), top, bottom }
    }

    /// Pixels of this section visible between the header and the bottom of
    /// the viewport. Never negative.
    pub fn visible_span(&self, viewport_height: f64, header_offset: f64) -> f64 {
        let top = self.top.max(header_offset);
        let bottom = self.bottom.min(viewport_height);
        (bottom - top).max(0.0)
    }
}

/// Id of the section covering the most viewport pixels. Equal spans keep the
/// earlier section; `None` when nothing is visible.
pub fn most_visible(sections: &[SectionBox], viewport_height: f64, header_offset: f64) -> Option<&str> {
    let mut best: Option<(&str, f64)> = None;

    for sec in sections {
        let span = sec.visible_span(viewport_height, header_offset);
        let leading = best.map_or(0.0, |(_, s)| s);
        if span > leading {
            best = Some((sec.id.as_str(), span));
        }
    }

    best.map(|(id, _)| id)
}
