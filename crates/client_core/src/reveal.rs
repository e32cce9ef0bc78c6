//! One-way "reveal on scroll" tracking for page sections.

pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
pub const DEFAULT_BOTTOM_MARGIN: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    /// Fraction of a section that must be inside the observed area.
    pub threshold: f64,
    /// Amount the observed area is shrunk from the viewport bottom.
    pub bottom_margin: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_REVEAL_THRESHOLD,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
        }
    }
}

/// Vertical extent in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

impl Span {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Share of `section` inside `viewport` once the viewport bottom is pulled in
/// by `bottom_margin`.
pub fn intersection_ratio(section: Span, viewport: Span, bottom_margin: f64) -> f64 {
    let area_top = viewport.top;
    let area_bottom = (viewport.bottom() - bottom_margin).max(area_top);

    if section.height <= 0.0 {
        let inside = section.top >= area_top && section.top <= area_bottom;
        return if inside { 1.0 } else { 0.0 };
    }

    let overlap = section.bottom().min(area_bottom) - section.top.max(area_top);
    (overlap.max(0.0) / section.height).min(1.0)
}

#[derive(Debug, Clone)]
pub struct RevealTracker {
    visible: Vec<bool>,
    config: RevealConfig,
}

impl RevealTracker {
    /// Without an intersection primitive every section starts revealed.
    pub fn new(section_count: usize, config: RevealConfig, observer_supported: bool) -> Self {
        Self {
            visible: vec![!observer_supported; section_count],
            config,
        }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    pub fn all_visible(&self) -> bool {
        self.visible.iter().all(|v| *v)
    }

    /// Feeds one observed ratio. Returns true only on the hidden→visible edge.
    pub fn observe(&mut self, index: usize, ratio: f64) -> bool {
        let Some(visible) = self.visible.get_mut(index) else {
            return false;
        };
        if *visible || ratio < self.config.threshold {
            return false;
        }
        *visible = true;
        true
    }

    /// Indices revealed by this scroll position.
    pub fn on_scroll(&mut self, sections: &[Span], viewport: Span) -> Vec<usize> {
        let margin = self.config.bottom_margin;
        sections
            .iter()
            .enumerate()
            .filter_map(|(index, section)| {
                let ratio = intersection_ratio(*section, viewport, margin);
                self.observe(index, ratio).then_some(index)
            })
            .collect()
    }
}
