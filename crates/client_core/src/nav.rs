//! Mobile navigation menu state and in-page anchor scrolling.

use tracing::trace;

pub const DEFAULT_NAV_HEIGHT: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    TogglePressed,
    OutsideClick,
    EscapePressed,
    LinkActivated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavMenuView {
    pub open: bool,
    pub scroll_locked: bool,
    pub aria_expanded: &'static str,
}

pub fn next_open(open: bool, event: NavEvent) -> bool {
    match event {
        NavEvent::TogglePressed => !open,
        NavEvent::OutsideClick | NavEvent::EscapePressed | NavEvent::LinkActivated => false,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn handle(&mut self, event: NavEvent) -> NavMenuView {
        self.open = next_open(self.open, event);
        trace!(?event, open = self.open, "nav menu transition");
        self.view()
    }

    pub fn view(&self) -> NavMenuView {
        NavMenuView {
            open: self.open,
            scroll_locked: self.open,
            aria_expanded: if self.open { "true" } else { "false" },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnchorScroll {
    pub target_id: String,
    pub scroll_top: f64,
    pub behavior: ScrollBehavior,
    /// New address fragment, including the leading `#`.
    pub fragment: String,
    pub focus_target: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct AnchorNavigator {
    nav_height: f64,
}

impl Default for AnchorNavigator {
    fn default() -> Self {
        Self::new(DEFAULT_NAV_HEIGHT)
    }
}

impl AnchorNavigator {
    pub fn new(nav_height: f64) -> Self {
        Self { nav_height }
    }

    /// Plans the scroll for a same-page link. `element_top` yields the
    /// target's top relative to the viewport. Links that are not `#id`
    /// fragments, or whose target is missing, are left to the browser.
    pub fn activate(
        &self,
        menu: &mut NavMenu,
        href: &str,
        scroll_y: f64,
        element_top: impl Fn(&str) -> Option<f64>,
    ) -> Option<AnchorScroll> {
        let target_id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
        let top = element_top(target_id)?;
        menu.handle(NavEvent::LinkActivated);

        Some(AnchorScroll {
            target_id: target_id.to_string(),
            scroll_top: (top + scroll_y - self.nav_height).max(0.0),
            behavior: ScrollBehavior::Smooth,
            fragment: format!("#{target_id}"),
            focus_target: true,
        })
    }
}
