//! Page bootstrap: independent initializers composed in a fixed order.

use tracing::debug;

use crate::{
    carousel::{Carousel, CarouselConfig},
    contact_form::ContactForm,
    nav::{AnchorNavigator, NavMenu, DEFAULT_NAV_HEIGHT},
    notification::{NotificationPresenter, NotificationTiming},
    reveal::{RevealConfig, RevealTracker},
    transport::ContactTransport,
    validation::EmailShape,
};

/// What the page offers to the initializers.
pub struct PageSetup<S, T> {
    pub slides: Vec<S>,
    pub section_count: usize,
    pub observer_supported: bool,
    pub nav_height: f64,
    /// `None` when the page has no contact form.
    pub contact_transport: Option<T>,
    pub carousel: CarouselConfig,
    pub reveal: RevealConfig,
    pub notification_timing: NotificationTiming,
    pub email_shape: EmailShape,
}

impl<S, T> PageSetup<S, T> {
    pub fn new(slides: Vec<S>, section_count: usize, contact_transport: Option<T>) -> Self {
        Self {
            slides,
            section_count,
            observer_supported: true,
            nav_height: DEFAULT_NAV_HEIGHT,
            contact_transport,
            carousel: CarouselConfig::default(),
            reveal: RevealConfig::default(),
            notification_timing: NotificationTiming::default(),
            email_shape: EmailShape::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initializer {
    Navigation,
    AnchorScrolling,
    SectionReveal,
    Carousel,
    ContactForm,
}

pub const INITIALIZERS: [Initializer; 5] = [
    Initializer::Navigation,
    Initializer::AnchorScrolling,
    Initializer::SectionReveal,
    Initializer::Carousel,
    Initializer::ContactForm,
];

/// Every interactive component of one page load.
pub struct Page<S, T> {
    pub nav: NavMenu,
    pub anchors: AnchorNavigator,
    pub reveal: RevealTracker,
    pub carousel: Option<Carousel<S>>,
    pub contact: Option<ContactForm<T>>,
    pub notifications: NotificationPresenter,
    initialized: Vec<Initializer>,
}

impl<S, T: ContactTransport> Page<S, T> {
    pub fn initialize(setup: PageSetup<S, T>) -> Self {
        let PageSetup {
            slides,
            section_count,
            observer_supported,
            nav_height,
            contact_transport,
            carousel,
            reveal,
            notification_timing,
            email_shape,
        } = setup;

        let notifications = NotificationPresenter::new(notification_timing);
        let mut page = Self {
            nav: NavMenu::default(),
            anchors: AnchorNavigator::new(nav_height),
            reveal: RevealTracker::new(0, reveal, observer_supported),
            carousel: None,
            contact: None,
            notifications,
            initialized: Vec::with_capacity(INITIALIZERS.len()),
        };

        let mut slides = Some(slides);
        let mut contact_transport = contact_transport;
        let mut email_shape = Some(email_shape);
        for step in INITIALIZERS {
            let ran = match step {
                Initializer::Navigation => {
                    page.nav = NavMenu::default();
                    true
                }
                Initializer::AnchorScrolling => {
                    page.anchors = AnchorNavigator::new(nav_height);
                    true
                }
                Initializer::SectionReveal => {
                    page.reveal = RevealTracker::new(section_count, reveal, observer_supported);
                    true
                }
                Initializer::Carousel => {
                    page.carousel = slides
                        .take()
                        .and_then(|slides| Carousel::initialize(slides, carousel));
                    page.carousel.is_some()
                }
                Initializer::ContactForm => {
                    page.contact = contact_transport.take().map(|transport| {
                        ContactForm::with_email_shape(
                            transport,
                            page.notifications.clone(),
                            email_shape.take().unwrap_or_default(),
                        )
                    });
                    page.contact.is_some()
                }
            };
            if ran {
                page.initialized.push(step);
            }
            debug!(?step, ran, "page initializer");
        }
        page
    }

    /// Initializers that found something to set up, in execution order.
    pub fn initialized(&self) -> &[Initializer] {
        &self.initialized
    }
}
