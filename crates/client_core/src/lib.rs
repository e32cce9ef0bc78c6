//! Interaction core of the portfolio site: every piece of page behaviour as
//! plain state plus a view model, independent of any rendering layer.

pub mod carousel;
pub mod contact_form;
pub mod nav;
pub mod notification;
pub mod page;
pub mod reveal;
pub mod transport;
pub mod validation;

pub use carousel::{Carousel, CarouselConfig, CarouselEvent, CarouselView};
pub use contact_form::{ContactForm, SubmitOutcome};
pub use notification::{NotificationPresenter, NotificationTiming};
pub use page::{Page, PageSetup};
pub use transport::{ContactTransport, HttpContactTransport};
