//! Widget layer of the console page objects.
//!
//! Page objects never talk to a browser directly. They hold widgets, each
//! built from a [`Page`] and the locator data identifying one region of the
//! document, and the widgets translate reads and interactions into calls on
//! the [`Browser`] trait. Any driver (a WebDriver client, a recorded session,
//! the simulated console used in tests) plugs in by implementing `Browser`.

pub mod browser;
pub mod error;
pub mod page;
pub mod view;
pub mod widgets;

pub use browser::{xpath_literal, Browser, Element, Locator};
pub use error::{BrowserError, WidgetError};
pub use page::Page;
pub use view::{downcast_view, view_ref, AsAny, View};
pub use widgets::*;
