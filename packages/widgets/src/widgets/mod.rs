//! Widgets of the console's patternfly based pages.

pub mod accordion;
pub mod breadcrumb;
pub mod button;
pub mod dropdown;
pub mod entities;
pub mod flash;
pub mod input;
pub mod navigation;
pub mod search;
pub mod summary_table;
pub mod text;
pub mod view_selector;

pub use accordion::{Accordion, Tree};
pub use breadcrumb::BreadCrumb;
pub use button::Button;
pub use dropdown::Dropdown;
pub use entities::{EntitiesList, Paginator};
pub use flash::{FlashLevel, FlashMessage, FlashMessages};
pub use input::TextInput;
pub use navigation::NavigationMenu;
pub use search::Search;
pub use summary_table::SummaryTable;
pub use text::Text;
pub use view_selector::ViewSelector;
