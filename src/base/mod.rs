//! Pages shared by every area of the console: login and the logged-in frame.

pub mod server;
pub mod views;

pub use server::Server;
pub use views::{BaseLoggedInPage, LoginPage};
