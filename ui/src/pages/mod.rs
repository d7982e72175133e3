//! Pages module for the application.
//!
//! One page per route:
//! - `login_page`: login form for signed-out users
//! - `home_page`: landing page listing the entity views
//! - `entities_page`: paginated table of one entity kind

mod entities_page;
mod home_page;
mod login_page;

pub use entities_page::entities_page;
pub use home_page::home_page;
pub use login_page::login_page;
