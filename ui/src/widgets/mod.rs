pub mod data_table;
mod login;
mod nav;
mod pagination;

pub use data_table::{EMPTY_STATE, data_table};
pub use login::{APP_TITLE, login_widget};
pub use nav::nav_bar;
pub use pagination::pagination_control;
