//! HTTP request handlers for API endpoints.

pub mod delete;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use delete::delete_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
