//! HTTP request handlers.

pub mod fallback;
pub mod health;
pub mod redirect;

pub use fallback::{default_fallback, hello_handler};
pub use health::health_handler;
pub use redirect::redirect_handler;
