pub mod api;
pub mod auth;
pub mod entities;
pub mod error;
pub mod external;
pub mod locator;
pub mod map;
pub mod session;
pub mod share;
