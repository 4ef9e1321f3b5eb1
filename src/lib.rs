pub(crate) mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod observability;
pub mod protocol;
pub mod routing;
pub mod state;
pub mod transport;
