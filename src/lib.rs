pub mod catalog;
pub mod clock;
pub mod config;
pub mod engine;
pub mod session;
pub mod store;
