pub mod api;
pub mod chapter;
pub mod config;
pub mod extract;
pub mod humanize;
pub mod observability;
pub mod proxy;
pub mod upstream;
