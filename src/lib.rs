pub mod api;
pub mod config;
pub mod credentials;
pub mod exit;
pub mod fetch;
pub mod output;
pub mod scoring;
pub mod snapshot;
