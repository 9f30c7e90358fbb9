pub mod client;
pub mod config;
pub mod observability;
pub mod status;
pub mod watch;
