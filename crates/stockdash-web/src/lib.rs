pub mod chart;
pub mod cli;
pub mod config;
pub mod controller;
pub mod server;

pub use crate::chart::Chart;
pub use crate::config::Settings;
pub use crate::controller::{Dashboard, Selection};
pub use crate::server::{routes, serve, templates};
