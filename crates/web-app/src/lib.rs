#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod chart;
pub mod dashboard;
pub mod html;
pub mod log;
pub mod settings;

pub use settings::{Settings, SettingsError, Theme};
