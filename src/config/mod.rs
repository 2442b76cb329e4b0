//! Configuration — where the master key lives.

pub mod settings;

pub use settings::Settings;
