pub mod config;
pub mod devices;
pub mod record;
pub mod setup;
pub mod show;
pub mod transcribe;
