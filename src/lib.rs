//! Pardus shell: session and page-state engine of a mobile client for the
//! Pardus browser game.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod host;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;
