// Pardus shell shared type definitions
// Each submodule defines types used across the engine.

pub mod address;
pub mod device;
pub mod errors;
pub mod navigation;
pub mod page;
pub mod session;
pub mod settings;
