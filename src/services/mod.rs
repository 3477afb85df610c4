// Pardus shell services
// Stateless or configuration-level functionality: address normalization,
// navigation rules and persisted settings.

pub mod navigation_policy;
pub mod page_identity;
pub mod settings_engine;
