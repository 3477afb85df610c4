// Pardus shell state managers
// Managers own mutable state driven by renderer callbacks: remembered page states, the login session and render state.

pub mod page_state_manager;
pub mod render_state_manager;
pub mod session_manager;
