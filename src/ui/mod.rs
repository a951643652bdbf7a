/// Rendering collaborators. They read view models from
/// [`crate::state::DashboardState`] and report interactions back through its
/// event handlers.
pub mod panels;
pub mod pie;
pub mod plot;
pub mod table;
