pub mod drag;
pub mod grid;
pub mod layout;
pub mod log;
pub mod schedule;
pub mod viewport;
pub mod zone_editor;
