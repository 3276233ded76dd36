//! Search state machines (pure cores with async shells).
//!
//! All state transitions are pure functions on plain structs; the async
//! shells only sequence gateway calls around them.

pub mod overlay;
pub mod pagination;
pub mod session;

// Re-export for convenience
pub use overlay::{DetailOverlay, OverlayState};
pub use pagination::total_pages;
pub use session::{SearchSession, SessionState};
