//! Participant pool and segment colours

pub mod palette;
pub mod participants;

pub use palette::{Palette, VIBRANT_COLORS};
pub use participants::{Roster, MAX_PARTICIPANTS};
