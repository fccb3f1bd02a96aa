//! Split-window geometry.
//!
//! Picks the monitor that holds the invoking window and divides its work
//! area into two half-width windows that overlap slightly in the middle,
//! so the frames of the two windows hide the seam between them.

pub mod layout;

pub use layout::{LayoutEngine, SplitLayout, DEFAULT_OVERLAP};
