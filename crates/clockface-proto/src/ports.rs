//! Port definitions for the clock display updater.
//!
//! The updater never reads the system clock, formats dates or touches an
//! output device directly. It goes through these traits so hosts and tests can
//! supply their own implementations.

pub mod clock;
pub mod display;
pub mod format;

pub use clock::WallClock;
pub use display::{DisplayError, DisplaySurface};
pub use format::{DateTimeFormatter, FormatError};
