//! Implementations of the `clockface-proto` ports.

mod chrono_formatter;
mod document;
mod system_clock;
mod terminal;

pub use chrono_formatter::ChronoFormatter;
pub use document::Document;
pub use system_clock::SystemClock;
pub use terminal::{TerminalMode, TerminalSurface};
