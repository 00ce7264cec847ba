pub mod adapters;
pub mod config;
pub mod event_bus;
pub mod host;
pub mod module_context;
pub mod modules;

#[cfg(test)]
mod test_utils;

pub use module_context::{ModuleContext, ModuleEventSender};
