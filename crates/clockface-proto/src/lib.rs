//! Shared contracts for clockface: configuration types and the ports the
//! updater talks to.

pub mod config;
pub mod ports;
