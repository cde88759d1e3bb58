//! # Ports
//!
//! Inbound API and outbound dependencies of the epoch rewards subsystem.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
