//! # Domain Module
//!
//! Records, engine state and invariants of the epoch rewards subsystem.

pub mod entities;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use value_objects::*;
