//! # Shared Types Crate
//!
//! This crate contains the block-level entities exchanged between the
//! epoch-start pipeline, block assembly and block verification.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Big-integer amounts**: Every value is a `U256`; no floating point
//!   type appears in a consensus-visible structure.
//! - **Ordered shards**: The coordinator shard id sorts after every normal
//!   shard, so ordered maps keyed by shard iterate identically everywhere.

pub mod entities;

pub use entities::*;
