//! Sidescroll Core - Core types and utilities for the sidescroll stack
//!
//! This crate provides the foundational pieces used throughout the game:
//! - Mathematical primitives (re-exported from glam)
//! - Time system driving the frame/fixed-step loop

pub mod time;

pub use glam::Vec2;
pub use time::{GameTime, TimeConfig};
