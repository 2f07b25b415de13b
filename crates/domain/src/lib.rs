//! Domain layer for the Surveil backend.
//!
//! This crate contains:
//! - Domain models (User, Device, Recording, MotionEvent)
//! - Device token generation
//! - Notification contracts

pub mod models;
pub mod services;
pub mod token;
