//! HTTP route handlers.

pub mod camera;
pub mod devices;
pub mod health;
pub mod motion_events;
pub mod pairing;
pub mod recordings;
