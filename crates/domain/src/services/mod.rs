//! Domain services for Surveil.

pub mod notification;

pub use notification::{MotionAlert, MotionNotifier, NotificationResult};
