//! Domain models for Surveil.

pub mod device;
pub mod motion_event;
pub mod pairing;
pub mod recording;
pub mod user;

pub use device::Device;
pub use motion_event::MotionEvent;
pub use pairing::PendingClaim;
pub use recording::Recording;
pub use user::{User, UserRole};
