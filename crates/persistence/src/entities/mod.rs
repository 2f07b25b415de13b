//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod device;
pub mod motion_event;
pub mod pairing_claim;
pub mod recording;
pub mod user;

pub use device::DeviceEntity;
pub use motion_event::MotionEventEntity;
pub use pairing_claim::PairingClaimEntity;
pub use recording::RecordingEntity;
pub use user::UserEntity;
