//! Repository implementations for database operations.

pub mod device;
pub mod motion_event;
pub mod pairing_claim;
pub mod recording;
pub mod user;

pub use device::{is_unique_violation, DeviceRepository};
pub use motion_event::{MotionEventInput, MotionEventRepository};
pub use pairing_claim::PairingClaimRepository;
pub use recording::{RecordingInput, RecordingRepository};
pub use user::UserRepository;
