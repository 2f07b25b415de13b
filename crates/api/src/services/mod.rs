//! External service integrations.

pub mod email;
pub mod storage;

pub use email::EmailService;
pub use storage::RecordingStore;
