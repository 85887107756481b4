//! Request extractors.

pub mod payload;
pub mod principal;
pub use payload::Payload;
pub use principal::Principal;
