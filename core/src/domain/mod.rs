pub mod analysis;
pub mod common;
pub mod media;
pub mod session;
