pub mod deploy;
pub mod pull;
pub mod remove;
pub mod status;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NO_BACKEND: u8 = 2;
