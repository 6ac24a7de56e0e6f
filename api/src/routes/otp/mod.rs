//! OTP issuance routes

mod send_code;

pub use send_code::{send_code, AppState};
