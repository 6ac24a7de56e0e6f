//! Authoritative in-process store for outstanding OTP records

pub mod otp_store;

pub use otp_store::OtpStore;
