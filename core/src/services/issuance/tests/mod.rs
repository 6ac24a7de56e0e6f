//! Tests for the issuance service

mod mocks;
