//! Integration tests for trmm-lam
//!
//! These tests spawn the actual binary and test end-to-end behavior.
//! None of them reach the network: every failure they exercise happens
//! before the first request.
