//! Tests for checkout orchestration.

mod mocks;
mod rpc;
