// Library target for benchmarks and integration tests.
// The binary entry point is main.rs; this file re-declares the module tree so
// that harnesses can import types via `typing_vibes::engine::*` and friends.
// The terminal shell is only exercised through the binary, so suppress
// dead_code warnings.
#![allow(dead_code)]

// Public: used directly by benchmarks and tests/
pub mod config;
pub mod engine;
pub mod generator;
pub mod session;

// Private: the terminal shell
mod app;
mod event;
mod logging;
mod ui;
