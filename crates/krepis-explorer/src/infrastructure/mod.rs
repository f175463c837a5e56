//! Infrastructure Layer - External Technology Stack
//!
//! This module contains concrete implementations that depend on
//! external libraries.
//!
//! # Responsibilities
//! - Deterministic pseudo-random generation (`rand` + `rand_chacha`)

pub mod rng;

pub use rng::DetRng;
