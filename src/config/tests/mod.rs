//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `operation_mode`: Mode parsing tests
//! - `field_resolution`: Environment fallbacks and derived settings

mod helpers;
