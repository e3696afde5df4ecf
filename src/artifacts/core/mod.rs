//! Core utilities and shared types
//!
//! This module contains types shared across the application:
//!
//! - `error`: User-facing error outcomes, distinguished from fatal internal failures

pub mod error;
