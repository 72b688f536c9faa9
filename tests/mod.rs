//! Test suite for devconnect
//!
//! This module organizes all tests

pub mod common;
pub mod property;
