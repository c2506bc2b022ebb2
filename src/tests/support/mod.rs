// Shared support code for the scenario tests.

pub mod common;
pub mod controllers;

pub use common::*;
