//! Scenario tests for class-based controllers.
//!
//! Each suite builds controller classes, mounts them into axum routers and
//! checks the resolved routes or the responses they give.

mod cases_depends_test;

pub mod support;
