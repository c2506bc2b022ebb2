//! Dependency injection for controller classes.

pub mod depends;
pub mod extract;

#[cfg(test)]
mod depends_test;

pub use depends::{Depends, Injected, Scope};
pub use extract::{Dep, ExtractRejection, This};
