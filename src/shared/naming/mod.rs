//! Identifier to URL slug conversion.

pub mod slug;

#[cfg(test)]
mod slug_test;

pub use slug::{slugify, slugify_with, DEFAULT_SEPARATOR};
