//! Wire and domain types shared by the document client and its front ends.

#[macro_use]
pub mod domain;
pub mod error;
pub mod query;
