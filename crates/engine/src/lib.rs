//! Pure poll-cycle logic: response validation, status rendering and
//! notification deduplication. Nothing in this crate performs I/O.

pub mod catalog;
pub mod dedup;
pub mod renderer;
pub mod validator;
