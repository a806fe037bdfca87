//! User resource module: the in-memory user collection and its CRUD surface.
//!
//! The module is split hexagonally: a domain core behind a repository port,
//! an in-memory adapter owning the collection, and a REST layer mapping the
//! domain onto the HTTP contract.

pub mod api;
pub mod domain;
pub mod infra;
