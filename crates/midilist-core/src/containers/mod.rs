//! Container decoding modules.
//!
//! Each list variant follows a layered structure:
//! - `layout`: byte offsets and sizes (source of truth)
//! - `reader`: safe byte access and variant conventions (padding, units)
//! - `parser`: list and packet views (no direct byte indexing)
//! - `builder`: assembles lists in the layout the parser reads
//!
//! Both variants share the record cursor and visitor driver in `common`.
//! Decoding is pure: no I/O and no allocation.

pub mod common;
pub mod legacy;
pub mod universal;
