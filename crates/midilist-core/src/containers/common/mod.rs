//! Pieces shared by both list variants: the record cursor and visitor driver,
//! bounds-checked byte access, header limits and the error taxonomy.

pub(crate) mod driver;
pub mod error;
pub mod limits;
pub(crate) mod reader;

pub use driver::DecodeStatus;
pub use error::{DecodeError, EncodeError, MalformedReason};
pub use limits::Limits;
