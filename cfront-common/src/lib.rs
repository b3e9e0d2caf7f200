//! C translator front end - common types and utilities
//! 
//! This crate contains the pieces shared by every layer of the front end:
//! node identities, source positions, and the error taxonomy used by the
//! syntax graph, its walker, its printer and the wire codec.

pub mod error;
pub mod ids;
pub mod source_loc;

pub use error::{FormatError, FrontendError, StructuralError};
pub use ids::{NodeId, NodeIdGenerator};
pub use source_loc::{HasSpan, SourceLocation, SourceSpan};
