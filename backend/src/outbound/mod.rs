//! Outbound adapters implementing domain ports.
//!
//! - **memory**: the in-memory entity store backing every repository port.
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod memory;
