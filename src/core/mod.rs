//! # Core
//!
//! Pure data types shared by every subsystem.
//!
//! Contains:
//! - `Value` - the dynamic value type flowing through rules and dispatch
//! - `DomainError` - invalid numeric domain inputs

pub mod error;
pub mod value;

pub use error::DomainError;
pub use value::Value;
