//! Shared domain types.

pub mod permission;
pub mod roster;

pub use permission::Permission;
pub use roster::{Group, User};
