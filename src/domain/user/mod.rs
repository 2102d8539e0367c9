// User domain module
// Contains the user aggregate root and its value objects

#![allow(clippy::module_inception)]

pub mod user;
pub mod value_objects;

// Re-export main types for convenience
pub use user::{User, UserDto, UserRecord};
pub use value_objects::Role;
