//! Authentication domain models.

pub mod model;

pub use model::{AuthState, User};
