pub mod authorization;
pub mod book;
mod dependencies;
pub mod stock;

pub use authorization::{AuthorizationError, authorize};
pub use dependencies::ServiceDependencies;
