pub mod book;
pub mod errors;
pub mod permissions;
pub mod stock;

pub use book::*;
pub use errors::*;
pub use permissions::PermissionMask;
pub use stock::*;
