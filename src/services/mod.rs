pub mod detect_service;
pub mod lookup_service;
pub mod resolver_service;

pub use detect_service::*;
pub use lookup_service::*;
pub use resolver_service::*;
