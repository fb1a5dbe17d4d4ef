pub mod controller;
pub mod model;
pub mod regno;
pub mod router;
pub mod service;

pub use model::*;
pub use router::init_auth_router;
