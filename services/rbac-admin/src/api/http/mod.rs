//! HTTP 接口

mod extract;
mod routes;

pub use extract::{Params, Payload, PathId};
pub use routes::role_routes;
