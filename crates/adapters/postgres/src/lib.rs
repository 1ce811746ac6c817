//! panel-adapter-postgres - PostgreSQL 适配器

mod connection;
mod migration;
mod transaction;

pub use connection::*;
pub use migration::*;
pub use transaction::*;
