//! 领域层

pub mod role;
