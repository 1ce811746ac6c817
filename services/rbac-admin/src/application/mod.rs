//! 应用层

pub mod role;
