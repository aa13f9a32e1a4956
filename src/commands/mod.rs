//! Command implementations for vaultnorm

pub mod check;
pub mod dispatch;
pub mod helpers;
pub mod normalize;
pub mod resolve;
