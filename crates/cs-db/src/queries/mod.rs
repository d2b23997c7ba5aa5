//! Database query modules.

pub mod accounts;
pub mod children;
pub mod creatures;
