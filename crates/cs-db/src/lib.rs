//! cs-db: persistence for accounts and their creatures.
//!
//! This crate provides SQLite-backed storage with connection pooling,
//! embedded migrations, the row mappings for every table, and the
//! aggregate loader/saver that assemble and flush whole creatures.
//! [`AccountRepository`] is the entry point the world layer calls at
//! login and logout.

pub mod loader;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
pub mod repository;
pub mod saver;

pub use repository::AccountRepository;
