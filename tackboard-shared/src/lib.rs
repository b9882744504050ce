//! # Tackboard Shared Library
//!
//! Core functionality shared by the Tackboard API server and tooling.
//!
//! ## Modules
//!
//! - `db`: Connection pool and migration management
//! - `models`: Database models and CRUD operations
//! - `ordering`: Position-reordering algorithm for columns and tasks
//! - `activity`: Best-effort activity logging

pub mod activity;
pub mod db;
pub mod models;
pub mod ordering;
