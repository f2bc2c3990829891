//! # gfiles-entity
//!
//! Domain entity models for G-FILES. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod contact;
pub mod department;
pub mod report;
pub mod scan;
pub mod sharing;
pub mod user;
