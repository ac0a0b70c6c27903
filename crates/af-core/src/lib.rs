//! # af-core
//!
//! Core types, ID prefixes, and error types for AcademyFlow.
//!
//! This crate provides the foundational types shared across all AcademyFlow crates:
//! - Entity structs for every persisted object (slots, recurring events, groups, etc.)
//! - Enums for days of the week, audience scopes, statuses, and roles
//! - ID prefix constants
//! - Cross-cutting error types
//! - The explicit session context passed into store calls
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod responses;
