//! Core business logic for Centry.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and reconciliation calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Balance/goal reconciliation and recurring-date projection

pub mod ledger;
