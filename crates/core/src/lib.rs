//! Core accounting logic for Kassa.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Double-entry journal validation and business-event mapping
//! - `reports` - Derived report arithmetic (ledger, trial balance, P&L, overview)

pub mod ledger;
pub mod reports;
