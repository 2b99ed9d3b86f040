//! `SeaORM` entity definitions for the ledger schema.

pub mod accounts;
pub mod journal_lines;
pub mod journals;
pub mod sea_orm_active_enums;
pub mod transactions;
