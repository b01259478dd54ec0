//! Investment ledger module - domain models, services, and traits.
//!
//! The ledger is append-only: entries are written once and never updated
//! or deleted, matching a financial-record audit requirement. No update or
//! delete operation exists at any layer.

mod investments_model;
mod investments_service;
mod investments_traits;

#[cfg(test)]
mod investments_model_tests;


pub use investments_model::{Investment, NewInvestment, PortfolioSummary};
pub use investments_service::InvestmentService;
pub use investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
