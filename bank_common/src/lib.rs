pub mod accounts;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod errors;
pub mod ledger;
pub mod tx;
pub mod validation;

pub use accounts::{Account, AccountType};
pub use ledger::Ledger;
