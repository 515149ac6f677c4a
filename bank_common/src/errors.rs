//! Application-specific error types

use crate::constants::MIN_BALANCE;
use rust_decimal::Decimal;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// **An application-specific error type**
///
/// Business-rule violations of account and ledger operations.
#[derive(Debug, Error, PartialEq)]
pub enum AccountingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Account {0} doesn't exist")]
    AccountNotFound(u64),

    #[error("Invalid password")]
    InvalidPassword,

    #[error(
        "Insufficient funds in account {account}: withdrawing {amount} from {balance} \
         would drop it below the minimum balance of {min}",
        min = MIN_BALANCE
    )]
    InsufficientFunds {
        account: u64,
        amount: Decimal,
        balance: Decimal,
    },
}

/// **Failures of the persisted store**
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access the data file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed record at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// **Errors of ledger operations that can touch the persisted store**
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Accounting(#[from] AccountingError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub const TOKEN_NOT_VALID_MSG: &str = "Names and passwords must be single words";
pub const NON_POSITIVE_AMOUNT_MSG: &str = "The amount must be positive";
pub const OVERFLOW_MSG: &str = "The resulting balance is out of range";
