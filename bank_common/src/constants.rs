//! Business constants of the ledger

/// The floor below which a withdrawal is rejected
pub const MIN_BALANCE: u64 = 500;

/// Yearly interest rate of a savings account, in percent
pub const SAVINGS_INTEREST_RATE_PERCENT: i64 = 5;

/// Yearly interest rate of a checking account, in percent
pub const CHECKING_INTEREST_RATE_PERCENT: i64 = 2;

/// The admin secret; it is fixed and not user-configurable.
pub const ADMIN_PASSWORD: &str = "admin123";

/// Various persistence constants

pub const DEFAULT_DATA_FILE: &str = "Bank.data";
pub const DATA_FILE_ENV: &str = "BANK_DATA_FILE";

/// Number of lines that make up a single persisted account record
pub const RECORD_LINES: usize = 6;
