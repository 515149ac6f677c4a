use crate::constants::{
    CHECKING_INTEREST_RATE_PERCENT, MIN_BALANCE, SAVINGS_INTEREST_RATE_PERCENT,
};
use crate::errors::{AccountingError, NON_POSITIVE_AMOUNT_MSG, OVERFLOW_MSG};
use crate::tx::{TransactionKind, TransactionRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// **The type of an account**
///
/// It determines the interest rate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum AccountType {
    /// Earns 5% interest
    Savings,
    /// Earns 2% interest
    Checking,
}

impl AccountType {
    pub fn interest_rate(&self) -> Decimal {
        match self {
            AccountType::Savings => Decimal::new(SAVINGS_INTEREST_RATE_PERCENT, 2),
            AccountType::Checking => Decimal::new(CHECKING_INTEREST_RATE_PERCENT, 2),
        }
    }

    /// The numeric code used by the persisted store
    pub fn code(&self) -> u8 {
        match self {
            AccountType::Savings => 0,
            AccountType::Checking => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(AccountType::Savings),
            1 => Some(AccountType::Checking),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Savings => write!(f, "Savings"),
            AccountType::Checking => write!(f, "Checking"),
        }
    }
}

/// **A bank account**
///
/// Owns its identity, its balance and its transaction history.
///
/// The balance always equals the resulting balance of the most recent record,
/// and the history is never empty: it starts with the initial deposit.
/// Every mutation appends exactly one record, or fails and changes nothing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Account {
    account_number: u64,
    first_name: String,
    last_name: String,
    #[serde(skip_serializing)]
    password: String,
    balance: Decimal,
    account_type: AccountType,
    history: Vec<TransactionRecord>,
}

impl Account {
    /// **Opens an account under the given, already allocated, number.**
    ///
    /// Seeds the history with an initial deposit of `initial_balance`.
    /// The initial balance isn't validated here; that is up to the caller.
    pub fn open(
        account_number: u64,
        first_name: &str,
        last_name: &str,
        password: &str,
        initial_balance: Decimal,
        account_type: AccountType,
    ) -> Self {
        Account {
            account_number,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password: password.to_string(),
            balance: initial_balance,
            account_type,
            history: vec![TransactionRecord::new(
                TransactionKind::InitialDeposit,
                initial_balance,
                initial_balance,
            )],
        }
    }

    pub fn account_number(&self) -> u64 {
        self.account_number
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    /// Only the serializer gets to see the secret.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// **Deposits a positive `amount`**
    ///
    /// # Errors
    /// - Non-positive amount, or the balance would overflow, `AccountingError::InvalidInput`
    pub fn deposit(&mut self, amount: Decimal) -> Result<TransactionRecord, AccountingError> {
        if amount <= Decimal::ZERO {
            return Err(AccountingError::InvalidInput(NON_POSITIVE_AMOUNT_MSG.to_string()));
        }

        let balance = self.balance.checked_add(amount).ok_or_else(overflow)?;
        Ok(self.apply(TransactionKind::Deposit, amount, balance))
    }

    /// **Withdraws a positive `amount`, as long as the minimum balance is kept**
    ///
    /// # Errors
    /// - Non-positive amount, or the balance would overflow, `AccountingError::InvalidInput`;
    /// - Balance would drop below [`MIN_BALANCE`], `AccountingError::InsufficientFunds`.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<TransactionRecord, AccountingError> {
        if amount <= Decimal::ZERO {
            return Err(AccountingError::InvalidInput(NON_POSITIVE_AMOUNT_MSG.to_string()));
        }

        let remaining = self.balance.checked_sub(amount).ok_or_else(overflow)?;
        if remaining < Decimal::from(MIN_BALANCE) {
            return Err(AccountingError::InsufficientFunds {
                account: self.account_number,
                amount,
                balance: self.balance,
            });
        }

        Ok(self.apply(TransactionKind::Withdrawal, amount, remaining))
    }

    /// **Credits the interest for the account's type**
    ///
    /// The recorded amount is the interest earned, not the new balance.
    ///
    /// # Errors
    /// - The balance would overflow, `AccountingError::InvalidInput`
    pub fn calculate_interest(&mut self) -> Result<TransactionRecord, AccountingError> {
        let interest = self
            .balance
            .checked_mul(self.account_type.interest_rate())
            .ok_or_else(overflow)?;
        let balance = self.balance.checked_add(interest).ok_or_else(overflow)?;
        Ok(self.apply(TransactionKind::Interest, interest, balance))
    }

    /// Plain equality, no hashing.
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// The history in chronological order
    pub fn transaction_history(&self) -> &[TransactionRecord] {
        &self.history
    }

    /// Sets the balance and appends its record in one step.
    fn apply(&mut self, kind: TransactionKind, amount: Decimal, balance: Decimal) -> TransactionRecord {
        let record = TransactionRecord::new(kind, amount, balance);
        self.balance = balance;
        self.history.push(record.clone());
        record
    }
}

fn overflow() -> AccountingError {
    AccountingError::InvalidInput(OVERFLOW_MSG.to_string())
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "First Name: {}", self.first_name)?;
        writeln!(f, "Last Name: {}", self.last_name)?;
        writeln!(f, "Account Number: {}", self.account_number)?;
        writeln!(f, "Account Type: {}", self.account_type)?;
        write!(f, "Balance: ${:.2}", self.balance)
    }
}
