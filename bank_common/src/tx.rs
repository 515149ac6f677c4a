use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// **The kind of a balance-affecting event**
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum TransactionKind {
    InitialDeposit,
    Deposit,
    Withdrawal,
    Interest,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionKind::InitialDeposit => "Initial Deposit",
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Interest => "Interest",
        };
        write!(f, "{name}")
    }
}

/// **A transaction record**
///
/// An immutable log entry describing one balance-affecting event.
///
/// The `amount` is the size of the event itself (for interest, the interest earned),
/// while `resulting_balance` is the account's balance right after it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionRecord {
    kind: TransactionKind,
    amount: Decimal,
    resulting_balance: Decimal,
    timestamp: DateTime<Utc>,
}

impl TransactionRecord {
    /// Creates a record stamped with the current time.
    pub fn new(kind: TransactionKind, amount: Decimal, resulting_balance: Decimal) -> Self {
        Self {
            kind,
            amount,
            resulting_balance,
            timestamp: Utc::now(),
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn resulting_balance(&self) -> Decimal {
        self.resulting_balance
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.timestamp.format("%a %b %e %T %Y"))?;
        writeln!(f, "Type: {}", self.kind)?;
        writeln!(f, "Amount: ${:.2}", self.amount)?;
        write!(f, "Balance: ${:.2}", self.resulting_balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!("Initial Deposit", TransactionKind::InitialDeposit.to_string());
        assert_eq!("Withdrawal", TransactionKind::Withdrawal.to_string());
    }

    #[test]
    fn display_shows_two_decimals() {
        let record = TransactionRecord::new(
            TransactionKind::Interest,
            Decimal::new(5, 0),
            Decimal::new(10525, 1),
        );
        let shown = record.to_string();

        assert!(shown.contains("Type: Interest"));
        assert!(shown.contains("Amount: $5.00"));
        assert!(shown.contains("Balance: $1052.50"));
    }

    #[test]
    fn serializes_decimals_as_strings() {
        let record =
            TransactionRecord::new(TransactionKind::Deposit, Decimal::new(100, 0), Decimal::new(1100, 0));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!("Deposit", json["kind"]);
        assert_eq!("100", json["amount"]);
        assert_eq!("1100", json["resulting_balance"]);
    }
}
