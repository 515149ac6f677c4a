//! The flat-file format of the persisted store
//!
//! Every account takes six lines, and accounts are concatenated
//! without any header or separator:
//!
//! ```text
//! <account number>
//! <first name>
//! <last name>
//! <password>
//! <balance>
//! <account type: 0 = Savings, 1 = Checking>
//! ```
//!
//! Transaction history isn't part of the format.

use crate::accounts::{Account, AccountType};
use crate::constants::RECORD_LINES;
use crate::errors::StorageError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// **Encodes a single account into its six lines**
pub fn encode_account(account: &Account) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}\n",
        account.account_number(),
        account.first_name(),
        account.last_name(),
        account.password(),
        account.balance(),
        account.account_type().code(),
    )
}

/// **Encodes all given accounts, in iteration order**
pub fn encode_accounts<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> String {
    accounts.into_iter().map(encode_account).collect()
}

/// **Decodes the whole contents of a store, in file order**
///
/// Blank lines are skipped. Each decoded account's history is re-seeded
/// with a single initial deposit equal to its stored balance.
///
/// # Errors
/// - Truncated record, non-numeric account number or balance,
///   or unknown account type, `StorageError::Malformed`
pub fn decode_accounts(input: &str) -> Result<Vec<Account>, StorageError> {
    let lines: Vec<(usize, &str)> = input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    lines
        .chunks(RECORD_LINES)
        .map(|record| {
            if record.len() < RECORD_LINES {
                return Err(StorageError::Malformed {
                    line: record[0].0,
                    reason: format!(
                        "truncated record; expected {} lines, found {}",
                        RECORD_LINES,
                        record.len()
                    ),
                });
            }
            decode_record(record)
        })
        .collect()
}

fn decode_record(record: &[(usize, &str)]) -> Result<Account, StorageError> {
    let (number_line, number) = record[0];
    let account_number = number.parse::<u64>().map_err(|_| StorageError::Malformed {
        line: number_line,
        reason: format!("invalid account number '{}'", number),
    })?;

    let (balance_line, balance) = record[4];
    let balance = Decimal::from_str(balance).map_err(|_| StorageError::Malformed {
        line: balance_line,
        reason: format!("invalid balance '{}'", balance),
    })?;

    let (type_line, code) = record[5];
    let account_type = code
        .parse::<u8>()
        .ok()
        .and_then(AccountType::from_code)
        .ok_or_else(|| StorageError::Malformed {
            line: type_line,
            reason: format!("invalid account type '{}'", code),
        })?;

    Ok(Account::open(
        account_number,
        record[1].1,
        record[2].1,
        record[3].1,
        balance,
        account_type,
    ))
}
