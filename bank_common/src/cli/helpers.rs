//! Helper functions that are common to CLI apps

use crate::accounts::AccountType;
use crate::cli::constants::*;
use crate::errors::TOKEN_NOT_VALID_MSG;
use crate::validation;
use rust_decimal::Decimal;
use std::io::{stdin, stdout, Write};
use std::str::FromStr;

/// **Contains full variants of all existing commands.**
///
/// Wrapped by `help()` so we can unit-test the contents,
/// so that we don't forget to include a newly-added command to help.
fn help_contents_full() -> String {
    let msg = format!(
        "{HELP} {OPEN} {BALANCE} {DEPOSIT} {WITHDRAW} {CLOSE} {ACCOUNTS} \
         {HISTORY} {INTEREST} {EXPORT} {QUIT}"
    );
    msg
}

/// **Contains short variants of all existing commands.**
///
/// Wrapped by `help()` so we can unit-test the contents,
/// so that we don't forget to include a newly-added command to help.
fn help_contents_short() -> String {
    "h o b d w c a t i e q".to_string()
}

/// **Prints all existing commands in their full and short variants.**
pub fn help() {
    println!("{}", help_contents_full());
    println!("{}", help_contents_short());
}

/// **A line of user input**
#[derive(Debug, PartialEq)]
pub enum Input {
    Line(String),
    /// A blank line, which the main loop ignores
    Empty,
    /// End of input, which ends the main loop
    Eof,
}

/// **Reads standard input into a line.**
///
/// Signals an empty line so we can ignore it (in the main loop).
///
/// # Panics
/// Panics in case it can't write `label` to `stdout`,
/// or if it can't flush the `stdout` buffer.
pub fn read_from_stdin(label: &str) -> Input {
    let mut lock = stdout().lock();
    write!(lock, "\n{label}").expect("Failed to write the label to stdout.");
    lock.flush().expect("Failed to flush the stdout buffer.");

    let mut line = String::new();
    match stdin().read_line(&mut line) {
        Ok(0) => Input::Eof,
        Ok(_) => {
            if line.trim().is_empty() {
                Input::Empty
            } else {
                Input::Line(line.to_owned())
            }
        }
        Err(err) => {
            eprintln!("[ERROR] Failed to read line: {}", err);
            Input::Empty
        }
    }
}

/// **Basic input validation for a name or a password**
///
/// Checks for:
/// - An empty string;
/// - Whitespace inside the string.
pub fn is_valid_token(token: &str) -> bool {
    match validation::is_valid_token(token) {
        Some(msg) => {
            eprintln!("[ERROR] {}: \"{}\". {}", TOKEN_NOT_VALID_MSG, token, msg);
            false
        }
        None => true,
    }
}

/// **Parses a positive account number**
///
/// Prints an error message and returns `None` if that's not possible.
pub fn parse_account_number(word: &str) -> Option<u64> {
    match word.parse::<u64>() {
        Ok(number) if number > 0 => Some(number),
        _ => {
            eprintln!(
                "[ERROR] Account numbers are positive integers; you provided '{}'.",
                word
            );
            None
        }
    }
}

/// **Parses a positive amount of money**
///
/// Prints an error message and returns `None` if that's not possible.
pub fn parse_amount(word: &str) -> Option<Decimal> {
    match Decimal::from_str(word) {
        Ok(amount) if amount > Decimal::ZERO => Some(amount),
        _ => {
            cannot_parse_number(word);
            None
        }
    }
}

/// **Parses an account type, either by name or by its numeric code**
///
/// Prints an error message and returns `None` if that's not possible.
pub fn parse_account_type(word: &str) -> Option<AccountType> {
    match word.to_lowercase().as_str() {
        SAVINGS | "s" | "0" => Some(AccountType::Savings),
        CHECKING | "c" | "1" => Some(AccountType::Checking),
        _ => {
            eprintln!(
                "[ERROR] The account type is either '{SAVINGS}' (0) or '{CHECKING}' (1); you provided '{}'.",
                word
            );
            None
        }
    }
}

/// Prints an error message about not being able to parse
/// a string into an amount, so that our users can get a
/// more informative message than the provided generic message
/// that comes from the decimal parser.
///
/// This function can be converted into a macro.
pub fn cannot_parse_number(word: &str) {
    eprintln!(
        "[ERROR] Only positive numbers are allowed as the amount; you provided '{}'.",
        word
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_contents() {
        let expected = "help open balance deposit withdraw close accounts \
        history interest export quit"
            .trim()
            .to_string();
        assert_eq!(help_contents_full(), expected);
    }

    #[test]
    fn test_help_contents_short() {
        let expected = "h o b d w c a t i e q".to_string();
        assert_eq!(help_contents_short(), expected);
    }

    #[test]
    fn test_valid_token_passes() {
        assert!(is_valid_token("Ivan"));
    }

    #[test]
    fn test_invalid_tokens_fail() {
        assert!(!is_valid_token(""));
        assert!(!is_valid_token("two words"));
    }

    #[test]
    fn test_parse_account_number() {
        assert_eq!(Some(12), parse_account_number("12"));
        assert_eq!(None, parse_account_number("0"));
        assert_eq!(None, parse_account_number("-3"));
        assert_eq!(None, parse_account_number("abc"));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(Some(Decimal::new(10050, 2)), parse_amount("100.50"));
        assert_eq!(None, parse_amount("0"));
        assert_eq!(None, parse_amount("-5"));
        assert_eq!(None, parse_amount("ten"));
    }

    #[test]
    fn test_parse_account_type() {
        assert_eq!(Some(AccountType::Savings), parse_account_type("Savings"));
        assert_eq!(Some(AccountType::Savings), parse_account_type("0"));
        assert_eq!(Some(AccountType::Checking), parse_account_type("checking"));
        assert_eq!(Some(AccountType::Checking), parse_account_type("1"));
        assert_eq!(None, parse_account_type("2"));
    }
}
