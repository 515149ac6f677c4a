use bank_common::cli::constants::*;
use bank_common::cli::helpers::*;
use bank_common::constants::{DATA_FILE_ENV, DEFAULT_DATA_FILE};
use bank_common::errors::{AccountingError, LedgerError};
use bank_common::Ledger;
use std::env;
use std::path::PathBuf;

/// What the main loop should do after a command
#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// **Runs the interactive loop against the ledger stored at `data_file`.**
///
/// The ledger is dropped when the loop ends, on `quit` or at the end of input,
/// and that writes it back to `data_file`.
///
/// # Errors
/// - The data file can't be read or is corrupt.
pub fn main_loop(data_file: PathBuf) -> Result<(), LedgerError> {
    let mut ledger = Ledger::load(data_file)?;
    println!("Bank Ledger; try `help`.");

    loop {
        match read_from_stdin(PROMPT) {
            Input::Line(line) => {
                let words = line.split_whitespace().collect::<Vec<_>>();
                if execute(words, &mut ledger) == Flow::Quit {
                    break;
                }
            }
            Input::Empty => continue,
            Input::Eof => break,
        }
    }

    Ok(())
}

/// **Dispatches a single command line.**
pub fn execute(words: Vec<&str>, ledger: &mut Ledger) -> Flow {
    let Some(cmd) = words.first().map(|cmd| cmd.to_lowercase()) else {
        return Flow::Continue;
    };

    match cmd.as_str() {
        HELP | "h" => help(),
        OPEN | "o" => open_account(words, ledger),
        BALANCE | "b" => balance_enquiry(words, ledger),
        DEPOSIT | "d" => deposit(words, ledger),
        WITHDRAW | "w" => withdraw(words, ledger),
        CLOSE | "c" => close_account(words, ledger),
        ACCOUNTS | "a" => print_accounts(words, ledger),
        HISTORY | "t" => print_history(words, ledger),
        INTEREST | "i" => apply_interest(words, ledger),
        EXPORT | "e" => export(words, ledger),
        QUIT | "q" => return Flow::Quit,
        _ => println!("Unrecognized command; try `help`."),
    }

    Flow::Continue
}

/// **Get the data file path**
///
/// - If an argument is provided, it is the path.
/// - Otherwise, the [`DATA_FILE_ENV`] environment variable is used, if set.
/// - Otherwise, falls back to [`DEFAULT_DATA_FILE`] in the working directory.
pub fn get_data_file(arg: Option<String>) -> PathBuf {
    let data_file = arg
        .or_else(|| env::var(DATA_FILE_ENV).ok())
        .unwrap_or_else(|| {
            log::info!("No data file provided; using default: {}", DEFAULT_DATA_FILE);
            DEFAULT_DATA_FILE.into()
        });

    PathBuf::from(data_file)
}

/// Splits out the account number and the password,
/// which always follow the command.
fn credentials<'a>(words: &[&'a str]) -> Option<(u64, &'a str)> {
    let number = parse_account_number(words[1])?;
    Some((number, words[2]))
}

/// **Open an account**
///
/// Names and the password must be single words.
/// The initial balance must be positive.
///
/// Prints the new account, including its number, which the user needs from now on.
fn open_account(words: Vec<&str>, ledger: &mut Ledger) {
    if words.len() != 6 {
        println!(
            "The open command: {OPEN} <first name> <last name> <password> \
             <{SAVINGS}|{CHECKING}> <initial balance>"
        );
        return;
    }

    let (first_name, last_name, password) = (words[1], words[2], words[3]);
    if !(is_valid_token(first_name) && is_valid_token(last_name) && is_valid_token(password)) {
        return;
    }

    let Some(account_type) = parse_account_type(words[4]) else {
        return;
    };
    let Some(initial_balance) = parse_amount(words[5]) else {
        return;
    };

    match ledger.open_account(first_name, last_name, password, initial_balance, account_type) {
        Ok(account) => println!("\nCongratulations, Account Created\n{}", account),
        Err(err) => eprintln!("[ERROR] {}", err),
    }
}

/// **Print an account's details**
fn balance_enquiry(words: Vec<&str>, ledger: &mut Ledger) {
    if words.len() != 3 {
        println!("The balance command: {BALANCE} <account number> <password>");
        return;
    }

    let Some((number, password)) = credentials(&words) else {
        return;
    };

    match ledger.balance_enquiry(number, password) {
        Ok(account) => println!("\nYour Account Details\n{}", account),
        Err(err) => eprintln!("[ERROR] {}", err),
    }
}

/// **Deposit funds to an account**
///
/// The account needs to exist in advance, and the amount must be positive.
fn deposit(words: Vec<&str>, ledger: &mut Ledger) {
    if words.len() != 4 {
        println!("The deposit command: {DEPOSIT} <account number> <password> <amount>");
        return;
    }

    let Some((number, password)) = credentials(&words) else {
        return;
    };
    let Some(amount) = parse_amount(words[3]) else {
        return;
    };

    match ledger.deposit(number, password, amount) {
        Ok(account) => println!("\nAmount Deposited\n{}", account),
        Err(err) => eprintln!("[ERROR] {}", err),
    }
}

/// **Withdraw funds from an account**
///
/// The balance can't go below the minimum balance;
/// such a withdrawal is rejected and nothing changes.
fn withdraw(words: Vec<&str>, ledger: &mut Ledger) {
    if words.len() != 4 {
        println!("The withdraw command: {WITHDRAW} <account number> <password> <amount>");
        return;
    }

    let Some((number, password)) = credentials(&words) else {
        return;
    };
    let Some(amount) = parse_amount(words[3]) else {
        return;
    };

    match ledger.withdraw(number, password, amount) {
        Ok(account) => println!("\nAmount Withdrawn\n{}", account),
        Err(err) => eprintln!("[ERROR] {}", err),
    }
}

/// **Close an account**
fn close_account(words: Vec<&str>, ledger: &mut Ledger) {
    if words.len() != 3 {
        println!("The close command: {CLOSE} <account number> <password>");
        return;
    }

    let Some((number, password)) = credentials(&words) else {
        return;
    };

    match ledger.close_account(number, password) {
        Ok(account) => println!("\nAccount Deleted:\n{}\n\nAccount Closed", account),
        Err(err) => eprintln!("[ERROR] {}", err),
    }
}

/// **Prints all accounts; requires the admin password**
fn print_accounts(words: Vec<&str>, ledger: &mut Ledger) {
    if words.len() != 2 {
        println!("The accounts command: {ACCOUNTS} <admin password>");
        return;
    }

    match ledger.show_all_accounts(words[1]) {
        Ok(accounts) => {
            for account in accounts {
                println!("Account {}\n{}\n", account.account_number(), account);
            }
        }
        Err(err) => eprintln!("[ERROR] {}", err),
    }
}

/// **Prints an account's transaction history, oldest first**
fn print_history(words: Vec<&str>, ledger: &mut Ledger) {
    if words.len() != 3 {
        println!("The history command: {HISTORY} <account number> <password>");
        return;
    }

    let Some((number, password)) = credentials(&words) else {
        return;
    };

    match ledger.transaction_history(number, password) {
        Ok(history) => {
            println!("\nTransaction History for Account {}", number);
            println!("{HISTORY_SEPARATOR}");
            for record in history {
                println!("{}", record);
                println!("{HISTORY_SEPARATOR}");
            }
        }
        Err(err) => eprintln!("[ERROR] {}", err),
    }
}

/// **Credits interest to all accounts; requires the admin password**
///
/// The ledger itself doesn't check the admin password for this, so we do it here.
fn apply_interest(words: Vec<&str>, ledger: &mut Ledger) {
    if words.len() != 2 {
        println!("The interest command: {INTEREST} <admin password>");
        return;
    }

    if ledger.verify_admin(words[1]) {
        let credited = ledger.calculate_interest_for_all();
        println!("Interest credited to {} accounts", credited);
    } else {
        eprintln!("[ERROR] Invalid admin password");
    }
}

/// **Prints all accounts with their histories as JSON; requires the admin password**
///
/// Passwords are never part of the output.
fn export(words: Vec<&str>, ledger: &mut Ledger) {
    if words.len() != 2 {
        println!("The export command: {EXPORT} <admin password>");
        return;
    }

    match accounts_json(ledger, words[1]) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("[ERROR] {}", err),
    }
}

/// **Builds the JSON array of all accounts, ordered by account number**
///
/// # Errors
/// - Wrong admin password, `AccountingError::InvalidPassword`;
/// - Serialization failure, reported as `AccountingError::InvalidInput`.
pub fn accounts_json(ledger: &Ledger, admin_password: &str) -> Result<String, AccountingError> {
    let accounts = ledger.show_all_accounts(admin_password)?;
    serde_json::to_string_pretty(&accounts).map_err(|err| {
        AccountingError::InvalidInput(format!("Failed to export the accounts: {}", err))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bank_common::constants::ADMIN_PASSWORD;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Ledger) {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::load(dir.path().join("Bank.data")).unwrap();
        (dir, ledger)
    }

    fn run(line: &str, ledger: &mut Ledger) -> Flow {
        execute(line.split_whitespace().collect(), ledger)
    }

    fn balance(ledger: &Ledger, number: u64, password: &str) -> Decimal {
        ledger.balance_enquiry(number, password).unwrap().balance()
    }

    #[test]
    fn test_get_data_file_from_argument() {
        assert_eq!(
            PathBuf::from("/tmp/accounts.data"),
            get_data_file(Some("/tmp/accounts.data".to_string()))
        );
    }

    #[test]
    fn test_quit() {
        let (_dir, mut ledger) = setup();

        assert_eq!(Flow::Quit, run("quit", &mut ledger));
        assert_eq!(Flow::Quit, run("Q", &mut ledger));
        assert_eq!(Flow::Continue, run("help", &mut ledger));
        assert_eq!(Flow::Continue, run("nonsense", &mut ledger));
        assert_eq!(Flow::Continue, run("", &mut ledger));
    }

    #[test]
    fn test_open_deposit_withdraw() {
        let (_dir, mut ledger) = setup();

        run("open Ada Lovelace p1 savings 1000", &mut ledger);
        assert_eq!(1, ledger.last_account_number());

        run("deposit 1 p1 250.50", &mut ledger);
        assert_eq!(Decimal::new(125050, 2), balance(&ledger, 1, "p1"));

        run("w 1 p1 1000", &mut ledger);
        assert_eq!(Decimal::new(125050, 2), balance(&ledger, 1, "p1"));

        run("w 1 p1 750.50", &mut ledger);
        assert_eq!(Decimal::from(500), balance(&ledger, 1, "p1"));
    }

    #[test]
    fn test_open_rejects_bad_input() {
        let (_dir, mut ledger) = setup();

        run("open Ada Lovelace p1 savings 0", &mut ledger);
        run("open Ada Lovelace p1 current 1000", &mut ledger);
        run("open Ada p1 savings 1000", &mut ledger);

        assert!(ledger.is_empty());
    }

    #[test]
    fn test_wrong_password_changes_nothing() {
        let (_dir, mut ledger) = setup();

        run("o A B p1 1 1000", &mut ledger);
        run("deposit 1 nope 100", &mut ledger);
        run("close 1 nope", &mut ledger);

        assert_eq!(Decimal::from(1000), balance(&ledger, 1, "p1"));
    }

    #[test]
    fn test_interest_requires_admin() {
        let (_dir, mut ledger) = setup();

        run("o A B p1 savings 1000", &mut ledger);
        run("interest nope", &mut ledger);
        assert_eq!(Decimal::from(1000), balance(&ledger, 1, "p1"));

        run(&format!("interest {ADMIN_PASSWORD}"), &mut ledger);
        assert_eq!(Decimal::from(1050), balance(&ledger, 1, "p1"));
    }

    #[test]
    fn test_export_accounts_without_passwords() {
        let (_dir, mut ledger) = setup();

        run("o Ada Lovelace p1 savings 1000", &mut ledger);
        run("o Alan Turing p2 checking 750.25", &mut ledger);
        run("d 1 p1 100", &mut ledger);

        let json = accounts_json(&ledger, ADMIN_PASSWORD).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let accounts = value.as_array().unwrap();

        assert_eq!(2, accounts.len());
        assert_eq!(1, accounts[0]["account_number"]);
        assert_eq!("Lovelace", accounts[0]["last_name"]);
        assert_eq!("1100", accounts[0]["balance"]);
        assert_eq!(2, accounts[0]["history"].as_array().unwrap().len());
        assert_eq!("Checking", accounts[1]["account_type"]);
        assert_eq!("750.25", accounts[1]["balance"]);
        for account in accounts {
            assert!(account.get("password").is_none());
        }
        assert!(!json.contains("p1"));
    }

    #[test]
    fn test_export_requires_admin() {
        let (_dir, mut ledger) = setup();

        run("o A B p1 savings 1000", &mut ledger);

        assert_eq!(Err(AccountingError::InvalidPassword), accounts_json(&ledger, "p1"));
    }

    #[test]
    fn test_close() {
        let (_dir, mut ledger) = setup();

        run("o A B p1 savings 1000", &mut ledger);
        run("c 1 p1", &mut ledger);

        assert!(ledger.is_empty());
    }
}
