use crate::accounts::{Account, AccountType};
use crate::codec::{decode_accounts, encode_accounts};
use crate::constants::ADMIN_PASSWORD;
use crate::errors::{AccountingError, LedgerError, StorageError};
use crate::tx::TransactionRecord;
use crate::validation::is_valid_token;
use rust_decimal::Decimal;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Owns all accounts, allocates account numbers, and keeps the persisted store in sync.
///
/// The store is rewritten in full when an account is opened, and when the ledger is dropped.
/// Deposits, withdrawals, interest and closures only reach the store at that point.
///
/// Every operation hands out copies of accounts, never live handles.
#[derive(Debug)]
pub struct Ledger {
    accounts: BTreeMap<u64, Account>,
    admin_password: String,
    last_account_number: u64,
    store: PathBuf,
}

impl Ledger {
    /// **Loads the ledger from the store at `path`.**
    ///
    /// A missing store means an empty ledger.
    ///
    /// The account-number sequence continues from the **last** record read,
    /// not from the largest one, so the store is expected to be ordered by account number.
    /// If a number appears more than once, the first record wins.
    ///
    /// # Errors
    /// - The store can't be read, `StorageError::Io`;
    /// - The store is corrupt, `StorageError::Malformed`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let store = path.into();

        let contents = match fs::read_to_string(&store) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No data file at {:?}; starting with an empty ledger.", store);
                String::new()
            }
            Err(source) => return Err(StorageError::Io { path: store, source }.into()),
        };

        let mut accounts = BTreeMap::new();
        let mut last_account_number = 0;
        for account in decode_accounts(&contents)? {
            last_account_number = account.account_number();
            match accounts.entry(account.account_number()) {
                Entry::Vacant(entry) => {
                    entry.insert(account);
                }
                Entry::Occupied(_) => log::warn!(
                    "Account {} appears more than once in {:?}; keeping the first record.",
                    last_account_number,
                    store
                ),
            }
        }

        if let Some(&max) = accounts.keys().next_back() {
            if max > last_account_number {
                log::warn!(
                    "The last account in {:?} is {}, but the largest is {}; \
                     new account numbers will continue from {}.",
                    store,
                    last_account_number,
                    max,
                    last_account_number
                );
            }
        }

        log::info!("Loaded {} accounts from {:?}.", accounts.len(), store);

        Ok(Ledger {
            accounts,
            admin_password: ADMIN_PASSWORD.to_string(),
            last_account_number,
            store,
        })
    }

    /// **Opens a new account under the next account number and persists the whole ledger.**
    ///
    /// The initial balance is taken as-is.
    ///
    /// Numbers already in use, which an unordered store can leave ahead of the sequence,
    /// are skipped; an existing account is never replaced.
    ///
    /// # Errors
    /// - A name or the password is empty or contains whitespace, `AccountingError::InvalidInput`;
    /// - The store can't be written, `StorageError::Io`.
    pub fn open_account(
        &mut self,
        first_name: &str,
        last_name: &str,
        password: &str,
        initial_balance: Decimal,
        account_type: AccountType,
    ) -> Result<Account, LedgerError> {
        for token in [first_name, last_name, password] {
            if let Some(reason) = is_valid_token(token) {
                return Err(AccountingError::InvalidInput(reason.to_string()).into());
            }
        }

        self.last_account_number += 1;
        while self.accounts.contains_key(&self.last_account_number) {
            log::warn!(
                "Account number {} is already taken; skipping it.",
                self.last_account_number
            );
            self.last_account_number += 1;
        }

        let account = Account::open(
            self.last_account_number,
            first_name,
            last_name,
            password,
            initial_balance,
            account_type,
        );
        log::debug!("open_account; account = {}", account.account_number());

        if let Entry::Vacant(entry) = self.accounts.entry(account.account_number()) {
            entry.insert(account.clone());
        }
        self.persist()?;

        Ok(account)
    }

    /// **Retrieves an account's details**
    ///
    /// # Errors
    /// - Account doesn't exist, `AccountingError::AccountNotFound`;
    /// - Wrong password, `AccountingError::InvalidPassword`.
    pub fn balance_enquiry(
        &self,
        account_number: u64,
        password: &str,
    ) -> Result<Account, AccountingError> {
        log::debug!("balance_enquiry; account = {}", account_number);
        self.find_authorized(account_number, password).cloned()
    }

    /// **Deposit funds**
    ///
    /// # Errors
    /// - Account doesn't exist, `AccountingError::AccountNotFound`;
    /// - Wrong password, `AccountingError::InvalidPassword`;
    /// - Non-positive amount, `AccountingError::InvalidInput`.
    pub fn deposit(
        &mut self,
        account_number: u64,
        password: &str,
        amount: Decimal,
    ) -> Result<Account, AccountingError> {
        log::debug!("deposit; account = {}, amount = {}", account_number, amount);
        let account = self.authorize(account_number, password)?;
        account.deposit(amount)?;
        Ok(account.clone())
    }

    /// **Withdraw funds**
    ///
    /// # Errors
    /// - Account doesn't exist, `AccountingError::AccountNotFound`;
    /// - Wrong password, `AccountingError::InvalidPassword`;
    /// - Non-positive amount, `AccountingError::InvalidInput`;
    /// - Balance would drop below the minimum, `AccountingError::InsufficientFunds`.
    pub fn withdraw(
        &mut self,
        account_number: u64,
        password: &str,
        amount: Decimal,
    ) -> Result<Account, AccountingError> {
        log::debug!("withdraw; account = {}, amount = {}", account_number, amount);
        let account = self.authorize(account_number, password)?;
        account.withdraw(amount)?;
        Ok(account.clone())
    }

    /// **Closes an account and returns its final state**
    ///
    /// The account number is never handed out again during this run.
    ///
    /// # Errors
    /// - Account doesn't exist, `AccountingError::AccountNotFound`;
    /// - Wrong password, `AccountingError::InvalidPassword`.
    pub fn close_account(
        &mut self,
        account_number: u64,
        password: &str,
    ) -> Result<Account, AccountingError> {
        log::debug!("close_account; account = {}", account_number);
        self.find_authorized(account_number, password)?;
        self.accounts
            .remove(&account_number)
            .ok_or(AccountingError::AccountNotFound(account_number))
    }

    /// **Fetches every account, ordered by account number**
    ///
    /// # Errors
    /// - Wrong admin password, `AccountingError::InvalidPassword`.
    pub fn show_all_accounts(&self, admin_password: &str) -> Result<Vec<Account>, AccountingError> {
        if !self.verify_admin(admin_password) {
            log::warn!("show_all_accounts; rejected admin password");
            return Err(AccountingError::InvalidPassword);
        }

        Ok(self.accounts.values().cloned().collect())
    }

    /// **Fetches an account's transaction history, oldest first**
    ///
    /// # Errors
    /// - Account doesn't exist, `AccountingError::AccountNotFound`;
    /// - Wrong password, `AccountingError::InvalidPassword`.
    pub fn transaction_history(
        &self,
        account_number: u64,
        password: &str,
    ) -> Result<Vec<TransactionRecord>, AccountingError> {
        log::debug!("transaction_history; account = {}", account_number);
        self.find_authorized(account_number, password)
            .map(|account| account.transaction_history().to_vec())
    }

    /// **Credits interest to every account**
    ///
    /// There's no admin check here; callers are expected to gate this with [`Ledger::verify_admin`].
    ///
    /// An account whose balance would overflow is left untouched and skipped.
    ///
    /// Returns the number of accounts credited.
    pub fn calculate_interest_for_all(&mut self) -> usize {
        let mut credited = 0;
        for account in self.accounts.values_mut() {
            match account.calculate_interest() {
                Ok(_) => credited += 1,
                Err(err) => log::warn!(
                    "No interest for account {}: {}",
                    account.account_number(),
                    err
                ),
            }
        }
        log::info!("Interest credited to {} of {} accounts.", credited, self.accounts.len());

        credited
    }

    pub fn verify_admin(&self, password: &str) -> bool {
        password == self.admin_password
    }

    /// **Rewrites the whole store from memory**
    ///
    /// # Errors
    /// - The store can't be written, `StorageError::Io`.
    pub fn persist(&self) -> Result<(), StorageError> {
        fs::write(&self.store, encode_accounts(self.accounts.values())).map_err(|source| {
            StorageError::Io {
                path: self.store.clone(),
                source,
            }
        })?;
        log::info!("Saved {} accounts to {:?}.", self.accounts.len(), self.store);

        Ok(())
    }

    /// The most recently issued account number
    pub fn last_account_number(&self) -> u64 {
        self.last_account_number
    }

    pub fn store_path(&self) -> &Path {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Looks the account up and checks its password.
    fn find_authorized(
        &self,
        account_number: u64,
        password: &str,
    ) -> Result<&Account, AccountingError> {
        let account = self
            .accounts
            .get(&account_number)
            .ok_or(AccountingError::AccountNotFound(account_number))?;

        if !account.verify_password(password) {
            log::warn!("Rejected password for account {}", account_number);
            return Err(AccountingError::InvalidPassword);
        }

        Ok(account)
    }

    /// Same as [`Ledger::find_authorized`], for the operations that change the account.
    fn authorize(
        &mut self,
        account_number: u64,
        password: &str,
    ) -> Result<&mut Account, AccountingError> {
        self.find_authorized(account_number, password)?;
        self.accounts
            .get_mut(&account_number)
            .ok_or(AccountingError::AccountNotFound(account_number))
    }
}

impl Drop for Ledger {
    /// The shutdown rewrite
    fn drop(&mut self) {
        if let Err(err) = self.persist() {
            log::error!("Failed to save the ledger on shutdown: {}", err);
        }
    }
}
