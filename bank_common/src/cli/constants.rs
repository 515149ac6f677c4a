/// CLI Commands

pub const HELP: &str = "help";
pub const OPEN: &str = "open";
pub const BALANCE: &str = "balance";
pub const DEPOSIT: &str = "deposit";
pub const WITHDRAW: &str = "withdraw";
pub const CLOSE: &str = "close";
pub const ACCOUNTS: &str = "accounts";
pub const HISTORY: &str = "history";
pub const INTEREST: &str = "interest";
pub const EXPORT: &str = "export";
pub const QUIT: &str = "quit";

/// Account type keywords

pub const SAVINGS: &str = "savings";
pub const CHECKING: &str = "checking";

/// Various CLI constants

pub const PROMPT: &str = "> ";
pub const HISTORY_SEPARATOR: &str = "----------------------------------------";
