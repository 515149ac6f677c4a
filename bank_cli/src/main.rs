//! The "Bank Ledger CLI" app's entry point.

use bank_cli::logic::{get_data_file, main_loop};
use std::env;
use std::error::Error;

/// The "Bank Ledger CLI" app's entry point.
///
/// The optional first argument is the path to the data file.
fn main() -> Result<(), Box<dyn Error>> {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "bank_common=info,bank_cli=info");
    }
    pretty_env_logger::init();

    let data_file = get_data_file(env::args().nth(1));

    main_loop(data_file)?;

    Ok(())
}
