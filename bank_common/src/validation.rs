/// **Basic input validation for a name or a password**
///
/// The persisted store is whitespace-delimited, so every such value has to be a single word.
///
/// Checks for:
/// - An empty string;
/// - Whitespace inside the string.
///
/// Returns the reason of the failure, if any.
pub fn is_valid_token(token: &str) -> Option<&'static str> {
    if token.is_empty() {
        Some("It cannot be empty.")
    } else if token.chars().any(char::is_whitespace) {
        Some("It cannot contain whitespace.")
    } else {
        None
    }
}
