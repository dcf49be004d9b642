pub mod add;
pub mod checkout;
pub mod commit;
pub mod config;
pub mod log;
pub mod status;

use svcs_core::Error;

/// Turns an absent positional argument into [`Error::MissingArgument`].
pub fn required(value: Option<String>, name: &'static str) -> svcs_core::Result<String> {
    value.ok_or(Error::MissingArgument(name))
}

/// Line printed for an expected, user-facing failure. `None` means the error
/// is unexpected and should abort the command.
pub fn expected_message(error: &Error) -> Option<String> {
    match error {
        Error::NothingToCommit => Some("Nothing to commit.".to_string()),
        Error::CommitNotFound(_) => Some("Commit does not exist.".to_string()),
        Error::FileNotFound(path) => Some(format!("Can't find '{}'.", path)),
        Error::NotAFile(path) => Some(format!("'{}' is not a file.", path)),
        Error::InvalidMessage(_) => {
            Some("Message can't contain a 'commit' header block.".to_string())
        }
        Error::MissingArgument("message") => Some("Message was not passed.".to_string()),
        Error::MissingArgument("commit id") => Some("Commit id was not passed.".to_string()),
        Error::MissingArgument(name) => Some(format!("Missing {}.", name)),
        _ => None,
    }
}

/// Prints the outcome of a core operation. Expected failures are printed
/// and count as a completed command.
pub fn report<T>(
    result: svcs_core::Result<T>,
    on_success: impl FnOnce(T),
) -> anyhow::Result<()> {
    match result {
        Ok(value) => {
            on_success(value);
            Ok(())
        }
        Err(e) => match expected_message(&e) {
            Some(message) => {
                println!("{}", message);
                Ok(())
            }
            None => Err(e.into()),
        },
    }
}
