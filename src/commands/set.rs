use std::time::Duration;

use crate::{
    commands::{command_error::CommandError, command_utils::ensure_key_type},
    resp::RespValue,
    store::{KeyType, Keyspace},
};

/// Represents the parsed arguments for SET command
pub struct SetArguments {
    /// The key name to store the value under
    key: String,
    /// The value to be stored under the given key
    value: String,
    /// Time to live, when `PX` was given
    ttl: Option<Duration>,
}

impl SetArguments {
    /// Parses command arguments into a SetArguments structure.
    ///
    /// Two shapes are accepted:
    ///   - `[key, value]` - stored without expiry
    ///   - `[key, value, "PX", milliseconds]` - expires after `milliseconds`;
    ///     the option name is case-insensitive
    ///
    /// # Returns
    ///
    /// * `Ok(SetArguments)` - Successfully parsed arguments
    /// * `Err(CommandError::WrongNumberOfArguments)` - If fewer than 2 arguments
    /// * `Err(CommandError::InvalidSetExpireTime)` - If the milliseconds are not a positive integer
    /// * `Err(CommandError::InvalidSetSyntax)` - For any other shape
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let result = SetArguments::parse(vec![
    ///     "fruit".to_string(),
    ///     "mango".to_string(),
    ///     "px".to_string(),
    ///     "1000".to_string()
    /// ]);
    /// // Returns: Ok(SetArguments { key: "fruit", value: "mango", ttl: Some(1s) })
    /// ```
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() < 2 {
            return Err(CommandError::wrong_number_of_arguments("set"));
        }

        let ttl = match arguments.len() {
            2 => None,
            4 if arguments[2].eq_ignore_ascii_case("px") => {
                let milliseconds = arguments[3]
                    .parse::<i64>()
                    .map_err(|_| CommandError::InvalidSetExpireTime)?;

                if milliseconds <= 0 {
                    return Err(CommandError::InvalidSetExpireTime);
                }

                Some(Duration::from_millis(milliseconds as u64))
            }
            _ => return Err(CommandError::InvalidSetSyntax),
        };

        Ok(Self {
            key: arguments[0].clone(),
            value: arguments[1].clone(),
            ttl,
        })
    }
}

/// Handles the Redis SET command.
///
/// Stores the value, replacing any previous string and its expiry. A key
/// that holds a list or a stream is left alone and the command fails with
/// `WRONGTYPE`.
///
/// # Returns
///
/// * `Ok(String)` - `+OK\r\n`
/// * `Err(CommandError)` - Argument errors from [`SetArguments::parse`], or `WrongType`
pub fn set(keyspace: &Keyspace, arguments: Vec<String>) -> Result<String, CommandError> {
    let set_arguments = SetArguments::parse(arguments)?;

    ensure_key_type(keyspace, &set_arguments.key, KeyType::String)?;

    keyspace
        .strings
        .set(&set_arguments.key, set_arguments.value, set_arguments.ttl);

    Ok(RespValue::SimpleString("OK".to_string()).encode())
}
