use std::time::Duration;

use crate::{
    commands::{command_error::CommandError, command_utils::ensure_key_type},
    resp::RespValue,
    store::{KeyType, Keyspace},
};

pub struct BlpopArguments {
    key: String,
    /// `None` blocks until an element arrives.
    timeout: Option<Duration>,
}

impl BlpopArguments {
    /// Parses `[key, timeout]`, where the timeout is in seconds and may be
    /// fractional. `0` means wait forever.
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 2 {
            return Err(CommandError::wrong_number_of_arguments("blpop"));
        }

        let seconds = arguments[1]
            .parse::<f64>()
            .map_err(|_| CommandError::InvalidBlpopTimeout)?;

        if !seconds.is_finite() || seconds < 0.0 {
            return Err(CommandError::InvalidBlpopTimeout);
        }

        let timeout = if seconds == 0.0 {
            None
        } else {
            Some(
                Duration::try_from_secs_f64(seconds)
                    .map_err(|_| CommandError::InvalidBlpopTimeout)?,
            )
        };

        Ok(Self {
            key: arguments[0].clone(),
            timeout,
        })
    }
}

/// Handles the Redis BLPOP command for a single key.
///
/// Pops the head element right away when there is one. Otherwise the caller
/// joins the key's queue of waiters and is served in arrival order by later
/// pushes. Each element goes to exactly one caller.
///
/// # Returns
///
/// * `Ok(String)` - `[key, element]` as an array, or `$-1\r\n` on timeout
/// * `Err(CommandError::InvalidBlpopTimeout)` - If the timeout is not a non-negative number
pub async fn blpop(keyspace: &Keyspace, arguments: Vec<String>) -> Result<String, CommandError> {
    let blpop_arguments = BlpopArguments::parse(arguments)?;

    ensure_key_type(keyspace, &blpop_arguments.key, KeyType::List)?;

    match keyspace
        .lists
        .blpop(&blpop_arguments.key, blpop_arguments.timeout)
        .await
    {
        Some(element) => {
            Ok(RespValue::bulk_string_array([blpop_arguments.key, element]).encode())
        }
        None => Ok(RespValue::Null.encode()),
    }
}
