use crate::{commands::command_error::CommandError, resp::RespValue};

pub struct PingArguments {
    message: Option<String>,
}

impl PingArguments {
    pub fn parse(mut arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() > 1 {
            return Err(CommandError::wrong_number_of_arguments("ping"));
        }

        Ok(Self {
            message: arguments.pop(),
        })
    }
}

/// Replies `PONG`, or echoes the single optional message as a bulk string.
pub fn ping(arguments: Vec<String>) -> Result<String, CommandError> {
    let ping_arguments = PingArguments::parse(arguments)?;

    match ping_arguments.message {
        Some(message) => Ok(RespValue::BulkString(message).encode()),
        None => Ok(RespValue::SimpleString("PONG".to_string()).encode()),
    }
}
