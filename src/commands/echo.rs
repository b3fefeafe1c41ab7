use crate::{commands::command_error::CommandError, resp::RespValue};

/// Handles the Redis ECHO command.
///
/// Replies with its arguments joined by single spaces, so an inline
/// `ECHO hello world` and a quoted `ECHO "hello world"` read the same.
///
/// # Arguments
///
/// * `arguments` - One or more strings to echo back
///
/// # Returns
///
/// * `Ok(String)` - A RESP-encoded bulk string of the joined arguments
/// * `Err(CommandError::WrongNumberOfArguments)` - If no argument was given
///
/// # Examples
///
/// ```
/// use redis_store::commands::echo;
///
/// let result = echo(vec!["hello".to_string(), "world".to_string()]);
/// assert_eq!(result, Ok("$11\r\nhello world\r\n".to_string()));
/// ```
pub fn echo(arguments: Vec<String>) -> Result<String, CommandError> {
    if arguments.is_empty() {
        return Err(CommandError::wrong_number_of_arguments("echo"));
    }

    Ok(RespValue::BulkString(arguments.join(" ")).encode())
}
