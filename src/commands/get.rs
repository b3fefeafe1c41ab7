use crate::{
    commands::{command_error::CommandError, command_utils::ensure_key_type},
    resp::RespValue,
    store::{KeyType, Keyspace},
};

/// Represents the parsed arguments for GET command
pub struct GetArguments {
    /// The key name to retrieve from the store
    key: String,
}

impl GetArguments {
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 1 {
            return Err(CommandError::wrong_number_of_arguments("get"));
        }

        Ok(Self {
            key: arguments[0].clone(),
        })
    }
}

/// Handles the Redis GET command.
///
/// Returns the live string under the key, or the null bulk string when the
/// key is missing or its expiry has passed. An expired value is removed from
/// the store by this call.
///
/// # Returns
///
/// * `Ok(String)` - A RESP bulk string or `$-1\r\n`
/// * `Err(CommandError::WrongNumberOfArguments)` - If not exactly one argument
/// * `Err(CommandError::WrongType)` - If the key holds a list or a stream
pub fn get(keyspace: &Keyspace, arguments: Vec<String>) -> Result<String, CommandError> {
    let get_arguments = GetArguments::parse(arguments)?;

    ensure_key_type(keyspace, &get_arguments.key, KeyType::String)?;

    match keyspace.strings.get(&get_arguments.key) {
        Some(value) => Ok(RespValue::BulkString(value).encode()),
        None => Ok(RespValue::Null.encode()),
    }
}
