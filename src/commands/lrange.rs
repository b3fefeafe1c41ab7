use crate::{
    commands::{
        command_error::CommandError,
        command_utils::{ensure_key_type, parse_integer},
    },
    resp::RespValue,
    store::{KeyType, Keyspace},
};

/// Represents the parsed arguments for the LRANGE command.
pub struct LrangeArguments {
    /// The key name to retrieve from the store
    key: String,
    /// The starting index for the range (can be negative to count from the end)
    start_index: i64,
    /// The ending index for the range, inclusive (can be negative to count from the end)
    end_index: i64,
}

impl LrangeArguments {
    /// Parses and validates the arguments for the LRANGE command.
    ///
    /// The LRANGE command requires exactly three arguments: the key, the start
    /// index and the end index.
    ///
    /// # Returns
    ///
    /// * `Ok(LrangeArguments)` - If the arguments are valid
    /// * `Err(CommandError::WrongNumberOfArguments)` - If the number of arguments is not exactly 3
    /// * `Err(CommandError::InvalidInteger)` - If start or end index is not a valid integer
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 3 {
            return Err(CommandError::wrong_number_of_arguments("lrange"));
        }

        Ok(Self {
            key: arguments[0].clone(),
            start_index: parse_integer(&arguments[1])?,
            end_index: parse_integer(&arguments[2])?,
        })
    }
}

/// Handles the Redis LRANGE command.
///
/// Out-of-range indexes are clamped to the list; a start past the end or
/// after the stop yields an empty array, as does a missing key.
///
/// # Examples
///
/// ```ignore
/// // RPUSH fruits a b c d e
/// // LRANGE fruits -2 -1
/// let result = lrange(&keyspace, vec!["fruits".to_string(), "-2".to_string(), "-1".to_string()]);
/// // Returns: "*2\r\n$1\r\nd\r\n$1\r\ne\r\n"
/// ```
pub fn lrange(keyspace: &Keyspace, arguments: Vec<String>) -> Result<String, CommandError> {
    let lrange_arguments = LrangeArguments::parse(arguments)?;

    ensure_key_type(keyspace, &lrange_arguments.key, KeyType::List)?;

    let elements = keyspace.lists.lrange(
        &lrange_arguments.key,
        lrange_arguments.start_index,
        lrange_arguments.end_index,
    );

    Ok(RespValue::bulk_string_array(elements).encode())
}
