use crate::{
    commands::{
        command_error::CommandError,
        command_utils::{ensure_key_type, parse_integer},
    },
    resp::RespValue,
    store::{KeyType, Keyspace},
};

pub struct LpopArguments {
    key: String,
    /// `None` when no count was given, which changes the reply shape.
    count: Option<usize>,
}

impl LpopArguments {
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.is_empty() || arguments.len() > 2 {
            return Err(CommandError::wrong_number_of_arguments("lpop"));
        }

        let count = match arguments.get(1) {
            Some(count) => {
                let count = parse_integer(count)?;

                if count <= 0 {
                    return Err(CommandError::InvalidInteger);
                }

                Some(count as usize)
            }
            None => None,
        };

        Ok(Self {
            key: arguments[0].clone(),
            count,
        })
    }
}

/// Handles the Redis LPOP command.
///
/// Removes and returns elements from the head of a list. The list key goes
/// away once its last element is popped.
///
/// # Returns
///
/// * Without a count: a bulk string, or null if the list is empty or missing
/// * With a count: an array of up to `count` elements, possibly empty
/// * `Err(CommandError::InvalidInteger)` - If the count is not a positive integer
///
/// # Examples
///
/// ```ignore
/// // LPOP fruits
/// let result = lpop(&keyspace, vec!["fruits".to_string()]);
/// // Returns: "$5\r\nmango\r\n" or "$-1\r\n"
///
/// // LPOP fruits 2
/// let result = lpop(&keyspace, vec!["fruits".to_string(), "2".to_string()]);
/// // Returns: "*2\r\n$5\r\napple\r\n$4\r\npear\r\n"
/// ```
pub fn lpop(keyspace: &Keyspace, arguments: Vec<String>) -> Result<String, CommandError> {
    let lpop_arguments = LpopArguments::parse(arguments)?;

    ensure_key_type(keyspace, &lpop_arguments.key, KeyType::List)?;

    let Some(count) = lpop_arguments.count else {
        let popped = keyspace.lists.lpop(&lpop_arguments.key, 1);

        return match popped.into_iter().next() {
            Some(value) => Ok(RespValue::BulkString(value).encode()),
            None => Ok(RespValue::Null.encode()),
        };
    };

    let popped = keyspace.lists.lpop(&lpop_arguments.key, count);

    Ok(RespValue::bulk_string_array(popped).encode())
}
