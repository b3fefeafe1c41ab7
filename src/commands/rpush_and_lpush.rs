use crate::{
    commands::{command_error::CommandError, command_utils::ensure_key_type},
    resp::RespValue,
    store::{KeyType, Keyspace},
};

pub struct PushArrayOperations {
    key: String,
    values: Vec<String>,
}

impl PushArrayOperations {
    pub fn parse(arguments: Vec<String>, should_prepend: bool) -> Result<Self, CommandError> {
        if arguments.len() < 2 {
            let command = if should_prepend { "lpush" } else { "rpush" };
            return Err(CommandError::wrong_number_of_arguments(command));
        }

        let mut arguments = arguments.into_iter();

        Ok(Self {
            key: arguments.next().unwrap_or_default(),
            values: arguments.collect(),
        })
    }
}

/// Appends values to the tail of a list, creating it if needed, and
/// replies with the list length right after the push. Blocked BLPOP
/// callers are served from the new head elements afterwards.
pub fn rpush(keyspace: &Keyspace, arguments: Vec<String>) -> Result<String, CommandError> {
    push_array_operations(keyspace, arguments, false)
}

/// Like [`rpush`], but each value in turn becomes the new head.
pub fn lpush(keyspace: &Keyspace, arguments: Vec<String>) -> Result<String, CommandError> {
    push_array_operations(keyspace, arguments, true)
}

fn push_array_operations(
    keyspace: &Keyspace,
    arguments: Vec<String>,
    should_prepend: bool,
) -> Result<String, CommandError> {
    let push_array_arguments = PushArrayOperations::parse(arguments, should_prepend)?;

    ensure_key_type(keyspace, &push_array_arguments.key, KeyType::List)?;

    let length = if should_prepend {
        keyspace
            .lists
            .lpush(&push_array_arguments.key, push_array_arguments.values)
    } else {
        keyspace
            .lists
            .rpush(&push_array_arguments.key, push_array_arguments.values)
    };

    Ok(RespValue::Integer(length as i64).encode())
}
