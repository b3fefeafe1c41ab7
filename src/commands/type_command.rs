use crate::{commands::command_error::CommandError, resp::RespValue, store::Keyspace};

pub struct TypeArguments {
    key: String,
}

impl TypeArguments {
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 1 {
            return Err(CommandError::wrong_number_of_arguments("type"));
        }

        Ok(Self {
            key: arguments[0].clone(),
        })
    }
}

/// Replies `string`, `list`, `stream` or `none` as a simple string.
pub fn type_command(keyspace: &Keyspace, arguments: Vec<String>) -> Result<String, CommandError> {
    let type_arguments = TypeArguments::parse(arguments)?;

    let type_name = keyspace
        .key_type(&type_arguments.key)
        .map(|key_type| key_type.as_str())
        .unwrap_or("none");

    Ok(RespValue::SimpleString(type_name.to_string()).encode())
}
