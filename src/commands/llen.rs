use crate::{
    commands::{command_error::CommandError, command_utils::ensure_key_type},
    resp::RespValue,
    store::{KeyType, Keyspace},
};

pub struct LlenArguments {
    key: String,
}

impl LlenArguments {
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 1 {
            return Err(CommandError::wrong_number_of_arguments("llen"));
        }

        Ok(Self {
            key: arguments[0].clone(),
        })
    }
}

pub fn llen(keyspace: &Keyspace, arguments: Vec<String>) -> Result<String, CommandError> {
    let llen_arguments = LlenArguments::parse(arguments)?;

    ensure_key_type(keyspace, &llen_arguments.key, KeyType::List)?;

    let length = keyspace.lists.llen(&llen_arguments.key);

    Ok(RespValue::Integer(length as i64).encode())
}
