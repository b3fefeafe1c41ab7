use crate::{
    commands::CommandError,
    store::{KeyType, Keyspace},
};

/// Fails with `WRONGTYPE` when `key` currently holds another type of value.
/// A missing key passes.
pub fn ensure_key_type(
    keyspace: &Keyspace,
    key: &str,
    expected: KeyType,
) -> Result<(), CommandError> {
    if keyspace.holds_other_type(key, expected) {
        return Err(CommandError::WrongType);
    }

    Ok(())
}

/// Parses a signed 64-bit integer argument.
pub fn parse_integer(argument: &str) -> Result<i64, CommandError> {
    argument
        .parse::<i64>()
        .map_err(|_| CommandError::InvalidInteger)
}
