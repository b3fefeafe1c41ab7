use crate::{
    commands::{command_error::CommandError, command_utils::ensure_key_type},
    resp::RespValue,
    store::{KeyType, Keyspace, RequestedId},
};

/// Represents the parsed arguments for the XADD command.
pub struct XaddArguments {
    /// The stream key
    key: String,
    /// The entry ID as given: `*`, `<ms>-*` or `<ms>-<seq>`
    requested_id: RequestedId,
    /// Field-value pairs in the order given, one per field name
    fields: Vec<(String, String)>,
}

impl XaddArguments {
    /// Parses `[key, id, field, value, ...]`.
    ///
    /// At least one complete field-value pair is required. A field named
    /// twice keeps its first position and takes its last value.
    ///
    /// # Returns
    ///
    /// * `Ok(XaddArguments)` - Successfully parsed arguments
    /// * `Err(CommandError::WrongNumberOfArguments)` - If there is no pair or a pair is incomplete
    /// * `Err(CommandError::InvalidStreamId)` - If the ID is malformed
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() < 4 || arguments.len() % 2 != 0 {
            return Err(CommandError::wrong_number_of_arguments("xadd"));
        }

        let requested_id = arguments[1].parse::<RequestedId>()?;

        let mut fields: Vec<(String, String)> = Vec::with_capacity((arguments.len() - 2) / 2);

        for pair in arguments[2..].chunks_exact(2) {
            let (field, value) = (&pair[0], &pair[1]);

            match fields.iter_mut().find(|(existing, _)| existing == field) {
                Some((_, existing_value)) => *existing_value = value.clone(),
                None => fields.push((field.clone(), value.clone())),
            }
        }

        Ok(Self {
            key: arguments[0].clone(),
            requested_id,
            fields,
        })
    }
}

/// Handles the Redis XADD command.
///
/// Appends one entry to the stream, creating the stream on first use, and
/// replies with the assigned ID as a bulk string. The ID is generated and
/// checked against the stream's last entry in the same step as the append,
/// so a rejected ID leaves the stream untouched. Blocked XREAD callers are
/// woken afterwards.
///
/// # Examples
///
/// ```ignore
/// // XADD sensor 1526919030474-* temperature 36
/// let result = xadd(&keyspace, vec![
///     "sensor".to_string(),
///     "1526919030474-*".to_string(),
///     "temperature".to_string(),
///     "36".to_string(),
/// ]);
/// // Returns: "$15\r\n1526919030474-0\r\n"
/// ```
pub fn xadd(keyspace: &Keyspace, arguments: Vec<String>) -> Result<String, CommandError> {
    let xadd_arguments = XaddArguments::parse(arguments)?;

    ensure_key_type(keyspace, &xadd_arguments.key, KeyType::Stream)?;

    let id = keyspace.streams.xadd(
        &xadd_arguments.key,
        xadd_arguments.requested_id,
        xadd_arguments.fields,
    )?;

    Ok(RespValue::BulkString(id.to_string()).encode())
}
