use crate::{
    commands::{
        command_error::CommandError,
        command_utils::ensure_key_type,
        stream_utils::{parse_range_id, parse_stream_entries_to_resp, RangeBound},
    },
    store::{KeyType, Keyspace, StreamId},
};

pub struct XrangeArguments {
    key: String,
    start: StreamId,
    end: StreamId,
}

impl XrangeArguments {
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        if arguments.len() != 3 {
            return Err(CommandError::wrong_number_of_arguments("xrange"));
        }

        Ok(Self {
            key: arguments[0].clone(),
            start: parse_range_id(&arguments[1], RangeBound::Start)?,
            end: parse_range_id(&arguments[2], RangeBound::End)?,
        })
    }
}

/// Handles the Redis XRANGE command.
///
/// Replies with every entry whose ID lies between start and end, both
/// inclusive. A missing key or an inverted range gives an empty array.
pub fn xrange(keyspace: &Keyspace, arguments: Vec<String>) -> Result<String, CommandError> {
    let xrange_arguments = XrangeArguments::parse(arguments)?;

    ensure_key_type(keyspace, &xrange_arguments.key, KeyType::Stream)?;

    let entries = keyspace.streams.range(
        &xrange_arguments.key,
        xrange_arguments.start,
        xrange_arguments.end,
    );

    Ok(parse_stream_entries_to_resp(&entries).encode())
}
