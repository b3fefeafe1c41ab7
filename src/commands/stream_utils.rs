use crate::{
    resp::RespValue,
    store::{StreamEntry, StreamId, StreamIdError},
};

/// Which end of a range a bare `<ms>` ID stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Start,
    End,
}

/// Parses an XRANGE/XREAD ID argument.
///
/// Besides full `<ms>-<seq>` IDs this accepts `-` and `+` for the smallest
/// and largest possible IDs, and a bare `<ms>` that covers the whole
/// millisecond: `<ms>-0` as a start, `<ms>-<max>` as an end.
///
/// # Examples
///
/// ```
/// use redis_store::commands::stream_utils::{parse_range_id, RangeBound};
/// use redis_store::store::StreamId;
///
/// assert_eq!(parse_range_id("-", RangeBound::Start), Ok(StreamId::MIN));
/// assert_eq!(parse_range_id("5", RangeBound::Start), Ok(StreamId::new(5, 0)));
/// assert_eq!(parse_range_id("5", RangeBound::End), Ok(StreamId::new(5, u64::MAX)));
/// assert_eq!(parse_range_id("5-3", RangeBound::End), Ok(StreamId::new(5, 3)));
/// ```
pub fn parse_range_id(argument: &str, bound: RangeBound) -> Result<StreamId, StreamIdError> {
    match argument {
        "-" => return Ok(StreamId::MIN),
        "+" => return Ok(StreamId::MAX),
        _ => {}
    }

    if argument.contains('-') {
        return argument.parse::<StreamId>();
    }

    let ms = argument
        .parse::<u64>()
        .map_err(|_| StreamIdError::Invalid)?;

    match bound {
        RangeBound::Start => Ok(StreamId::new(ms, 0)),
        RangeBound::End => Ok(StreamId::new(ms, u64::MAX)),
    }
}

/// Converts stream entries to RESP array format.
///
/// Each entry becomes a 2-element array: `[id, [field1, value1, field2, value2, ...]]`,
/// with fields in insertion order.
pub fn parse_stream_entries_to_resp(entries: &[StreamEntry]) -> RespValue {
    RespValue::Array(
        entries
            .iter()
            .map(|entry| {
                RespValue::Array(vec![
                    RespValue::BulkString(entry.id.to_string()),
                    RespValue::bulk_string_array(
                        entry
                            .fields
                            .iter()
                            .flat_map(|(field, value)| [field.as_str(), value.as_str()]),
                    ),
                ])
            })
            .collect(),
    )
}
