use std::time::Duration;

use tokio::time::Instant;

use crate::{
    commands::{
        command_error::CommandError,
        command_utils::ensure_key_type,
        stream_utils::{parse_range_id, parse_stream_entries_to_resp, RangeBound},
    },
    resp::RespValue,
    store::{KeyType, Keyspace, StreamId},
};

/// Where to start reading a stream, exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFrom {
    /// `$`: whatever the stream's last ID is when the command runs.
    Latest,
    After(StreamId),
}

/// Represents the parsed arguments for the XREAD command.
///
/// Format: `XREAD [BLOCK milliseconds] STREAMS key1 key2 ... id1 id2 ...`
#[derive(Debug, PartialEq)]
pub struct XreadArguments {
    /// Blocking duration in milliseconds. `None` for a non-blocking read,
    /// `Some(0)` to block until data arrives.
    blocking_duration: Option<u64>,
    /// (key, start) pairs, in the order the keys were given.
    key_stream_pairs: Vec<(String, ReadFrom)>,
}

impl XreadArguments {
    /// Parses command arguments into structured XreadArguments.
    ///
    /// # Returns
    ///
    /// * `Ok(XreadArguments)` - Successfully parsed arguments
    /// * `Err(CommandError::InvalidXreadTimeout)` - If the block duration is not a
    ///   non-negative integer
    /// * `Err(CommandError::WrongNumberOfArguments)` - If keys and IDs do not pair up
    /// * `Err(CommandError::SyntaxError)` - If the `STREAMS` keyword is missing
    /// * `Err(CommandError::InvalidStreamId)` - If an ID is neither `$` nor a valid stream ID
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Blocking: XREAD BLOCK 1000 STREAMS sensor $
    /// let args = XreadArguments::parse(vec![
    ///     "BLOCK".to_string(),
    ///     "1000".to_string(),
    ///     "STREAMS".to_string(),
    ///     "sensor".to_string(),
    ///     "$".to_string()
    /// ])?;
    /// ```
    pub fn parse(arguments: Vec<String>) -> Result<Self, CommandError> {
        let (blocking_duration, rest) = match arguments.first() {
            Some(option) if option.eq_ignore_ascii_case("block") => {
                let Some(duration) = arguments.get(1) else {
                    return Err(CommandError::wrong_number_of_arguments("xread"));
                };

                let duration_ms = duration
                    .parse::<u64>()
                    .map_err(|_| CommandError::InvalidXreadTimeout)?;

                (Some(duration_ms), &arguments[2..])
            }
            _ => (None, &arguments[..]),
        };

        if rest.len() < 3 || rest.len() % 2 == 0 {
            return Err(CommandError::wrong_number_of_arguments("xread"));
        }

        if !rest[0].eq_ignore_ascii_case("streams") {
            return Err(CommandError::SyntaxError);
        }

        let stream_count = (rest.len() - 1) / 2;
        let keys = &rest[1..=stream_count];
        let ids = &rest[stream_count + 1..];

        let mut key_stream_pairs = Vec::with_capacity(stream_count);

        for (key, id) in keys.iter().zip(ids) {
            let read_from = if id == "$" {
                ReadFrom::Latest
            } else {
                ReadFrom::After(parse_range_id(id, RangeBound::Start)?)
            };

            key_stream_pairs.push((key.clone(), read_from));
        }

        Ok(Self {
            blocking_duration,
            key_stream_pairs,
        })
    }
}

/// Handles the Redis XREAD command.
///
/// Replies with `[key, entries]` for every requested stream that has
/// entries after its start ID; streams with nothing new are left out.
///
/// With `BLOCK` and nothing to report yet, the call waits for XADDs until
/// at least one stream qualifies, or replies null once the duration has
/// passed. `$` is resolved once, before waiting, so only entries added
/// after the call are reported.
pub async fn xread(keyspace: &Keyspace, arguments: Vec<String>) -> Result<String, CommandError> {
    let xread_arguments = XreadArguments::parse(arguments)?;

    for (key, _) in &xread_arguments.key_stream_pairs {
        ensure_key_type(keyspace, key, KeyType::Stream)?;
    }

    let positions: Vec<(String, StreamId)> = xread_arguments
        .key_stream_pairs
        .into_iter()
        .map(|(key, read_from)| {
            let after = match read_from {
                ReadFrom::Latest => keyspace.streams.last_id(&key).unwrap_or(StreamId::MIN),
                ReadFrom::After(id) => id,
            };
            (key, after)
        })
        .collect();

    let Some(blocking_duration_ms) = xread_arguments.blocking_duration else {
        return Ok(RespValue::Array(read_streams(keyspace, &positions)).encode());
    };

    // A zero duration, or one too large to represent, waits forever.
    let deadline = match blocking_duration_ms {
        0 => None,
        ms => Instant::now().checked_add(Duration::from_millis(ms)),
    };

    loop {
        let appended = keyspace.streams.appended();
        tokio::pin!(appended);
        appended.as_mut().enable();

        let streams = read_streams(keyspace, &positions);

        if !streams.is_empty() {
            return Ok(RespValue::Array(streams).encode());
        }

        match deadline {
            Some(deadline) => {
                if tokio::time::timeout_at(deadline, appended).await.is_err() {
                    return Ok(RespValue::Null.encode());
                }
            }
            None => appended.await,
        }
    }
}

fn read_streams(keyspace: &Keyspace, positions: &[(String, StreamId)]) -> Vec<RespValue> {
    positions
        .iter()
        .filter_map(|(key, after)| {
            let entries = keyspace.streams.read_after(key, *after);

            if entries.is_empty() {
                return None;
            }

            Some(RespValue::Array(vec![
                RespValue::BulkString(key.clone()),
                parse_stream_entries_to_resp(&entries),
            ]))
        })
        .collect()
}
