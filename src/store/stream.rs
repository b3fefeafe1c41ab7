use std::{
    fmt,
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

use dashmap::{mapref::entry::Entry, DashMap};
use thiserror::Error;
use tokio::sync::{futures::Notified, Notify};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamIdError {
    #[error("ERR Invalid stream ID specified as stream command argument")]
    Invalid,
    #[error("ERR The ID specified in XADD must be greater than 0-0")]
    NotGreaterThanZero,
    #[error("ERR The ID specified in XADD is equal or smaller than the target stream top item")]
    NotGreaterThanTop,
}

/// A stream entry ID, ordered by milliseconds first and sequence second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StreamId {
    pub ms: u64,
    pub seq: u64,
}

impl StreamId {
    pub const MIN: StreamId = StreamId { ms: 0, seq: 0 };
    pub const MAX: StreamId = StreamId {
        ms: u64::MAX,
        seq: u64::MAX,
    };

    pub fn new(ms: u64, seq: u64) -> Self {
        Self { ms, seq }
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.ms, self.seq)
    }
}

impl FromStr for StreamId {
    type Err = StreamIdError;

    /// Parses a fully specified `<ms>-<seq>` ID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ms, seq) = s.split_once('-').ok_or(StreamIdError::Invalid)?;

        let ms = ms.parse::<u64>().map_err(|_| StreamIdError::Invalid)?;
        let seq = seq.parse::<u64>().map_err(|_| StreamIdError::Invalid)?;

        Ok(StreamId::new(ms, seq))
    }
}

/// The ID argument of XADD before the stream fills in the generated parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedId {
    /// `*`
    Auto,
    /// `<ms>-*`
    AutoSequence(u64),
    /// `<ms>-<seq>`
    Explicit(StreamId),
}

impl FromStr for RequestedId {
    type Err = StreamIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(RequestedId::Auto);
        }

        if let Some(ms) = s.strip_suffix("-*") {
            let ms = ms.parse::<u64>().map_err(|_| StreamIdError::Invalid)?;
            return Ok(RequestedId::AutoSequence(ms));
        }

        s.parse::<StreamId>().map(RequestedId::Explicit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEntry {
    pub id: StreamId,
    pub fields: Vec<(String, String)>,
}

/// Entries ordered by strictly increasing ID. Never empty once stored.
#[derive(Debug, Default)]
struct Stream {
    entries: Vec<StreamEntry>,
}

impl Stream {
    fn last_id(&self) -> Option<StreamId> {
        self.entries.last().map(|entry| entry.id)
    }

    /// One past the highest sequence already used at `ms`.
    fn next_sequence(&self, ms: u64) -> Option<u64> {
        self.entries
            .iter()
            .rev()
            .take_while(|entry| entry.id.ms >= ms)
            .find(|entry| entry.id.ms == ms)
            .map(|entry| entry.id.seq.saturating_add(1))
    }

    /// Resolves `requested` into a concrete ID and checks it can be appended.
    fn next_id(&self, requested: RequestedId, now_ms: u64) -> Result<StreamId, StreamIdError> {
        let id = match requested {
            RequestedId::Auto => StreamId::new(now_ms, self.next_sequence(now_ms).unwrap_or(0)),
            RequestedId::AutoSequence(ms) => {
                let default = if ms == 0 { 1 } else { 0 };
                StreamId::new(ms, self.next_sequence(ms).unwrap_or(default))
            }
            RequestedId::Explicit(id) => id,
        };

        if id == StreamId::MIN {
            return Err(StreamIdError::NotGreaterThanZero);
        }

        if self.last_id().is_some_and(|last| id <= last) {
            return Err(StreamIdError::NotGreaterThanTop);
        }

        Ok(id)
    }

    fn range(&self, start: StreamId, end: StreamId) -> &[StreamEntry] {
        let from = self.entries.partition_point(|entry| entry.id < start);
        let to = self.entries.partition_point(|entry| entry.id <= end);

        if from >= to {
            &[]
        } else {
            &self.entries[from..to]
        }
    }

    fn after(&self, id: StreamId) -> &[StreamEntry] {
        let from = self.entries.partition_point(|entry| entry.id <= id);
        &self.entries[from..]
    }
}

/// Append-only streams.
///
/// ID generation, validation and the append happen under the key's entry
/// lock, so two concurrent XADDs on one stream can never produce the same or
/// a decreasing ID. Every successful append wakes all `appended` listeners.
#[derive(Debug, Default)]
pub struct StreamStore {
    streams: DashMap<String, Stream>,
    appended: Notify,
}

impl StreamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends without validating the ID, creating the stream if needed.
    pub fn add_entry(&self, key: &str, id: StreamId, fields: Vec<(String, String)>) {
        self.streams
            .entry(key.to_string())
            .or_default()
            .entries
            .push(StreamEntry { id, fields });

        self.appended.notify_waiters();
    }

    /// Generates and validates the entry ID, then appends. Nothing is stored
    /// when the ID is rejected, not even an empty stream.
    pub fn xadd(
        &self,
        key: &str,
        requested: RequestedId,
        fields: Vec<(String, String)>,
    ) -> Result<StreamId, StreamIdError> {
        let now_ms = current_millis();

        let id = match self.streams.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                let stream = occupied.get_mut();
                let id = stream.next_id(requested, now_ms)?;
                stream.entries.push(StreamEntry { id, fields });
                id
            }
            Entry::Vacant(vacant) => {
                let mut stream = Stream::default();
                let id = stream.next_id(requested, now_ms)?;
                stream.entries.push(StreamEntry { id, fields });
                vacant.insert(stream);
                id
            }
        };

        self.appended.notify_waiters();
        Ok(id)
    }

    /// Entries with `start <= id <= end`.
    pub fn range(&self, key: &str, start: StreamId, end: StreamId) -> Vec<StreamEntry> {
        self.streams
            .get(key)
            .map(|stream| stream.range(start, end).to_vec())
            .unwrap_or_default()
    }

    /// Entries with an ID strictly greater than `after`.
    pub fn read_after(&self, key: &str, after: StreamId) -> Vec<StreamEntry> {
        self.streams
            .get(key)
            .map(|stream| stream.after(after).to_vec())
            .unwrap_or_default()
    }

    pub fn last_id(&self, key: &str) -> Option<StreamId> {
        self.streams.get(key).and_then(|stream| stream.last_id())
    }

    pub fn exists(&self, key: &str) -> bool {
        self.streams.contains_key(key)
    }

    /// A future that completes on the next append to any stream.
    ///
    /// Call `enable` on it (or poll it once) before checking the streams, so
    /// an append that lands between the check and the wait is not missed.
    pub fn appended(&self) -> Notified<'_> {
        self.appended.notified()
    }
}

fn current_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
