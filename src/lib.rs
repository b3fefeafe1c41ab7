//! An in-memory, Redis-compatible key-value server.
//!
//! Three value types are supported, each in its own store:
//!
//! - Strings with optional expiry (SET, GET)
//! - Lists with blocking pops served in arrival order (RPUSH, LPUSH, LRANGE, LLEN, LPOP, BLPOP)
//! - Append-only streams with monotonic entry IDs (XADD, XRANGE, XREAD)
//!
//! plus COMMAND, PING, ECHO and TYPE. Clients speak the Redis Serialization
//! Protocol (RESP) or plain inline commands over TCP; every connection runs
//! on its own Tokio task and shares one [`store::Keyspace`].

pub mod commands;
pub mod connection;
pub mod input;
pub mod resp;
pub mod server;
pub mod store;
