use thiserror::Error;

use crate::{resp::RespValue, store::StreamIdError};

/// Every failure a command can report to a client.
///
/// The `Display` text is the exact message sent on the wire, without the
/// leading `-` of the error frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("ERR wrong number of arguments for '{0}' command")]
    WrongNumberOfArguments(String),
    #[error("ERR unknown command '{0}'")]
    UnknownCommand(String),
    #[error("ERR invalid expire time in 'SET' command")]
    InvalidSetExpireTime,
    #[error("ERR syntax error in 'SET' command")]
    InvalidSetSyntax,
    #[error("ERR value is not an integer or out of range")]
    InvalidInteger,
    #[error("ERR timeout is not a float or out of range")]
    InvalidBlpopTimeout,
    #[error("ERR timeout is not an integer or out of range")]
    InvalidXreadTimeout,
    #[error("ERR syntax error")]
    SyntaxError,
    #[error(transparent)]
    InvalidStreamId(#[from] StreamIdError),
    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,
}

impl CommandError {
    pub fn wrong_number_of_arguments(command: &str) -> Self {
        CommandError::WrongNumberOfArguments(command.to_uppercase())
    }

    /// The encoded error reply.
    pub fn as_string(&self) -> String {
        RespValue::Error(self.to_string()).encode()
    }
}
