use crate::{
    commands::{
        blpop::blpop,
        command_error::CommandError,
        echo::echo,
        get::get,
        llen::llen,
        lpop::lpop,
        lrange::lrange,
        ping::ping,
        rpush_and_lpush::{lpush, rpush},
        set::set,
        type_command::type_command,
        xadd::xadd,
        xrange::xrange,
        xread::xread,
    },
    input::Request,
    resp::RespValue,
    store::Keyspace,
};

/// A decoded request, ready to be dispatched against the keyspace.
#[derive(Debug, PartialEq, Clone)]
pub struct CommandHandler {
    /// The uppercased command name (e.g., "GET", "SET", "PING")
    pub name: String,
    /// The arguments passed to the command
    pub arguments: Vec<String>,
}

impl CommandHandler {
    pub fn new(request: Request) -> Self {
        Self {
            name: request.name,
            arguments: request.arguments,
        }
    }

    /// Executes the command by dispatching to the matching handler.
    ///
    /// # Supported Commands
    ///
    /// - Basic: COMMAND, PING, ECHO, TYPE
    /// - String: GET, SET
    /// - List: RPUSH, LPUSH, LRANGE, LLEN, LPOP, BLPOP
    /// - Stream: XADD, XRANGE, XREAD
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - RESP-encoded reply from the command handler
    /// * `Err(CommandError::UnknownCommand)` - If the command is not recognized
    /// * `Err(CommandError)` - Argument, type and ID errors from individual handlers
    pub async fn handle_command(&self, keyspace: &Keyspace) -> Result<String, CommandError> {
        let arguments = self.arguments.clone();

        match self.name.as_str() {
            "COMMAND" => Ok(RespValue::SimpleString("OK".to_string()).encode()),
            "PING" => ping(arguments),
            "ECHO" => echo(arguments),
            "TYPE" => type_command(keyspace, arguments),
            "SET" => set(keyspace, arguments),
            "GET" => get(keyspace, arguments),
            "RPUSH" => rpush(keyspace, arguments),
            "LPUSH" => lpush(keyspace, arguments),
            "LRANGE" => lrange(keyspace, arguments),
            "LLEN" => llen(keyspace, arguments),
            "LPOP" => lpop(keyspace, arguments),
            "BLPOP" => blpop(keyspace, arguments).await,
            "XADD" => xadd(keyspace, arguments),
            "XRANGE" => xrange(keyspace, arguments),
            "XREAD" => xread(keyspace, arguments).await,
            _ => Err(CommandError::UnknownCommand(self.name.clone())),
        }
    }

    /// Like [`CommandHandler::handle_command`], with errors turned into
    /// error replies. Every request gets exactly one reply.
    pub async fn handle(&self, keyspace: &Keyspace) -> String {
        match self.handle_command(keyspace).await {
            Ok(reply) => reply,
            Err(err) => err.as_string(),
        }
    }
}
