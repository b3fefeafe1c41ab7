use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::{
    commands::CommandHandler,
    input::{take_frame, Request},
    store::Keyspace,
};

/// Serves one client until it disconnects.
///
/// Requests are handled strictly in the order they arrive, including
/// pipelined ones that share a read, and each gets exactly one reply. A
/// blocking command holds up the rest of this client's requests but no
/// other client. If the client disconnects while a command is still
/// running, that command is dropped without a reply. Returns the I/O error
/// that ended the connection, if any.
pub async fn handle_connection<S>(mut stream: S, keyspace: Arc<Keyspace>) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buffer = BytesMut::with_capacity(4096);

    loop {
        while let Some(frame) = take_frame(&mut buffer) {
            let request = Request::decode(&frame);

            if request.is_empty() {
                continue;
            }

            debug!(
                command = %request.name,
                arguments = request.arguments.len(),
                "received command"
            );

            let handler = CommandHandler::new(request);
            let handling = handler.handle(&keyspace);
            tokio::pin!(handling);

            // Keep reading while a command is in flight so a client that goes
            // away during a blocking call is noticed and its call dropped.
            let reply = loop {
                tokio::select! {
                    biased;
                    reply = &mut handling => break reply,
                    read = stream.read_buf(&mut buffer) => {
                        if read? == 0 {
                            debug!(command = %handler.name, "client disconnected during command");
                            return Ok(());
                        }
                    }
                }
            };

            debug!(bytes = reply.len(), "sending reply");
            stream.write_all(reply.as_bytes()).await?;
        }

        stream.flush().await?;

        if stream.read_buf(&mut buffer).await? == 0 {
            if !buffer.is_empty() {
                debug!(bytes = buffer.len(), "dropping incomplete request at disconnect");
            }

            return Ok(());
        }
    }
}
