// src/checks/amqp.rs
use super::CheckError;
use lapin::{Connection, ConnectionProperties};
use tracing::debug;

// 200 = AMQP reply-code "replySuccess"
const REPLY_SUCCESS: u16 = 200;

/// Succeeds iff the AMQP connection handshake completes. No channel or queue
/// operations are attempted; the broker accepting the handshake is the
/// liveness criterion.
pub(super) async fn verify(url: &str) -> Result<(), CheckError> {
    let connection = Connection::connect(url, ConnectionProperties::default())
        .await
        .map_err(|e| CheckError::Connection(e.to_string()))?;

    debug!("amqp handshake completed");

    // The check already passed; a failed close is not a health signal.
    let _ = connection.close(REPLY_SUCCESS, "healthcheck done").await;
    Ok(())
}
