// src/checks/redis.rs
use super::CheckError;
use redis::Client;

/// Connects and issues `INFO server`. Succeeds iff the command returns
/// without error; the payload itself is not inspected.
pub(super) async fn verify(url: &str) -> Result<(), CheckError> {
    let client = Client::open(url).map_err(|e| CheckError::Connection(e.to_string()))?;

    let mut connection = client
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| CheckError::Connection(e.to_string()))?;

    redis::cmd("INFO")
        .arg("server")
        .query_async::<String>(&mut connection)
        .await
        .map(|_| ())
        .map_err(|e| CheckError::Protocol(e.to_string()))
}
