// src/checks/postgres.rs
use super::CheckError;
use tokio_postgres::{Client, NoTls};

/// Connects and runs `SELECT 1`. Succeeds iff the query returns exactly one
/// row holding the scalar 1; anything else from a live connection is a
/// protocol error, not a connection error.
pub(super) async fn verify(url: &str) -> Result<(), CheckError> {
    let (client, connection) = tokio_postgres::connect(url, NoTls)
        .await
        .map_err(|e| CheckError::Connection(e.to_string()))?;

    // The connection future drives the socket; it resolves on its own once
    // the client is dropped, so the driver task cannot outlive this attempt.
    let driver = tokio::spawn(connection);

    let result = select_one(&client).await;

    drop(client);
    let _ = driver.await;

    result
}

async fn select_one(client: &Client) -> Result<(), CheckError> {
    let rows = client
        .query("SELECT 1", &[])
        .await
        .map_err(|e| CheckError::Protocol(e.to_string()))?;

    if rows.len() != 1 {
        return Err(CheckError::Protocol("unexpected result".to_string()));
    }

    let value: i32 = rows[0]
        .try_get(0)
        .map_err(|e| CheckError::Protocol(e.to_string()))?;

    if value == 1 {
        Ok(())
    } else {
        Err(CheckError::Protocol("unexpected result".to_string()))
    }
}
