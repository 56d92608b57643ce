// src/checks/http.rs
use super::CheckError;
use reqwest::StatusCode;

/// Issues a GET and requires status 200 exactly. Redirect chains and other
/// 2xx codes are not accepted: a health endpoint that answers anything but
/// 200 is reported with that code as the failure detail.
pub(super) async fn verify(url: &str) -> Result<(), CheckError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| CheckError::Connection(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CheckError::Connection(e.to_string()))?;

    let status = response.status();
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(CheckError::Protocol(format!(
            "unexpected status {}",
            status.as_u16()
        )))
    }
}
