use std::time::Duration;

use reqwest::{
    header::USER_AGENT,
    Client,
    Response,
};

use crate::core::{
    LoadError,
    VerbDrillError,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn http_client() -> Result<Client, VerbDrillError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| VerbDrillError::Custom(format!("HTTP client build failed: {e}")))
}

/// GET `url` and return the body as text, treating any non-2xx status as a load failure.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, LoadError> {
    let resp = client.get(url).header(USER_AGENT, "verbdrill/0.1 (+reqwest)").send().await?;
    ensure_success(&resp)?;
    Ok(resp.text().await?)
}

fn ensure_success(resp: &Response) -> Result<(), LoadError> {
    if !resp.status().is_success() {
        return Err(LoadError::Status {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}
