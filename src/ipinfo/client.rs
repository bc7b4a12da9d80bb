use crate::app_config::AppConfig;
use reqwest::header::HeaderValue;
use reqwest::{Client, header};
use thiserror::Error;

pub fn new_client(config: &AppConfig) -> Result<Client, IpInfoClientError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(token) = config.lookup().token() {
        let mut authorization_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
        authorization_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization_value);
    }

    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .timeout(config.lookup().timeout())
        .build()?;
    Ok(client)
}

#[derive(Error, Debug)]
pub enum IpInfoClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("lookup client set an invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
}
