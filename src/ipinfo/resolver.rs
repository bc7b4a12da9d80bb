use crate::app_config::AppConfig;
use crate::domain::{Location, LocationResolver, ResolutionError};
use crate::ipinfo::ip_info_response::IpInfoResponse;
use async_trait::async_trait;
use reqwest::Client;
use std::net::IpAddr;
use tracing::{debug, info, instrument};

#[derive(Debug)]
pub struct IpInfoResolver {
    client: Client,
    url: String,
}

impl IpInfoResolver {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        IpInfoResolver {
            client,
            url: config.lookup().url().to_string(),
        }
    }

    #[instrument(skip(self))]
    async fn lookup(&self, url: String, subject: &str) -> Result<Location, ResolutionError> {
        info!("🌍 Resolving the location of {}...", subject);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(body = %body, "🌍 Lookup service responded");

        let location = serde_json::from_str::<IpInfoResponse>(&body)?.into_location(subject)?;
        info!("🌍 Resolving the location of {}... OK, {}", subject, location);

        Ok(location)
    }
}

#[async_trait]
impl LocationResolver for IpInfoResolver {
    async fn resolve(&self, ip: IpAddr) -> Result<Location, ResolutionError> {
        self.lookup(format!("{}/{}/json", self.url, ip), &ip.to_string()).await
    }

    async fn resolve_self(&self) -> Result<Location, ResolutionError> {
        self.lookup(format!("{}/json", self.url), "your own public IP").await
    }
}
