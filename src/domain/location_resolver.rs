use crate::domain::Location;
use async_trait::async_trait;
use std::fmt::Debug;
use std::net::IpAddr;
use thiserror::Error;

#[async_trait]
pub trait LocationResolver: Debug + Send + Sync {
    async fn resolve(&self, ip: IpAddr) -> Result<Location, ResolutionError>;

    /// Resolves the public address the lookup service sees the caller connect from.
    async fn resolve_self(&self) -> Result<Location, ResolutionError>;
}

#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("request to the lookup service failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("lookup service returned a malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("could not retrieve the location of {0}")]
    MissingLocation(String),
    #[error("{0} is a private or reserved address without a location")]
    Bogon(IpAddr),
}
