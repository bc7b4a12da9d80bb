use crate::domain::LatencySample;
use async_trait::async_trait;
use std::fmt::Debug;
use std::net::IpAddr;

#[async_trait]
pub trait LatencyProbe: Debug + Send + Sync {
    /// Measures the average round trip to `ip`. `None` means no usable sample
    /// was obtained, which callers must treat as "not available" rather than failure.
    async fn measure(&self, ip: IpAddr) -> Option<LatencySample>;
}
