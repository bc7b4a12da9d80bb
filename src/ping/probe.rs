use crate::app_config::AppConfig;
use crate::domain::{LatencyProbe, LatencySample};
use crate::ping::output_parser::parse_average_rtt;
use async_trait::async_trait;
use std::io;
use std::net::IpAddr;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

// Every ping implementation waits this long between echo requests
const PING_INTERVAL: Duration = Duration::from_secs(1);
// Extra time for process start-up and exit
const GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Measures latency by running the system `ping`.
#[derive(Debug)]
pub struct PingProbe {
    program: String,
    sample_count: u32,
    timeout_per_sample: Duration,
    platform: Platform,
}

impl PingProbe {
    pub fn new(config: &AppConfig) -> Self {
        PingProbe {
            program: config.probe().program().to_string(),
            sample_count: config.probe().sample_count(),
            timeout_per_sample: config.probe().timeout_per_sample(),
            platform: Platform::current(),
        }
    }

    fn program(&self, ip: IpAddr) -> &str {
        // BSD/macOS `ping` is IPv4 only
        if self.platform == Platform::Bsd && ip.is_ipv6() && self.program == "ping" {
            "ping6"
        } else {
            &self.program
        }
    }

    fn arguments(&self, ip: IpAddr) -> Vec<String> {
        let count = self.sample_count.to_string();
        let mut arguments = match self.platform {
            // iputils expects whole seconds
            Platform::Linux => vec![
                "-c".to_string(),
                count,
                "-W".to_string(),
                self.timeout_per_sample.as_secs().max(1).to_string(),
            ],
            // ping6 has no per-reply timeout, the deadline bounds it instead
            Platform::Bsd if ip.is_ipv6() => vec!["-c".to_string(), count],
            Platform::Bsd => vec![
                "-c".to_string(),
                count,
                "-W".to_string(),
                self.timeout_per_sample.as_millis().to_string(),
            ],
            Platform::Windows => vec![
                "-n".to_string(),
                count,
                "-w".to_string(),
                self.timeout_per_sample.as_millis().to_string(),
            ],
        };
        arguments.push(ip.to_string());
        arguments
    }

    /// Requests go out one interval apart, so the run lasts until the last
    /// request's reply wait expires. iputils rounds that wait up to a second.
    fn deadline(&self) -> Duration {
        PING_INTERVAL * self.sample_count.saturating_sub(1) + self.timeout_per_sample.max(PING_INTERVAL) + GRACE_PERIOD
    }

    #[instrument(skip(self))]
    async fn run(&self, ip: IpAddr) -> Result<LatencySample, PingError> {
        let program = self.program(ip);
        let arguments = self.arguments(ip);
        debug!(program, ?arguments, "📡 Spawning probe");

        let output = Command::new(program)
            .args(&arguments)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let deadline = self.deadline();
        let output = timeout(deadline, output).await.map_err(|_| PingError::TimedOut(deadline))??;

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(status = %output.status, "📡 Probe finished:\n{}", stdout);

        match parse_average_rtt(&stdout) {
            Some(average) => LatencySample::new(average).ok_or(PingError::Unparseable),
            None if !output.status.success() => Err(PingError::NoReplies(output.status)),
            None => Err(PingError::Unparseable),
        }
    }
}

#[async_trait]
impl LatencyProbe for PingProbe {
    async fn measure(&self, ip: IpAddr) -> Option<LatencySample> {
        info!("📡 Measuring the round trip to {} ({} samples)...", ip, self.sample_count);

        match self.run(ip).await {
            Ok(sample) => {
                info!("📡 Measuring the round trip to {}... OK, {} ms", ip, sample.round_trip_ms());
                Some(sample)
            }
            Err(e) => {
                warn!("⚠️ Unable to measure the round trip to {}: {}", ip, e);
                None
            }
        }
    }
}

#[derive(Error, Debug)]
enum PingError {
    #[error("unable to run the probe: {0}")]
    Spawn(#[from] io::Error),
    #[error("no reply within {0:?}")]
    TimedOut(Duration),
    #[error("no replies received ({0})")]
    NoReplies(ExitStatus),
    #[error("the probe output did not contain a round trip time")]
    Unparseable,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Platform {
    Linux,
    Bsd,
    Windows,
}

impl Platform {
    fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(any(target_os = "macos", target_os = "freebsd", target_os = "openbsd", target_os = "netbsd")) {
            Platform::Bsd
        } else {
            Platform::Linux
        }
    }
}
