use crate::distance::DEFAULT_PROPAGATION_KM_PER_MS;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    lookup: Lookup,
    probe: Probe,
    estimation: Estimation,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppConfigError> {
        let builder = Self::defaults()?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("IPDISTANCE").separator("__"));

        Self::build(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("lookup.url", "https://ipinfo.io")?
            .set_default("lookup.timeout", "5s")?
            .set_default("probe.program", "ping")?
            .set_default("probe.sample_count", 4_i64)?
            .set_default("probe.timeout_per_sample", "1s")?
            .set_default("estimation.propagation_km_per_ms", DEFAULT_PROPAGATION_KM_PER_MS)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, AppConfigError> {
        let config = builder.build()?.try_deserialize::<AppConfig>()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppConfigError> {
        if self.probe.sample_count == 0 {
            return Err(AppConfigError::Invalid("probe.sample_count must be at least 1".to_string()));
        }

        let speed = self.estimation.propagation_km_per_ms;
        if !(speed.is_finite() && speed > 0.0) {
            return Err(AppConfigError::Invalid(format!(
                "estimation.propagation_km_per_ms must be a positive number, found {}",
                speed
            )));
        }

        Ok(())
    }

    pub fn lookup(&self) -> &Lookup {
        &self.lookup
    }

    pub fn probe(&self) -> &Probe {
        &self.probe
    }

    pub fn estimation(&self) -> &Estimation {
        &self.estimation
    }

    pub fn with_sample_count(mut self, sample_count: u32) -> Self {
        self.probe.sample_count = sample_count.max(1);
        self
    }

    pub fn with_propagation_km_per_ms(mut self, propagation_km_per_ms: f64) -> Self {
        self.estimation.propagation_km_per_ms = propagation_km_per_ms;
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct Lookup {
    url: String,
    token: Option<String>,
    #[serde(with = "humantime_serde")]
    timeout: Duration,
}

impl Lookup {
    pub fn url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[derive(Debug, Deserialize)]
pub struct Probe {
    program: String,
    sample_count: u32,
    #[serde(with = "humantime_serde")]
    timeout_per_sample: Duration,
}

impl Probe {
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn timeout_per_sample(&self) -> Duration {
        self.timeout_per_sample
    }
}

#[derive(Debug, Deserialize)]
pub struct Estimation {
    propagation_km_per_ms: f64,
}

impl Estimation {
    pub fn propagation_km_per_ms(&self) -> f64 {
        self.propagation_km_per_ms
    }
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("unable to read the configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                lookup: Lookup {
                    url: "https://ipinfo.io".to_string(),
                    token: None,
                    timeout: Duration::from_secs(5),
                },
                probe: Probe {
                    program: "ping".to_string(),
                    sample_count: 4,
                    timeout_per_sample: Duration::from_secs(1),
                },
                estimation: Estimation {
                    propagation_km_per_ms: DEFAULT_PROPAGATION_KM_PER_MS,
                },
            },
        }
    }

    pub fn lookup_url(mut self, url: String) -> Self {
        self.config.lookup.url = url;
        self
    }

    pub fn lookup_token(mut self, token: &str) -> Self {
        self.config.lookup.token = Some(token.to_string());
        self
    }

    pub fn probe_program(mut self, program: &str) -> Self {
        self.config.probe.program = program.to_string();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn defaults_match_the_classic_ping_setup() -> Result<(), AppConfigError> {
        let config = AppConfig::build(AppConfig::defaults()?)?;

        assert_eq!(config.lookup().url(), "https://ipinfo.io");
        assert_eq!(config.lookup().token(), None);
        assert_eq!(config.lookup().timeout(), Duration::from_secs(5));
        assert_eq!(config.probe().program(), "ping");
        assert_eq!(config.probe().sample_count(), 4);
        assert_eq!(config.probe().timeout_per_sample(), Duration::from_secs(1));
        assert_eq!(config.estimation().propagation_km_per_ms(), 200.0);

        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<(), AppConfigError> {
        let toml = r#"
            [lookup]
            url = "https://lookup.example/"
            token = "secret"
            timeout = "2s 500ms"

            [probe]
            sample_count = 8
        "#;
        let builder = AppConfig::defaults()?.add_source(config::File::from_str(toml, FileFormat::Toml));
        let config = AppConfig::build(builder)?;

        assert_eq!(config.lookup().url(), "https://lookup.example");
        assert_eq!(config.lookup().token(), Some("secret"));
        assert_eq!(config.lookup().timeout(), Duration::from_millis(2500));
        assert_eq!(config.probe().sample_count(), 8);
        assert_eq!(config.probe().timeout_per_sample(), Duration::from_secs(1));

        Ok(())
    }

    #[test]
    fn non_positive_propagation_speed_is_rejected() -> Result<(), AppConfigError> {
        let toml = "[estimation]\npropagation_km_per_ms = 0.0\n";
        let builder = AppConfig::defaults()?.add_source(config::File::from_str(toml, FileFormat::Toml));

        let result = AppConfig::build(builder);
        assert!(matches!(result, Err(AppConfigError::Invalid(_))), "got {:?}", result);

        Ok(())
    }

    #[rstest]
    #[case::infinite("inf")]
    #[case::not_a_number("nan")]
    #[case::negative("-200.0")]
    fn unusable_propagation_speeds_are_rejected(#[case] value: &str) -> Result<(), AppConfigError> {
        let toml = format!("[estimation]\npropagation_km_per_ms = {}\n", value);
        let builder = AppConfig::defaults()?.add_source(config::File::from_str(&toml, FileFormat::Toml));

        let result = AppConfig::build(builder);
        assert!(matches!(result, Err(AppConfigError::Invalid(_))), "got {:?}", result);

        Ok(())
    }

    #[test]
    fn zero_samples_are_rejected() -> Result<(), AppConfigError> {
        let toml = "[probe]\nsample_count = 0\n";
        let builder = AppConfig::defaults()?.add_source(config::File::from_str(toml, FileFormat::Toml));

        let result = AppConfig::build(builder);
        assert!(matches!(result, Err(AppConfigError::Invalid(_))), "got {:?}", result);

        Ok(())
    }

    #[test]
    fn command_line_overrides_replace_configured_values() {
        let config = AppConfigBuilder::new().build().with_sample_count(2).with_propagation_km_per_ms(150.0);

        assert_eq!(config.probe().sample_count(), 2);
        assert_eq!(config.estimation().propagation_km_per_ms(), 150.0);
    }
}
