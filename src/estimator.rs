use crate::app_config::AppConfig;
use crate::distance::{distance_km, estimate_km};
use crate::domain::{DistanceEstimate, LatencyProbe, LocationResolver, ResolutionError, TargetSpec};
use crate::report::{DistanceReport, RttMeasurement};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Resolves both ends, computes the great-circle distance and, when the probe
/// yields a sample, the RTT-based estimate. Only resolution failures abort.
#[instrument(skip(resolver, probe, config))]
pub async fn estimate_distance(
    spec: &TargetSpec,
    resolver: &dyn LocationResolver,
    probe: &dyn LatencyProbe,
    config: &AppConfig,
) -> Result<DistanceReport, EstimationError> {
    let source = match spec.source_ip {
        Some(ip) => resolver.resolve(ip).await,
        None => resolver.resolve_self().await,
    }
    .map_err(EstimationError::Source)?;
    debug!("Source resolved to {}", source);

    let target = resolver.resolve(spec.target_ip).await.map_err(EstimationError::Target)?;
    debug!("Target resolved to {}", target);

    let geo = DistanceEstimate::geo(distance_km(&source.coordinate, &target.coordinate));
    info!(method = ?geo.method, "📏 Great-circle distance: {}", geo);

    let rtt = probe.measure(spec.target_ip).await.map(|sample| RttMeasurement {
        sample,
        estimate: DistanceEstimate::rtt(estimate_km(sample.round_trip_ms(), config.estimation().propagation_km_per_ms())),
    });

    match &rtt {
        Some(rtt) => info!(method = ?rtt.estimate.method, "📏 RTT-based distance: {}", rtt.estimate),
        None => info!("📏 RTT-based distance: not available"),
    }

    Ok(DistanceReport {
        custom_source: spec.source_ip,
        source,
        target,
        geo,
        rtt,
    })
}

#[derive(Error, Debug)]
pub enum EstimationError {
    #[error("could not determine the source location: {0}")]
    Source(ResolutionError),
    #[error("could not determine the target location: {0}")]
    Target(ResolutionError),
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use crate::domain::EstimationMethod;
    use crate::estimator::stubs::{StubProbe, StubResolver, ip, location};
    use pretty_assertions::assert_eq;
    use test_log::test;

    const TARGET: &str = "192.0.2.10";
    const CUSTOM_SOURCE: &str = "198.51.100.20";

    fn spec(source_ip: Option<&str>) -> TargetSpec {
        TargetSpec {
            target_ip: ip(TARGET),
            source_ip: source_ip.map(ip),
        }
    }

    #[test(tokio::test)]
    async fn reports_geo_and_rtt_distance() -> Result<(), EstimationError> {
        let resolver = StubResolver::default()
            .with_own_location(location(0.0, 0.0))
            .with_location(ip(TARGET), location(0.0, 90.0));
        let probe = StubProbe::returning(20.0);
        let config = AppConfigBuilder::new().build();

        let report = estimate_distance(&spec(None), &resolver, &probe, &config).await?;

        assert_eq!(report.geo.method, EstimationMethod::Geo);
        assert!((report.geo.kilometers - 10007.5).abs() < 0.1, "got {}", report.geo.kilometers);

        let rtt = report.rtt.clone().expect("expected an RTT measurement");
        assert_eq!(rtt.sample.round_trip_ms(), 20.0);
        assert_eq!(rtt.estimate, DistanceEstimate::rtt(2000.0));

        let text = report.to_string();
        assert!(text.contains("Estimated Distance: 10007.54 km"), "got '{}'", text);
        assert!(text.contains("Estimated Distance from RTT: 2000.00 km"), "got '{}'", text);

        assert_eq!(resolver.calls(), vec!["self", TARGET]);
        assert_eq!(probe.measured(), vec![ip(TARGET)]);

        Ok(())
    }

    #[test(tokio::test)]
    async fn reports_geo_distance_when_the_probe_has_no_sample() -> Result<(), EstimationError> {
        let resolver = StubResolver::default()
            .with_own_location(location(0.0, 0.0))
            .with_location(ip(TARGET), location(0.0, 90.0));
        let probe = StubProbe::default();
        let config = AppConfigBuilder::new().build();

        let report = estimate_distance(&spec(None), &resolver, &probe, &config).await?;

        assert_eq!(report.rtt, None);
        let text = report.to_string();
        assert!(text.contains("Estimated Distance: 10007.54 km"), "got '{}'", text);
        assert!(text.contains("RTT: not available"), "got '{}'", text);

        Ok(())
    }

    #[test(tokio::test)]
    async fn keeps_a_zero_millisecond_round_trip() -> Result<(), EstimationError> {
        let resolver = StubResolver::default()
            .with_own_location(location(52.0, 4.0))
            .with_location(ip(TARGET), location(52.0, 4.0));
        let probe = StubProbe::returning(0.0);
        let config = AppConfigBuilder::new().build();

        let report = estimate_distance(&spec(None), &resolver, &probe, &config).await?;

        assert_eq!(report.geo.kilometers, 0.0);
        assert_eq!(report.rtt.map(|rtt| rtt.estimate), Some(DistanceEstimate::rtt(0.0)));

        Ok(())
    }

    #[test(tokio::test)]
    async fn uses_the_custom_source_instead_of_the_own_location() -> Result<(), EstimationError> {
        let resolver = StubResolver::default()
            .with_location(ip(CUSTOM_SOURCE), location(51.5074, -0.1278))
            .with_location(ip(TARGET), location(40.7128, -74.0060));
        let probe = StubProbe::returning(70.0);
        let config = AppConfigBuilder::new().build().with_propagation_km_per_ms(100.0);

        let report = estimate_distance(&spec(Some(CUSTOM_SOURCE)), &resolver, &probe, &config).await?;

        assert_eq!(resolver.calls(), vec![CUSTOM_SOURCE, TARGET]);
        assert_eq!(report.custom_source, Some(ip(CUSTOM_SOURCE)));
        assert!((report.geo.kilometers - 5570.0).abs() <= 10.0, "got {}", report.geo.kilometers);
        assert_eq!(report.rtt.map(|rtt| rtt.estimate), Some(DistanceEstimate::rtt(3500.0)));

        Ok(())
    }

    #[test(tokio::test)]
    async fn aborts_when_the_target_cannot_be_resolved() {
        let resolver = StubResolver::default().with_own_location(location(0.0, 0.0));
        let probe = StubProbe::returning(20.0);
        let config = AppConfigBuilder::new().build();

        let result = estimate_distance(&spec(None), &resolver, &probe, &config).await;

        assert!(matches!(result, Err(EstimationError::Target(ResolutionError::MissingLocation(_)))), "got {:?}", result);
        assert!(probe.measured().is_empty(), "the probe must not run after a failed resolution");
    }

    #[test(tokio::test)]
    async fn aborts_when_the_source_cannot_be_resolved() {
        let resolver = StubResolver::default().with_location(ip(TARGET), location(0.0, 90.0));
        let probe = StubProbe::returning(20.0);
        let config = AppConfigBuilder::new().build();

        let result = estimate_distance(&spec(None), &resolver, &probe, &config).await;

        assert!(matches!(result, Err(EstimationError::Source(_))), "got {:?}", result);
        assert_eq!(resolver.calls(), vec!["self"]);
        assert!(probe.measured().is_empty());
    }
}
