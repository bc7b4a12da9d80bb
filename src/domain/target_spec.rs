use std::net::IpAddr;

/// What to measure: the target host and, optionally, a custom source host
/// that replaces the caller's own public address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetSpec {
    pub target_ip: IpAddr,
    pub source_ip: Option<IpAddr>,
}
