mod client;
mod ip_info_response;
mod resolver;

pub use client::{IpInfoClientError, new_client};
pub use resolver::IpInfoResolver;
