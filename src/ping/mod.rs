mod output_parser;
mod probe;

pub use probe::PingProbe;
