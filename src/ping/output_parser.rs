/// Extracts the average round-trip time in milliseconds from the output of the
/// system `ping`. Understands the iputils, BSD/macOS, BusyBox and Windows
/// summaries and falls back to averaging the individual replies.
pub fn parse_average_rtt(output: &str) -> Option<f64> {
    summary_average(output)
        .or_else(|| windows_average(output))
        .or_else(|| reply_average(output))
}

// rtt min/avg/max/mdev = 9.845/10.268/10.807/0.351 ms
// round-trip min/avg/max/stddev = 9.845/10.268/10.807/0.351 ms
fn summary_average(output: &str) -> Option<f64> {
    let line = output.lines().find(|line| line.contains("min/avg/max"))?;
    let (_, values) = line.split_once('=')?;
    values.split_whitespace().next()?.split('/').nth(1)?.parse::<f64>().ok()
}

// Minimum = 9ms, Maximum = 11ms, Average = 10ms
fn windows_average(output: &str) -> Option<f64> {
    let (_, rest) = output.split_once("Average = ")?;
    leading_number(rest)
}

// 64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=10.3 ms
fn reply_average(output: &str) -> Option<f64> {
    let times = output
        .lines()
        .filter_map(|line| line.split_once("time=").and_then(|(_, rest)| leading_number(rest.trim_start())))
        .collect::<Vec<_>>();

    if times.is_empty() {
        return None;
    }

    Some(times.iter().sum::<f64>() / times.len() as f64)
}

fn leading_number(text: &str) -> Option<f64> {
    let end = text.find(|c: char| !(c.is_ascii_digit() || c == '.')).unwrap_or(text.len());
    text[..end].parse::<f64>().ok()
}
