use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

/// Well-known public DNS endpoint used as the reachability probe target.
const PROBE_ADDR: &str = "8.8.8.8:53";

/// Timeout for the connectivity probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Check whether a TCP connection to `addr` can be established within `timeout`.
#[must_use]
pub fn reachable(addr: SocketAddr, timeout: Duration) -> bool {
    TcpStream::connect_timeout(&addr, timeout).is_ok()
}

/// Probe general internet reachability with a short TCP connect to a public
/// DNS server. A `false` result means the host is considered offline.
#[must_use]
pub fn check_internet(timeout: Duration) -> bool {
    PROBE_ADDR
        .parse::<SocketAddr>()
        .is_ok_and(|addr| reachable(addr, timeout))
}
