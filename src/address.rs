//! Agent address assembly
//!
//! The agent always listens on the standard DogStatsD port. IPv6 literals are
//! recognised by a colon-count heuristic and bracketed before the port is
//! appended.

/// Standard DogStatsD port
pub const STANDARD_PORT: u16 = 8125;

/// Returns true if `address` contains two or more `:` characters.
///
/// This is a heuristic, not an IPv6 grammar check: `"a::"` counts, and so
/// does garbage like `"::::"`.
pub fn is_ipv6(address: &str) -> bool {
    address.bytes().filter(|b| *b == b':').count() >= 2
}

/// Builds the `host:8125` string the client connects to.
pub fn format_address(host: &str) -> String {
    if is_ipv6(host) {
        format!("[{}]:{}", host, STANDARD_PORT)
    } else {
        format!("{}:{}", host, STANDARD_PORT)
    }
}

/// Rejects hosts that cannot form an address before any resolution happens.
pub(crate) fn is_plausible_host(host: &str) -> bool {
    !host.is_empty()
        && !host
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '/' | '[' | ']' | '@'))
}
