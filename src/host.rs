//! Host recognizers: `host = IP-literal / IPv4address / reg-name` (part of C5,
//! `4.5.1`) plus the IPv6 acceptor (`4.5.5`).

use crate::case::fold_ascii_lowercase;
use crate::charset::{is_hexdig, is_ipvfuture_tail, is_reg_name};
use crate::error::UriError;
use crate::pct::decode_component;

/// The distinguished host kinds named in the data model (`3.`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Host {
    /// DNS-style or otherwise arbitrary registered name, case-folded to
    /// lowercase and already percent-decoded.
    RegName(Vec<u8>),
    /// Dotted-quad literal, stored exactly as written (always plain ASCII).
    IPv4(String),
    /// IPv6 literal, stored without the surrounding brackets.
    IPv6(String),
    /// IPvFuture literal, stored without the surrounding brackets.
    IPvFuture(String),
}

/// Parses the `host [":" port]` tail of an authority. `input` must contain
/// exactly that region and nothing else (the caller has already located
/// where the authority ends).
pub fn parse_host_port(input: &[u8]) -> Result<(Option<Host>, Option<u16>), UriError> {
    if input.is_empty() {
        return Ok((None, None));
    }
    if input[0] == b'[' {
        let close = input
            .iter()
            .position(|&b| b == b']')
            .ok_or(UriError::BadAuthority)?;
        let inner = std::str::from_utf8(&input[1..close]).map_err(|_| UriError::BadAuthority)?;
        let host = parse_ip_literal(inner)?;
        let port = parse_optional_port(&input[close + 1..])?;
        return Ok((Some(host), port));
    }

    let colon = input.iter().position(|&b| b == b':');
    let (host_bytes, rest) = match colon {
        Some(idx) => (&input[..idx], &input[idx..]),
        None => (input, &input[input.len()..]),
    };
    let host = if host_bytes.is_empty() {
        None
    } else {
        Some(parse_reg_name_or_ipv4(host_bytes)?)
    };
    let port = parse_optional_port(rest)?;
    Ok((host, port))
}

fn parse_optional_port(input: &[u8]) -> Result<Option<u16>, UriError> {
    if input.is_empty() {
        return Ok(None);
    }
    if input[0] != b':' {
        return Err(UriError::BadAuthority);
    }
    let digits = &input[1..];
    if digits.is_empty() {
        // `host:` with nothing after the colon names no port.
        return Ok(None);
    }
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(UriError::BadPort);
    }
    let text = std::str::from_utf8(digits).map_err(|_| UriError::BadPort)?;
    let value: u32 = text.parse().map_err(|_| UriError::BadPort)?;
    if value > u16::MAX as u32 {
        return Err(UriError::BadPort);
    }
    Ok(Some(value as u16))
}

/// `reg-name` happens to also admit the `IPv4address` grammar; recognize the
/// latter implicitly, as `4.5.1` directs, rather than giving it its own
/// branch ahead of `reg-name`.
fn parse_reg_name_or_ipv4(raw: &[u8]) -> Result<Host, UriError> {
    if let Ok(s) = std::str::from_utf8(raw) {
        if is_ipv4_literal(s) {
            return Ok(Host::IPv4(s.to_string()));
        }
    }
    let decoded = decode_component(raw, is_reg_name, UriError::BadAuthority)?;
    Ok(Host::RegName(fold_ascii_lowercase(&decoded)))
}

/// `IP-literal = "[" ( IPv6address / IPvFuture ) "]"`, `inner` excludes the brackets.
fn parse_ip_literal(inner: &str) -> Result<Host, UriError> {
    if inner.starts_with('v') || inner.starts_with('V') {
        return parse_ipvfuture(inner).map(|_| Host::IPvFuture(inner.to_string()));
    }
    if validate_ipv6(inner) {
        return Ok(Host::IPv6(inner.to_string()));
    }
    Err(UriError::BadAuthority)
}

/// `IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`
fn parse_ipvfuture(inner: &str) -> Result<(), UriError> {
    let rest = &inner[1..];
    let dot = rest.find('.').ok_or(UriError::BadAuthority)?;
    let (hex_part, tail_part) = (&rest[..dot], &rest[dot + 1..]);
    if hex_part.is_empty() || !hex_part.bytes().all(is_hexdig) {
        return Err(UriError::BadAuthority);
    }
    if tail_part.is_empty() || !tail_part.bytes().all(is_ipvfuture_tail) {
        return Err(UriError::BadAuthority);
    }
    Ok(())
}

fn is_ipv4_literal(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() == 4 && parts.iter().all(|p| is_dec_octet(p))
}

fn is_dec_octet(p: &str) -> bool {
    if p.is_empty() || p.len() > 3 || !p.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    p.parse::<u16>().map(|n| n <= 255).unwrap_or(false)
}

/// IPv6 acceptor (`4.5.5`): tracks hex-group count and at-most-one `::`
/// elision, counting an embedded IPv4 tail as two groups. Accepts iff
/// exactly 8 groups with no elision, or at most 7 groups with one elision.
fn validate_ipv6(s: &str) -> bool {
    let elisions = s.matches("::").count();
    if elisions > 1 {
        return false;
    }
    let elided = elisions == 1;

    let (left, right) = if elided {
        let idx = s.find("::").unwrap();
        (&s[..idx], &s[idx + 2..])
    } else {
        (s, "")
    };

    let left_groups = split_groups(left);
    let right_groups = split_groups(right);
    if left_groups.is_none() || right_groups.is_none() {
        return false;
    }
    let mut groups = left_groups.unwrap();
    groups.extend(right_groups.unwrap());

    if !elided && groups.is_empty() {
        return false;
    }

    let mut group_count = 0usize;
    for (idx, g) in groups.iter().enumerate() {
        let is_last = idx + 1 == groups.len();
        if is_last && is_ipv4_literal(g) {
            group_count += 2;
        } else if is_hex_group(g) {
            group_count += 1;
        } else {
            return false;
        }
    }

    if elided {
        group_count <= 7
    } else {
        group_count == 8
    }
}

/// Splits a (possibly empty) colon-joined run into its groups, rejecting any
/// stray empty group (a second, un-elided `::`-like gap).
fn split_groups(s: &str) -> Option<Vec<&str>> {
    if s.is_empty() {
        return Some(Vec::new());
    }
    let groups: Vec<&str> = s.split(':').collect();
    if groups.iter().any(|g| g.is_empty()) {
        None
    } else {
        Some(groups)
    }
}

fn is_hex_group(g: &str) -> bool {
    (1..=4).contains(&g.len()) && g.bytes().all(is_hexdig)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_full_ipv6_address() {
        assert!(validate_ipv6("2001:0db8:85a3:0000:0000:8a2e:0370:7334"));
    }

    #[test]
    fn accepts_elided_forms() {
        assert!(validate_ipv6("::1"));
        assert!(validate_ipv6("::"));
        assert!(validate_ipv6("2001:db8::1"));
        assert!(validate_ipv6("2001:db8::7"));
        assert!(validate_ipv6("1::"));
    }

    #[test]
    fn rejects_two_elisions_or_wrong_group_count() {
        assert!(!validate_ipv6("1::2::3"));
        assert!(!validate_ipv6("1:2:3:4:5:6:7")); // only 7 groups, no elision
        assert!(!validate_ipv6("1:2:3:4:5:6:7:8:9")); // 9 groups
    }

    #[test]
    fn accepts_embedded_ipv4_tail() {
        assert!(validate_ipv6("::ffff:192.0.2.1"));
        assert!(validate_ipv6("1:2:3:4:5:6:192.0.2.1"));
    }

    #[test]
    fn rejects_malformed_ipv4_tail() {
        assert!(!validate_ipv6("::ffff:192.0.2.999"));
    }

    #[test]
    fn ipvfuture_requires_hex_and_nonempty_tail() {
        assert!(parse_ipvfuture("v1.a").is_ok());
        assert!(parse_ipvfuture("vA.abc:123").is_ok());
        assert!(parse_ipvfuture("v.a").is_err());
        assert!(parse_ipvfuture("v1.").is_err());
    }

    #[test]
    fn host_port_recognizes_bracketed_ipv6() {
        let (host, port) = parse_host_port(b"[::1]:8080").unwrap();
        assert_eq!(host, Some(Host::IPv6("::1".to_string())));
        assert_eq!(port, Some(8080));
    }

    #[test]
    fn host_port_recognizes_ipv4_and_reg_name() {
        let (host, _) = parse_host_port(b"192.168.1.1").unwrap();
        assert_eq!(host, Some(Host::IPv4("192.168.1.1".to_string())));

        let (host, _) = parse_host_port(b"eXAMPLE.com").unwrap();
        assert_eq!(host, Some(Host::RegName(b"example.com".to_vec())));
    }

    #[test]
    fn port_overflow_is_rejected() {
        assert_eq!(parse_host_port(b"host:65536"), Err(UriError::BadPort));
    }

    #[test]
    fn unterminated_ip_literal_is_rejected() {
        assert_eq!(parse_host_port(b"[::1"), Err(UriError::BadAuthority));
    }
}
