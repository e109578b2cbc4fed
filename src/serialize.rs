//! Serializer (component C9, `4.9`).

use crate::case::fold_ascii_lowercase;
use crate::charset::{is_pchar_ne, is_query_or_fragment, is_reg_name, is_userinfo};
use crate::host::Host;
use crate::pct::encode;
use crate::uri::Uri;

impl Uri {
    /// Re-emits this value as a string with correct percent-encoding and
    /// delimiters. `Uri::parse(v.serialize())` is equal to `v` up to
    /// canonical case and percent-encoding (`8.`).
    pub fn serialize(&self) -> String {
        let mut out = String::new();

        if let Some(scheme) = &self.scheme {
            out.push_str(scheme);
            out.push(':');
        }

        if let Some(host) = &self.host {
            out.push_str("//");
            if let Some(userinfo) = &self.userinfo {
                if !userinfo.name.is_empty() {
                    out.push_str(&encode(&userinfo.name, is_userinfo));
                    if let Some(pass) = &userinfo.pass {
                        out.push(':');
                        out.push_str(&encode(pass, is_userinfo));
                    }
                    out.push('@');
                }
            }
            write_host(&mut out, host);
            if let Some(port) = self.port {
                if port != 0 {
                    out.push(':');
                    out.push_str(&port.to_string());
                }
            }
        }

        write_path(&mut out, &self.path);

        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(&encode(query, is_query_or_fragment));
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(&encode(fragment, is_query_or_fragment));
        }

        out
    }
}

fn write_host(out: &mut String, host: &Host) {
    match host {
        Host::RegName(bytes) => out.push_str(&encode(bytes, is_reg_name)),
        Host::IPv4(text) => out.push_str(text),
        Host::IPv6(text) => {
            out.push('[');
            let folded = fold_ascii_lowercase(text.as_bytes());
            out.push_str(std::str::from_utf8(&folded).expect("IPv6 literal is ASCII"));
            out.push(']');
        }
        Host::IPvFuture(text) => {
            out.push('[');
            out.push_str(text);
            out.push(']');
        }
    }
}

/// A path made of exactly one empty segment renders as a bare `/`,
/// regardless of whether a host is present — this is the only way such a
/// value can round-trip back through `4.5.2`'s bare-`/` special case.
fn write_path(out: &mut String, path: &[Vec<u8>]) {
    if path.len() == 1 && path[0].is_empty() {
        out.push('/');
        return;
    }
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        out.push_str(&encode(segment, is_pchar_ne));
    }
}

#[cfg(test)]
mod test {
    use crate::host::Host;
    use crate::Uri;

    #[test]
    fn scenario_1_round_trips() {
        let u = Uri::parse(b"http://www.example.com/foo/bar").unwrap();
        assert_eq!(u.serialize(), "http://www.example.com/foo/bar");
    }

    #[test]
    fn scenario_6_emits_trailing_slash_and_empty_fragment() {
        let u = Uri::parse(b"http://example.com#").unwrap();
        assert_eq!(u.serialize(), "http://example.com/#");
    }

    #[test]
    fn bare_root_path_without_authority_round_trips() {
        let u = Uri::parse(b"/").unwrap();
        assert_eq!(u.serialize(), "/");
        let reparsed = Uri::parse(u.serialize().as_bytes()).unwrap();
        assert_eq!(reparsed, u);
    }

    #[test]
    fn empty_path_without_authority_emits_nothing() {
        let mut u = Uri::new();
        u.set_fragment(b"f".to_vec());
        assert_eq!(u.serialize(), "#f");
    }

    #[test]
    fn encodes_reserved_bytes_in_path_segments() {
        let mut u = Uri::new();
        u.set_path(vec![b"a/b".to_vec()]);
        assert_eq!(u.serialize(), "a%2Fb");
    }

    #[test]
    fn brackets_ipv6_and_folds_case() {
        let mut u = Uri::new();
        u.set_host(Some(Host::IPv6("2001:DB8::1".to_string())));
        assert_eq!(u.serialize(), "//[2001:db8::1]/");
    }

    #[test]
    fn omits_zero_port() {
        let mut u = Uri::new();
        u.set_host(Some(Host::RegName(b"h".to_vec())));
        u.set_port(0).unwrap();
        assert_eq!(u.serialize(), "//h/");
    }

    #[test]
    fn userinfo_without_pass_has_no_colon() {
        let mut u = Uri::new();
        u.set_host(Some(Host::RegName(b"h".to_vec())));
        u.set_userinfo_name(b"bob".to_vec()).unwrap();
        assert_eq!(u.serialize(), "//bob@h/");
    }
}
