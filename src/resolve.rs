//! Reference resolver (component C8, `4.8`, RFC 3986 `5.2.2`).

use crate::normalize::remove_dot_segments;
use crate::uri::Uri;

impl Uri {
    /// Resolves `reference` against `self` as the base (which must be
    /// absolute, i.e. [`Uri::scheme`] present) and returns the target.
    /// The fragment always comes from `reference`.
    pub fn resolve(&self, reference: &Uri) -> Uri {
        let base = self;
        let mut target = Uri::new();

        if reference.scheme.is_some() {
            target.scheme = reference.scheme.clone();
            target.userinfo = reference.userinfo.clone();
            target.host = reference.host.clone();
            target.port = reference.port;
            target.path = remove_dot_segments(&reference.path);
            target.query = reference.query.clone();
        } else if reference.host.is_some() {
            target.scheme = base.scheme.clone();
            target.userinfo = reference.userinfo.clone();
            target.host = reference.host.clone();
            target.port = reference.port;
            target.path = remove_dot_segments(&reference.path);
            target.query = reference.query.clone();
        } else if reference.path.is_empty() {
            target.scheme = base.scheme.clone();
            target.userinfo = base.userinfo.clone();
            target.host = base.host.clone();
            target.port = base.port;
            target.path = base.path.clone();
            target.query = if reference.query.is_some() {
                reference.query.clone()
            } else {
                base.query.clone()
            };
        } else if reference.path[0].is_empty() {
            // reference.path starts with a leading empty segment: absolute path.
            target.scheme = base.scheme.clone();
            target.userinfo = base.userinfo.clone();
            target.host = base.host.clone();
            target.port = base.port;
            target.path = remove_dot_segments(&reference.path);
            target.query = reference.query.clone();
        } else {
            target.scheme = base.scheme.clone();
            target.userinfo = base.userinfo.clone();
            target.host = base.host.clone();
            target.port = base.port;
            target.path = remove_dot_segments(&merge_paths(base, reference));
            target.query = reference.query.clone();
        }

        target.fragment = reference.fragment.clone();
        target
    }
}

/// `5.2.3` merge: if the base has authority and an empty path, the merged
/// path is the reference's path made absolute; otherwise the base's last
/// segment is dropped and the reference's segments are appended.
fn merge_paths(base: &Uri, reference: &Uri) -> Vec<Vec<u8>> {
    // `Uri` never actually stores a bare empty path once a host is present
    // (4.5.2 / invariant 4 collapse "authority, no path" to a single empty
    // segment at parse time), so that degenerate state shows up here as
    // `path == [""]` rather than `path == []`.
    let base_path_is_empty = base.path.is_empty() || base.path == [Vec::new()];
    if base.host.is_some() && base_path_is_empty {
        let mut merged = vec![Vec::new()];
        merged.extend(reference.path.iter().cloned());
        merged
    } else {
        let mut merged = base.path.clone();
        merged.pop();
        merged.extend(reference.path.iter().cloned());
        merged
    }
}

#[cfg(test)]
mod test {
    use crate::Uri;

    fn parse(s: &str) -> Uri {
        Uri::parse(s.as_bytes()).unwrap()
    }

    #[test]
    fn scenario_4_climb_past_base_path() {
        let base = parse("http://a/b/c/d;p?q");
        let reference = parse("../../g");
        let target = base.resolve(&reference);
        assert_eq!(target.serialize(), "http://a/g");
    }

    #[test]
    fn scenario_5_merge_relative_reference() {
        let base = parse("http://a/b/c/d;p?q");
        let reference = parse("g;x?y#s");
        let target = base.resolve(&reference);
        assert_eq!(target.serialize(), "http://a/b/c/g;x?y#s");
    }

    #[test]
    fn reference_with_scheme_is_absolute() {
        let base = parse("http://a/b/c/d;p?q");
        let reference = parse("http2://x/y");
        let target = base.resolve(&reference);
        assert_eq!(target.scheme(), Some("http2"));
    }

    #[test]
    fn network_path_reference_keeps_base_scheme() {
        let base = parse("http://a/b/c/d;p?q");
        let reference = parse("//g");
        let target = base.resolve(&reference);
        assert_eq!(target.scheme(), Some("http"));
        assert_eq!(target.serialize(), "http://g/");
    }

    #[test]
    fn empty_reference_path_keeps_base_path_and_query() {
        let base = parse("http://a/b/c/d;p?q");
        let reference = parse("");
        let target = base.resolve(&reference);
        assert_eq!(target.serialize(), "http://a/b/c/d;p?q");
    }

    #[test]
    fn merge_against_pathless_base_prepends_root() {
        let base = parse("http://a");
        let reference = parse("g");
        let target = base.resolve(&reference);
        assert_eq!(target.serialize(), "http://a/g");
    }

    #[test]
    fn absolute_path_reference_replaces_base_path() {
        let base = parse("http://a/b/c/d;p?q");
        let reference = parse("/g");
        let target = base.resolve(&reference);
        assert_eq!(target.serialize(), "http://a/g");
    }

    #[test]
    fn fragment_always_comes_from_the_reference() {
        let base = parse("http://a/b/c/d;p?q#base-frag");
        let reference = parse("g#ref-frag");
        let target = base.resolve(&reference);
        assert_eq!(target.fragment(), Some(&b"ref-frag"[..]));
    }

    #[test]
    fn resolve_with_reparsed_self_is_a_fixed_point() {
        let base = parse("http://a/b/c/d;p?q#s");
        let reparsed = Uri::parse(base.serialize().as_bytes()).unwrap();
        let target = base.resolve(&reparsed);
        assert_eq!(target, base);
    }
}
