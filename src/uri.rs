//! The URI value type and its invariants (component C6).

use std::fmt;
use std::str::FromStr;

use crate::charset::{is_alpha, is_scheme_tail};
use crate::error::UriError;
use crate::host::Host;
use crate::parse;

/// The `userinfo` pair: `name` is required once userinfo is present at all,
/// `pass` is independently optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UserInfo {
    pub name: Vec<u8>,
    pub pass: Option<Vec<u8>>,
}

/// A parsed, mutable RFC 3986 URI.
///
/// Every string-valued component is stored already percent-decoded
/// (invariant 7): percent-encoding is purely a wire representation,
/// reconstructed only by [`Uri::serialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    pub(crate) scheme: Option<String>,
    pub(crate) userinfo: Option<UserInfo>,
    pub(crate) host: Option<Host>,
    pub(crate) port: Option<u16>,
    pub(crate) path: Vec<Vec<u8>>,
    pub(crate) query: Option<Vec<u8>>,
    pub(crate) fragment: Option<Vec<u8>>,
}

impl Default for Uri {
    fn default() -> Self {
        Uri {
            scheme: None,
            userinfo: None,
            host: None,
            port: None,
            path: Vec::new(),
            query: None,
            fragment: None,
        }
    }
}

impl Uri {
    /// An empty value: all optionals absent, path empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `input` into a fresh value. On failure, nothing is allocated
    /// beyond the attempt itself — there is no partially-populated value to
    /// observe.
    pub fn parse(input: &[u8]) -> Result<Self, UriError> {
        parse::parse(input)
    }

    /// Starts building a value through the setter surface, validating the
    /// cross-field invariants once at [`UriBuilder::build`] rather than on
    /// every intermediate call.
    pub fn builder() -> UriBuilder {
        UriBuilder::new()
    }

    // -- scheme ----------------------------------------------------------

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Validates `s` against `ALPHA (ALPHA | DIGIT | '+' | '-' | '.')*`
    /// (invariant 1) and stores it case-folded.
    pub fn set_scheme(&mut self, s: &str) -> Result<(), UriError> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || !is_alpha(bytes[0]) || !bytes[1..].iter().all(|&b| is_scheme_tail(b))
        {
            return Err(UriError::BadScheme);
        }
        self.scheme = Some(s.to_ascii_lowercase());
        Ok(())
    }

    pub fn clear_scheme(&mut self) {
        self.scheme = None;
    }

    // -- userinfo ----------------------------------------------------------

    pub fn userinfo_name(&self) -> Option<&[u8]> {
        self.userinfo.as_ref().map(|u| u.name.as_slice())
    }

    /// Requires a host already be present (invariant 2).
    pub fn set_userinfo_name(&mut self, name: impl Into<Vec<u8>>) -> Result<(), UriError> {
        if self.host.is_none() {
            return Err(UriError::BadAuthority);
        }
        self.userinfo.get_or_insert_with(UserInfo::default).name = name.into();
        Ok(())
    }

    pub fn userinfo_pass(&self) -> Option<&[u8]> {
        self.userinfo.as_ref().and_then(|u| u.pass.as_deref())
    }

    /// Requires a host already be present (invariant 2).
    pub fn set_userinfo_pass(&mut self, pass: impl Into<Vec<u8>>) -> Result<(), UriError> {
        if self.host.is_none() {
            return Err(UriError::BadAuthority);
        }
        self.userinfo.get_or_insert_with(UserInfo::default).pass = Some(pass.into());
        Ok(())
    }

    // -- host / port ----------------------------------------------------------

    pub fn host(&self) -> Option<&Host> {
        self.host.as_ref()
    }

    /// Setting `None` also drops `userinfo` and `port`, since both require a
    /// host (invariants 2 and 3). Setting `Some` re-establishes absoluteness
    /// of the path (invariant 4) if a path already exists.
    pub fn set_host(&mut self, host: Option<Host>) {
        self.host = host;
        if self.host.is_none() {
            self.userinfo = None;
            self.port = None;
        } else {
            self.ensure_absolute_path();
        }
    }

    pub fn has_port(&self) -> bool {
        self.port.is_some()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Requires a host already be present (invariant 3).
    pub fn set_port(&mut self, port: u16) -> Result<(), UriError> {
        if self.host.is_none() {
            return Err(UriError::BadAuthority);
        }
        self.port = Some(port);
        Ok(())
    }

    pub fn clear_port(&mut self) {
        self.port = None;
    }

    // -- path ----------------------------------------------------------

    pub fn path(&self) -> &[Vec<u8>] {
        &self.path
    }

    /// Replaces the path wholesale. If a host is present, re-establishes
    /// absoluteness (invariant 4) exactly as parsing does.
    pub fn set_path(&mut self, segments: Vec<Vec<u8>>) {
        self.path = segments;
        self.ensure_absolute_path();
    }

    fn ensure_absolute_path(&mut self) {
        if self.host.is_some() {
            if self.path.is_empty() {
                self.path.push(Vec::new());
            } else if !self.path[0].is_empty() {
                self.path.insert(0, Vec::new());
            }
        }
    }

    // -- query ----------------------------------------------------------

    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    pub fn query(&self) -> Option<&[u8]> {
        self.query.as_deref()
    }

    pub fn set_query(&mut self, query: impl Into<Vec<u8>>) {
        self.query = Some(query.into());
    }

    pub fn clear_query(&mut self) {
        self.query = None;
    }

    // -- fragment ----------------------------------------------------------

    pub fn has_fragment(&self) -> bool {
        self.fragment.is_some()
    }

    pub fn fragment(&self) -> Option<&[u8]> {
        self.fragment.as_deref()
    }

    pub fn set_fragment(&mut self, fragment: impl Into<Vec<u8>>) {
        self.fragment = Some(fragment.into());
    }

    pub fn clear_fragment(&mut self) {
        self.fragment = None;
    }

    // -- predicates ----------------------------------------------------------

    /// A relative reference has no scheme.
    pub fn is_relative_reference(&self) -> bool {
        self.scheme.is_none()
    }

    /// The path is empty, or its first segment is non-empty (i.e. not absolute).
    pub fn has_relative_path(&self) -> bool {
        self.path.is_empty() || !self.path[0].is_empty()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uri::parse(s.as_bytes())
    }
}

/// Incremental construction mirroring the setter surface, validating the
/// cross-field invariants once at [`UriBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct UriBuilder {
    uri: Uri,
}

impl UriBuilder {
    pub fn new() -> Self {
        UriBuilder { uri: Uri::new() }
    }

    pub fn scheme(mut self, s: &str) -> Result<Self, UriError> {
        self.uri.set_scheme(s)?;
        Ok(self)
    }

    pub fn host(mut self, host: Host) -> Self {
        self.uri.set_host(Some(host));
        self
    }

    pub fn userinfo_name(mut self, name: impl Into<Vec<u8>>) -> Result<Self, UriError> {
        self.uri.set_userinfo_name(name)?;
        Ok(self)
    }

    pub fn userinfo_pass(mut self, pass: impl Into<Vec<u8>>) -> Result<Self, UriError> {
        self.uri.set_userinfo_pass(pass)?;
        Ok(self)
    }

    pub fn port(mut self, port: u16) -> Result<Self, UriError> {
        self.uri.set_port(port)?;
        Ok(self)
    }

    pub fn path(mut self, segments: Vec<Vec<u8>>) -> Self {
        self.uri.set_path(segments);
        self
    }

    pub fn query(mut self, query: impl Into<Vec<u8>>) -> Self {
        self.uri.set_query(query);
        self
    }

    pub fn fragment(mut self, fragment: impl Into<Vec<u8>>) -> Self {
        self.uri.set_fragment(fragment);
        self
    }

    /// Validates invariants 2-4 once more (the field setters already keep
    /// them true, so this mainly guards against future setter additions)
    /// and returns the finished value.
    pub fn build(self) -> Result<Uri, UriError> {
        let uri = self.uri;
        if uri.userinfo.is_some() && uri.host.is_none() {
            return Err(UriError::BadAuthority);
        }
        if uri.port.is_some() && uri.host.is_none() {
            return Err(UriError::BadAuthority);
        }
        if uri.host.is_some() && !uri.path.is_empty() && !uri.path[0].is_empty() {
            return Err(UriError::BadPath);
        }
        Ok(uri)
    }
}
