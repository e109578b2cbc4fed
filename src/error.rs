//! The single typed error channel used throughout the crate (component E1).
//!
//! Every parser is total: on failure the caller's value is left untouched
//! and one of these variants is returned. No parser panics.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UriError {
    #[error("bad scheme")]
    BadScheme,

    #[error("bad authority")]
    BadAuthority,

    #[error("bad port")]
    BadPort,

    #[error("bad path")]
    BadPath,

    #[error("bad query")]
    BadQuery,

    #[error("bad fragment")]
    BadFragment,

    #[error("bad percent-escape")]
    BadPercentEscape,
}
