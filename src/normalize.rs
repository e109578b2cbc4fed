//! Path normalizer (component C7, `4.7`, RFC 3986 `5.2.4`).

use crate::uri::Uri;

impl Uri {
    /// Applies `remove_dot_segments` to the stored path in place. Idempotent,
    /// and preserves path absoluteness.
    pub fn normalize_path(&mut self) {
        self.path = remove_dot_segments(&self.path);
    }
}

/// `remove_dot_segments`, shared with the reference resolver (C8), which
/// normalizes a path before it is ever attached to a [`Uri`].
pub(crate) fn remove_dot_segments(path: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let is_relative = path.is_empty() || !path[0].is_empty();
    let mut out: Vec<Vec<u8>> = Vec::with_capacity(path.len());
    let mut trailing = false;

    for segment in path {
        if segment == b"." {
            trailing = true;
            continue;
        }
        if segment == b".." {
            let navigation_up_legal = is_relative || out.len() > 1;
            if navigation_up_legal {
                if let Some(idx) = out.iter().rposition(|s| !s.is_empty()) {
                    out.truncate(idx);
                }
            }
            trailing = true;
            continue;
        }
        if segment.is_empty() && trailing {
            continue;
        }
        out.push(segment.clone());
        trailing = segment.is_empty();
    }

    if trailing && out.last().map(|s| !s.is_empty()).unwrap_or(true) {
        out.push(Vec::new());
    }

    out
}
