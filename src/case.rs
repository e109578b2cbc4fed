//! ASCII case folding (component C4), used only for scheme and registered-name
//! host comparison and canonical storage.

/// Lower-cases ASCII `A`-`Z`; every other byte passes through unchanged.
pub fn fold_ascii_lowercase(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|b| b.to_ascii_lowercase()).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lowercases_only_ascii_letters() {
        assert_eq!(fold_ascii_lowercase(b"eXAMPLE.COM"), b"example.com");
        assert_eq!(fold_ascii_lowercase(b"100-Percent_Done~"), b"100-percent_done~");
    }
}
