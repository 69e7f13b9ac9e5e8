use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
pub const FINGERPRINT_LEN: usize = 6;

/// Short, stable fingerprint of an absolute project path.
///
/// The first [`FINGERPRINT_LEN`] hex characters of the SHA-256 of the path's
/// UTF-8 bytes. The input is hashed verbatim: no case folding, trailing-slash
/// trimming or symlink resolution.
pub fn path_fingerprint(path: &str) -> String {
    let mut fingerprint = hex::encode(Sha256::digest(path.as_bytes()));
    fingerprint.truncate(FINGERPRINT_LEN);
    fingerprint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(path_fingerprint("/test/project"), "43ac6f");
        assert_eq!(path_fingerprint(""), "e3b0c4");
    }

    #[test]
    fn deterministic() {
        assert_eq!(path_fingerprint("/test/project"), path_fingerprint("/test/project"));
    }

    #[test]
    fn distinct_paths_differ() {
        assert_ne!(path_fingerprint("/test/project"), path_fingerprint("/different/project"));
        assert_ne!(path_fingerprint("/path1/myapp"), path_fingerprint("/path2/myapp"));
    }

    #[test]
    fn input_is_not_normalized() {
        assert_ne!(path_fingerprint("/repo/app"), path_fingerprint("/repo/app/"));
        assert_ne!(path_fingerprint("/repo/app"), path_fingerprint("/Repo/App"));
    }

    #[test]
    fn six_lowercase_hex_chars() {
        let h = path_fingerprint("/home/user/src/thing");
        assert_eq!(h.len(), FINGERPRINT_LEN);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_uppercase()));
    }
}
