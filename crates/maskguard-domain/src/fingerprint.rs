use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a column finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - model name (empty when the column is absent from every model)
/// - column name
pub fn fingerprint_for_column(
    check_id: &str,
    code: &str,
    model_name: Option<&str>,
    column_name: &str,
) -> String {
    let canonical = [check_id, code, model_name.unwrap_or(""), column_name].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_model_sensitive() {
        let a = fingerprint_for_column("c", "x", Some("users"), "email");
        let b = fingerprint_for_column("c", "x", Some("users"), "email");
        let c = fingerprint_for_column("c", "x", Some("orders"), "email");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
