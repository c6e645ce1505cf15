use subtle::ConstantTimeEq;

/// Constant-time string comparison to prevent timing attacks
/// Use this for comparing admin API keys and other sensitive values
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Decide whether a request may use the admin surface.
///
/// With no key configured the admin surface is open (development mode);
/// with a key configured the provided value must match in constant time.
pub fn admin_key_matches(configured: Option<&str>, provided: Option<&str>) -> bool {
    match configured {
        None => true,
        Some(expected) => match provided {
            Some(given) => constant_time_compare(expected, given),
            None => false,
        },
    }
}
