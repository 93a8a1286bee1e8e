use crate::input::DEFAULT_SESSION_ID;

/// Maps an untrusted session id onto a safe storage key.
///
/// ASCII alphanumerics, `-` and `_` are kept; every other character becomes `_`.
/// An empty id maps to [`DEFAULT_SESSION_ID`].
pub fn sanitize_session_id(raw: &str) -> String {
    let safe: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if safe.is_empty() {
        DEFAULT_SESSION_ID.to_string()
    } else {
        safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_safe_ids() {
        assert_eq!(sanitize_session_id("abc-123_XYZ"), "abc-123_XYZ");
    }

    #[test]
    fn replaces_path_characters() {
        assert_eq!(sanitize_session_id("../../etc/passwd"), "______etc_passwd");
        assert_eq!(sanitize_session_id(".."), "__");
        assert_eq!(sanitize_session_id("a b\\c"), "a_b_c");
    }

    #[test]
    fn non_ascii_is_replaced() {
        assert_eq!(sanitize_session_id("séance"), "s_ance");
    }

    #[test]
    fn empty_maps_to_default() {
        assert_eq!(sanitize_session_id(""), "default");
    }
}
