/// Replace `${ENV_VAR}` placeholders in config string values.
///
/// Unresolvable variables are left as-is.
#[must_use]
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// Replace `${ENV_VAR}` placeholders using a custom lookup function.
///
/// This is the implementation behind [`substitute_env`]; the separate
/// signature makes it testable without mutating the process environment.
fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match lookup(name).filter(|_| !name.is_empty()) {
                    Some(value) => out.push_str(&value),
                    // Unresolved (or empty) placeholders stay as written.
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    },
                }
                rest = &after[end + 1..];
            },
            None => {
                // No closing brace: keep the tail verbatim.
                out.push_str(&rest[start..]);
                rest = "";
            },
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_var() {
        let lookup = |name: &str| match name {
            "RANTCAST_TEST_VAR" => Some("hello".to_string()),
            _ => None,
        };
        assert_eq!(
            substitute_env_with("token = \"${RANTCAST_TEST_VAR}\"", lookup),
            "token = \"hello\""
        );
    }

    #[test]
    fn substitutes_multiple_vars() {
        let lookup = |name: &str| Some(name.to_lowercase());
        assert_eq!(substitute_env_with("${A}/${B}", lookup), "a/b");
    }

    #[test]
    fn leaves_unknown_var() {
        let lookup = |_: &str| None;
        assert_eq!(
            substitute_env_with("${RANTCAST_NONEXISTENT_XYZ}", lookup),
            "${RANTCAST_NONEXISTENT_XYZ}"
        );
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_env("plain text"), "plain text");
    }

    #[test]
    fn empty_placeholder_kept_literal() {
        let lookup = |_: &str| Some("x".to_string());
        assert_eq!(substitute_env_with("a${}b", lookup), "a${}b");
    }

    #[test]
    fn unterminated_placeholder_kept_literal() {
        let lookup = |_: &str| Some("x".to_string());
        assert_eq!(substitute_env_with("a${OOPS", lookup), "a${OOPS");
    }
}
