/// Replace `${ENV_VAR}` placeholders in raw config text.
///
/// Unresolvable variables are left as-is.
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// Replace `${ENV_VAR}` placeholders using a custom lookup function.
///
/// Lookup is injected so tests never touch the process environment.
fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find("${") {
        result.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find('}') else {
            // Unterminated, emit the remainder untouched.
            result.push_str(&rest[open..]);
            return result;
        };
        let name = &after[..close];
        match lookup(name).filter(|_| !name.is_empty()) {
            Some(value) => result.push_str(&value),
            None => result.push_str(&rest[open..open + 2 + close + 1]),
        }
        rest = &after[close + 1..];
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[test]
    fn substitutes_known_var() {
        let lookup = |name: &str| match name {
            "AUTOCODE_ROOT" => Some("/srv/ws".to_string()),
            _ => None,
        };
        assert_eq!(
            substitute_env_with("roots = [\"${AUTOCODE_ROOT}\"]", lookup),
            "roots = [\"/srv/ws\"]"
        );
    }

    #[test]
    fn leaves_unknown_var() {
        let lookup = |_: &str| None;
        assert_eq!(
            substitute_env_with("${AUTOCODE_UNSET_XYZ}", lookup),
            "${AUTOCODE_UNSET_XYZ}"
        );
    }

    #[rstest]
    #[case::unterminated("path = ${HOME")]
    #[case::empty_name("a${}b")]
    #[case::no_placeholders("plain text")]
    fn left_literal(#[case] input: &str) {
        assert_eq!(substitute_env_with(input, |_| Some("x".to_string())), input);
    }
}
