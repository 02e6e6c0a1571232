use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// `TRIVIA_QUIET=1` (or `true`) silences decorative output
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| quiet_value(std::env::var("TRIVIA_QUIET").ok().as_deref()))
}

fn quiet_value(value: Option<&str>) -> bool {
    value
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_values() {
        assert!(quiet_value(Some("1")));
        assert!(quiet_value(Some("TRUE")));
        assert!(!quiet_value(Some("0")));
        assert!(!quiet_value(None));
    }
}
