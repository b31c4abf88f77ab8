//! Glob-style name matching for sub-entity rules.
//!
//! Patterns support `*` (any run of characters, including empty) and
//! `?` (exactly one character); everything else matches literally, so
//! dots in mesh names need no escaping.

/// Test whether `name` matches the glob `pattern`.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();
    match_from(&pattern, &name)
}

fn match_from(pattern: &[char], name: &[char]) -> bool {
    match pattern.split_first() {
        None => name.is_empty(),
        Some(('*', rest)) => {
            // Try every possible length for the starred run, shortest
            // first.
            (0..=name.len()).any(|skip| match_from(rest, &name[skip..]))
        }
        Some(('?', rest)) => !name.is_empty() && match_from(rest, &name[1..]),
        Some((literal, rest)) => {
            name.first() == Some(literal) && match_from(rest, &name[1..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_patterns_match_exactly() {
        assert!(glob_match("body", "body"));
        assert!(!glob_match("body", "body2"));
        assert!(!glob_match("body", "bod"));
    }

    #[test]
    fn star_matches_any_run() {
        assert!(glob_match("wheel_*", "wheel_L"));
        assert!(glob_match("wheel_*", "wheel_front_left"));
        assert!(glob_match("wheel_*", "wheel_"));
        assert!(!glob_match("wheel_*", "body"));
    }

    #[test]
    fn star_alone_matches_everything() {
        assert!(glob_match("*", ""));
        assert!(glob_match("*", "anything.at.all"));
    }

    #[test]
    fn question_mark_matches_one_character() {
        assert!(glob_match("wheel_?", "wheel_L"));
        assert!(!glob_match("wheel_?", "wheel_"));
        assert!(!glob_match("wheel_?", "wheel_LR"));
    }

    #[test]
    fn dots_are_literal() {
        assert!(glob_match("mesh.001", "mesh.001"));
        assert!(!glob_match("mesh.001", "meshx001"));
    }

    #[test]
    fn interior_star_backtracks() {
        assert!(glob_match("a*c", "abc"));
        assert!(glob_match("a*c", "ac"));
        assert!(glob_match("a*c", "abcbc"));
        assert!(!glob_match("a*c", "ab"));
    }
}
