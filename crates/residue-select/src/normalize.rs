//! Input normalization.
//!
//! Selections arrive from a command-line flag or a text field, often wrapped
//! in quotes. The parser expects the whole expression inside one outermost
//! pair of parentheses.

/// Normalizes a raw selection string.
///
/// Removes every double quote, trims surrounding whitespace and wraps the
/// result in `(` `)` unless a single balanced pair already encloses all of
/// it. Input with unbalanced parentheses is left unwrapped; the parser
/// rejects it. Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```rust
/// use residue_select::normalize;
///
/// assert_eq!(normalize("\"chain A\""), "(chain A)");
/// assert_eq!(normalize("(chain A or chain B)"), "(chain A or chain B)");
/// assert_eq!(normalize("(chain A) and (resi 5)"), "((chain A) and (resi 5))");
/// ```
pub fn normalize(raw: &str) -> String {
    let unquoted: String = raw.chars().filter(|&c| c != '"').collect();
    let trimmed = unquoted.trim();

    if !is_balanced(trimmed) || is_wrapped(trimmed) {
        trimmed.to_string()
    } else {
        format!("({})", trimmed)
    }
}

fn is_balanced(s: &str) -> bool {
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

/// True if the opening parenthesis at index 0 is closed by the last character.
fn is_wrapped(s: &str) -> bool {
    if !s.starts_with('(') || !s.ends_with(')') {
        return false;
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
                if depth == 0 {
                    return i == s.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_quotes() {
        assert_eq!(normalize("\"chain A and resi 5\""), "(chain A and resi 5)");
    }

    #[test]
    fn test_wraps_bare_expression() {
        assert_eq!(normalize("chain A"), "(chain A)");
    }

    #[test]
    fn test_keeps_wrapped_expression() {
        assert_eq!(normalize("(chain A)"), "(chain A)");
        assert_eq!(normalize("((chain A) or chain B)"), "((chain A) or chain B)");
    }

    #[test]
    fn test_wraps_when_outer_parens_are_separate_groups() {
        assert_eq!(
            normalize("(chain A) or (chain B)"),
            "((chain A) or (chain B))"
        );
    }

    #[test]
    fn test_wraps_one_sided_parens() {
        assert_eq!(normalize("(chain A) or chain B"), "((chain A) or chain B)");
        assert_eq!(normalize("chain B or (chain A)"), "(chain B or (chain A))");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize("   chain A  "), "(chain A)");
        assert_eq!(normalize("  (chain A)\n"), "(chain A)");
    }

    #[test]
    fn test_unbalanced_is_not_wrapped() {
        assert_eq!(normalize("chain A) or (chain B"), "chain A) or (chain B");
        assert_eq!(normalize("((chain A"), "((chain A");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "()");
        assert_eq!(normalize("\"\""), "()");
    }

    #[test]
    fn test_idempotent() {
        for s in [
            "chain A",
            "(chain A)",
            "(chain A) and (chain B)",
            "\"resi 10 - 20\"",
            "((",
            ")(",
            "",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input: {:?}", s);
        }
    }
}
