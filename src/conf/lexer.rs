//! Word splitting and quoting shared by the NUT configuration formats.
//!
//! Words are separated by whitespace. Double quotes group words, with `\`
//! escaping the next character inside or outside quotes. An unquoted `#`
//! starts a comment.

/// Splits a line into words.
///
/// Returns an empty vector for blank and comment-only lines.
///
/// # Errors
///
/// Returns a description of the problem if a quote is left open or the line
/// ends with a dangling escape.
pub fn words(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars
                    .next()
                    .ok_or_else(|| "dangling escape at end of line".to_string())?;
                current.push(escaped);
                in_word = true;
            }
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            '#' if !quoted => break,
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err("unterminated quote".to_string());
    }

    if in_word {
        words.push(current);
    }

    Ok(words)
}

/// Returns `true` if `value` can be written on a single line.
///
/// Control characters (line breaks included) cannot be quoted or escaped.
#[must_use]
pub fn fits_line(value: &str) -> bool {
    !value.chars().any(char::is_control)
}

/// Quotes `value` if it would not survive [`words`] as a single word.
///
/// `value` must pass [`fits_line`]; callers check this before editing a file.
#[must_use]
pub fn quote(value: &str) -> String {
    debug_assert!(fits_line(value), "unquotable value {value:?}");

    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '#' | '\\' | '='));

    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');

    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(words("LISTEN  127.0.0.1\t3493").unwrap(), ["LISTEN", "127.0.0.1", "3493"]);
    }

    #[test]
    fn blank_and_comment_lines_are_empty() {
        assert!(words("").unwrap().is_empty());
        assert!(words("   ").unwrap().is_empty());
        assert!(words("# comment").unwrap().is_empty());
    }

    #[test]
    fn trailing_comment_is_dropped() {
        assert_eq!(words("LISTEN ::1 # local only").unwrap(), ["LISTEN", "::1"]);
    }

    #[test]
    fn quotes_group_words() {
        assert_eq!(
            words(r#"desc = "Rack UPS # 2""#).unwrap(),
            ["desc", "=", "Rack UPS # 2"]
        );
    }

    #[test]
    fn empty_quotes_make_empty_word() {
        assert_eq!(words(r#"pass """#).unwrap(), ["pass", ""]);
    }

    #[test]
    fn escapes_are_resolved() {
        assert_eq!(words(r#"a\ b "c\"d""#).unwrap(), ["a b", "c\"d"]);
    }

    #[test]
    fn unterminated_quote_is_error() {
        assert_eq!(words(r#"desc "open"#), Err("unterminated quote".to_string()));
    }

    #[test]
    fn dangling_escape_is_error() {
        assert!(words("value\\").is_err());
    }

    #[test]
    fn control_characters_do_not_fit_a_line() {
        assert!(fits_line("Rack UPS # 2"));
        assert!(!fits_line("rack\nrow 2"));
        assert!(!fits_line("a\rb"));
        assert!(!fits_line("tab\there"));
    }

    #[test]
    fn plain_values_are_not_quoted() {
        assert_eq!(quote("usbhid-ups"), "usbhid-ups");
    }

    #[test]
    fn quoted_values_survive_splitting() {
        for value in ["", "Rack UPS", "a\"b", "x#y", "back\\slash", "k=v"] {
            assert_eq!(words(&quote(value)).unwrap(), [value]);
        }
    }
}
