//! Quote-aware tokenizing helpers shared by the switch and intrinsic parsers.
//!
//! Switch declarations are C-macro argument lists whose quoted description
//! strings may themselves contain commas, so a naive `split(',')` is never
//! safe on this input.

/// Split a macro argument list on commas, treating text between double
/// quotes as a single literal part. Parts are trimmed; empty parts dropped.
pub fn explode_line(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut part = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if in_quotes {
            if c == '"' {
                in_quotes = false;
                push_part(&mut result, &mut part);
            } else {
                part.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == ',' {
            push_part(&mut result, &mut part);
        } else {
            part.push(c);
        }
    }

    push_part(&mut result, &mut part);

    result
}

fn push_part(result: &mut Vec<String>, part: &mut String) {
    let trimmed = part.trim();
    if !trimmed.is_empty() {
        result.push(trimmed.to_string());
    }
    part.clear();
}

/// Substring strictly between the first occurrence of `start` and the last
/// occurrence of `end`. The last-occurrence rule lets nested parentheses
/// inside a description survive intact.
pub fn get_between<'a>(input: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let start_index = input.find(start)?;
    let from = start_index + start.len();
    let end_index = input.rfind(end)?;

    if end_index < from {
        return None;
    }

    Some(&input[from..end_index])
}

/// Splice out the region between the first `start` and the last `end`,
/// delimiters included. Returns the input unchanged when either delimiter
/// is missing.
pub fn remove_between(input: &str, start: &str, end: &str) -> String {
    let Some(start_index) = input.find(start) else {
        return input.to_string();
    };
    let Some(end_index) = input.rfind(end) else {
        return input.to_string();
    };

    if end_index < start_index {
        return input.to_string();
    }

    format!("{}{}", &input[..start_index], &input[end_index + end.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explode_plain_fields() {
        let parts = explode_line("bool, UseFastAccessorMethods, true");
        assert_eq!(parts, vec!["bool", "UseFastAccessorMethods", "true"]);
    }

    #[test]
    fn explode_keeps_commas_inside_quotes() {
        let parts = explode_line(r#"intx, Foo, 7, "one, two, three""#);
        assert_eq!(parts, vec!["intx", "Foo", "7", "one, two, three"]);
    }

    #[test]
    fn explode_drops_empty_parts() {
        let parts = explode_line("bool,, Foo ,   ,true");
        assert_eq!(parts, vec!["bool", "Foo", "true"]);
    }

    #[test]
    fn explode_flushes_unterminated_quote() {
        let parts = explode_line(r#"bool, Foo, true, "trailing"#);
        assert_eq!(parts, vec!["bool", "Foo", "true", "trailing"]);
    }

    #[test]
    fn between_first_start_last_end() {
        assert_eq!(get_between("a(b(c)d)e", "(", ")"), Some("b(c)d"));
    }

    #[test]
    fn between_missing_delimiter() {
        assert_eq!(get_between("no parens here", "(", ")"), None);
        assert_eq!(get_between("only open (", "(", ")"), None);
    }

    #[test]
    fn between_multichar_delimiters() {
        assert_eq!(
            get_between("x JDK_Version::jdk(8) y", "(", ")"),
            Some("8")
        );
        assert_eq!(get_between("{ \"Foo\", 1 }", "{", "}"), Some(" \"Foo\", 1 "));
    }

    #[test]
    fn remove_strips_block_comment() {
        assert_eq!(
            remove_between("do_name(a, b) /* legacy */", "/*", "*/"),
            "do_name(a, b) "
        );
    }

    #[test]
    fn remove_without_delimiters_is_identity() {
        assert_eq!(remove_between("unchanged", "/*", "*/"), "unchanged");
    }
}
