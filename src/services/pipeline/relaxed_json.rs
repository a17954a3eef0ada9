//! Permissive parser for model output that looks like JSON but is not:
//! single-quoted strings, trailing commas and `True`/`False`/`None` literals.
//! The text is rewritten into strict JSON and handed to `serde_json`.

use serde_json::Value;

pub fn parse_relaxed(input: &str) -> Option<Value> {
    serde_json::from_str(&relax(input)).ok()
}

fn relax(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '"' => i = copy_double_quoted(&chars, i, &mut out),
            '\'' => i = convert_single_quoted(&chars, i, &mut out),
            ',' if closes_next(&chars, i + 1) => i += 1,
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                out.push_str(match word.as_str() {
                    "True" => "true",
                    "False" => "false",
                    "None" => "null",
                    other => other,
                });
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

fn closes_next(chars: &[char], from: usize) -> bool {
    chars[from..]
        .iter()
        .find(|c| !c.is_whitespace())
        .is_some_and(|c| *c == '}' || *c == ']')
}

/// Copies a `"..."` string verbatim and returns the index after its closing quote.
fn copy_double_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('"');
    let mut i = start + 1;
    while i < chars.len() {
        let ch = chars[i];
        out.push(ch);
        match ch {
            '\\' => {
                if let Some(next) = chars.get(i + 1) {
                    out.push(*next);
                }
                i += 2;
            }
            '"' => return i + 1,
            _ => i += 1,
        }
    }
    i
}

/// Rewrites a `'...'` string as `"..."`, escaping embedded double quotes.
fn convert_single_quoted(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push('"');
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => match chars.get(i + 1) {
                Some('\'') => {
                    out.push('\'');
                    i += 2;
                }
                Some(next) => {
                    out.push('\\');
                    out.push(*next);
                    i += 2;
                }
                None => i += 1,
            },
            '"' => {
                out.push_str("\\\"");
                i += 1;
            }
            '\'' => {
                out.push('"');
                return i + 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_trailing_commas() {
        let value = parse_relaxed(r#"{"options": ["a", "b",], "n": 1,}"#).unwrap();
        assert_eq!(value, json!({"options": ["a", "b"], "n": 1}));
    }

    #[test]
    fn accepts_single_quoted_strings_and_python_literals() {
        let value =
            parse_relaxed(r#"{'question': 'Say "hi"?', 'ok': True, 'skip': None, 'x': False}"#)
                .unwrap();
        assert_eq!(
            value,
            json!({"question": "Say \"hi\"?", "ok": true, "skip": null, "x": false})
        );
    }

    #[test]
    fn leaves_apostrophes_and_literal_words_inside_double_quotes_alone() {
        let value = parse_relaxed(r#"{"question": "It's True, None said",}"#).unwrap();
        assert_eq!(value, json!({"question": "It's True, None said"}));
    }

    #[test]
    fn still_rejects_garbage() {
        assert!(parse_relaxed("{question: what").is_none());
    }
}
