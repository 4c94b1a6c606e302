//! Splitting multi-statement scripts

/// Length of a dollar-quote tag (`$$` or `$tag$`) starting at `start`, if any.
fn dollar_tag_len(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
        i += 1;
    }
    (chars.get(i) == Some(&'$')).then_some(i + 1 - start)
}

fn starts_with_at(chars: &[char], at: usize, needle: &[char]) -> bool {
    chars.len() >= at + needle.len() && chars[at..at + needle.len()] == *needle
}

/// Split a script into statements on `;`.
///
/// Semicolons inside quotes, comments and dollar-quoted bodies do not end a
/// statement. Terminators are dropped and blank statements are skipped.
pub fn split_statements(script: &str) -> Vec<String> {
    let chars: Vec<char> = script.chars().collect();
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    let mut flush = |current: &mut String| {
        let trimmed = current.trim();
        if !trimmed.is_empty() {
            statements.push(trimmed.to_string());
        }
        current.clear();
    };

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match c {
            ';' => {
                flush(&mut current);
                i += 1;
            }
            '\'' | '"' => {
                current.push(c);
                i += 1;
                while i < chars.len() {
                    current.push(chars[i]);
                    i += 1;
                    if chars[i - 1] == c {
                        break;
                    }
                }
            }
            '-' if next == Some('-') => {
                while i < chars.len() && chars[i] != '\n' {
                    current.push(chars[i]);
                    i += 1;
                }
            }
            '/' if next == Some('*') => {
                let end = (i + 2..chars.len())
                    .find(|&j| starts_with_at(&chars, j, &['*', '/']))
                    .map_or(chars.len(), |j| j + 2);
                current.extend(&chars[i..end]);
                i = end;
            }
            '$' => match dollar_tag_len(&chars, i) {
                Some(len) => {
                    let tag: Vec<char> = chars[i..i + len].to_vec();
                    let body_start = i + len;
                    let end = (body_start..chars.len())
                        .find(|&j| starts_with_at(&chars, j, &tag))
                        .map_or(chars.len(), |j| j + len);
                    current.extend(&chars[i..end]);
                    i = end;
                }
                None => {
                    current.push(c);
                    i += 1;
                }
            },
            _ => {
                current.push(c);
                i += 1;
            }
        }
    }
    flush(&mut current);

    statements
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
