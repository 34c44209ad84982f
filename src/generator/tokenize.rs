// file: src/generator/tokenize.rs
// version: 1.0.0
// guid: 52f7a9c1-3e84-4b60-97d5-e81b26f4d039

//! Kernel-command-line tokenization.

/// Split a kernel command line into tokens.
///
/// Double quotes group: a `"` toggles the in-quote state and tokens
/// only split on unquoted spaces. The quotes themselves stay in the
/// token; [`strip_value_quotes`] removes them from a directive value.
pub fn split_cmdline(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut in_quote = false;
    let mut start = 0;

    for (i, c) in line.char_indices() {
        if c == '"' {
            in_quote = !in_quote;
        }
        if c == ' ' && !in_quote {
            tokens.push(&line[start..i]);
            start = i + 1;
        }
    }
    tokens.push(&line[start..]);

    tokens.retain(|t| !t.is_empty());
    tokens
}

/// Strip one pair of surrounding double quotes from a directive value.
pub fn strip_value_quotes(value: &str) -> &str {
    match value.strip_prefix('"') {
        Some(rest) => rest.strip_suffix('"').unwrap_or(rest),
        None => value,
    }
}
