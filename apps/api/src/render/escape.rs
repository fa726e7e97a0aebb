//! LaTeX escaping for leaf text fields.
//!
//! Every user-supplied string goes through [`escape_text`] on its own, before
//! the renderer joins fields with its own separators. Escaping a composed
//! string would also escape the separators.

/// Escapes text for use anywhere in the document body or inside macro arguments.
///
/// Single pass over the input, so replacements are never escaped twice.
/// Whitespace runs containing a line break collapse to one space: a blank line
/// inside a macro argument ends the paragraph and breaks compilation.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 8);
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '$' => out.push_str(r"\$"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '[' => out.push_str("{[}"),
            ']' => out.push_str("{]}"),
            '<' => out.push_str(r"\textless{}"),
            '>' => out.push_str(r"\textgreater{}"),
            '|' => out.push_str(r"\textbar{}"),
            '\r' | '\n' => {
                while chars.peek().is_some_and(|n| n.is_whitespace()) {
                    chars.next();
                }
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            '\t' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }

    out
}

/// Escapes a hyperlink target for `\href{...}`.
///
/// `%` and `#` are backslashed (hyperref restores them); characters that would
/// unbalance the argument are percent-encoded.
pub fn escape_url(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        match c {
            '%' => out.push_str(r"\%"),
            '#' => out.push_str(r"\#"),
            '\\' => out.push_str(r"\%5C"),
            '{' => out.push_str(r"\%7B"),
            '}' => out.push_str(r"\%7D"),
            ' ' => out.push_str(r"\%20"),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Cuts free text to `limit` characters, trimming the trailing whitespace,
/// then escapes it. A cut adds an ellipsis after the escaped text.
pub fn escape_truncated(raw: &str, limit: Option<usize>) -> String {
    let raw = raw.trim();
    match limit {
        Some(limit) if raw.chars().count() > limit => {
            let cut: String = raw.chars().take(limit).collect();
            format!(r"{}\ldots{{}}", escape_text(cut.trim_end()))
        }
        _ => escape_text(raw),
    }
}
