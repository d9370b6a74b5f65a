/// Markers after which a credential value follows. Matching is ASCII
/// case-insensitive.
const CREDENTIAL_MARKERS: [&str; 5] = ["appid=", "appid:", "token=", "token:", "bearer "];
const MASK: &str = "[REDACTED]";

/// Masks credential values (`appid=...`, `token: ...`, bearer tokens) so they
/// never end up in a tooltip or on stderr. Already-masked values are kept.
pub fn redact_sensitive(input: &str) -> String {
    let lower = input.to_ascii_lowercase();
    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;

    while let Some(marker_end) = next_marker_end(&lower, cursor) {
        let value_start = skip_whitespace(input, marker_end);
        output.push_str(&input[cursor..value_start]);

        if input[value_start..].starts_with(MASK) {
            output.push_str(MASK);
            cursor = value_start + MASK.len();
            continue;
        }

        let value_end = find_value_end(input, value_start);
        if value_start < value_end {
            output.push_str(MASK);
        }
        cursor = value_end;
    }

    output.push_str(&input[cursor..]);
    output
}

fn next_marker_end(lower: &str, from: usize) -> Option<usize> {
    CREDENTIAL_MARKERS
        .iter()
        .filter_map(|marker| {
            lower[from..]
                .find(marker)
                .map(|offset| from + offset + marker.len())
        })
        .min()
}

fn skip_whitespace(input: &str, index: usize) -> usize {
    input[index..]
        .find(|c: char| !c.is_ascii_whitespace())
        .map_or(input.len(), |offset| index + offset)
}

fn find_value_end(input: &str, index: usize) -> usize {
    input[index..]
        .find(|c: char| c.is_ascii_whitespace() || matches!(c, '&' | ',' | ';' | ')' | ']' | '}' | '"'))
        .map_or(input.len(), |offset| index + offset)
}
