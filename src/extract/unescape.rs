/// Escape sequences the upstream page emits inside its `JSON.parse('...')`
/// literal, keyed by the four hex digits following the `\u` prefix.
pub(crate) const ESCAPES: [(&str, char); 13] = [
    ("0022", '"'),
    ("002F", '/'),
    ("003C", '<'),
    ("003E", '>'),
    ("0026", '&'),
    ("0027", '\''),
    ("003D", '='),
    ("003A", ':'),
    ("002C", ','),
    ("007B", '{'),
    ("007D", '}'),
    ("005B", '['),
    ("005D", ']'),
];

const PREFIX: &str = "\\u";

/// Replace every escape from the fixed table with its literal character.
///
/// Sequences outside the table (including lower-case hex spellings) are
/// copied through untouched. None of the replacement characters can start
/// or complete another escape, so a single left-to-right pass gives the
/// same result as replacing each sequence in turn.
pub fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(PREFIX) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + PREFIX.len()..];

        match lookup(after) {
            Some(ch) => {
                out.push(ch);
                rest = &after[4..];
            }
            None => {
                out.push_str(PREFIX);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn lookup(digits: &str) -> Option<char> {
    let code = digits.get(..4)?;
    ESCAPES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, ch)| *ch)
}
