use regex_lite::Regex;

/// Extract the declared display name from a template file's contents.
///
/// Matches a `Template Name: <value>` line anywhere in the file,
/// case-insensitively. Files without such a line return `None`; most
/// files in a plugin never declare one, which is expected rather than an
/// error.
pub fn extract_declared_name(contents: &str) -> Option<String> {
    let re = Regex::new(r"(?mi)Template Name:(.*)$").expect("header pattern is a valid regex");
    let captures = re.captures(contents)?;
    Some(cleanup_header_value(&captures[1]))
}

/// Sanitize a raw header value: drop everything from a trailing
/// close-comment marker (`*/` or `?>`) onward, then trim whitespace.
pub fn cleanup_header_value(raw: &str) -> String {
    let re = Regex::new(r"\s*(?:\*/|\?>).*").expect("cleanup pattern is a valid regex");
    re.replace(raw, "").trim().to_string()
}
