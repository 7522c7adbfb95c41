/// Reads one cookie from a `name=value; name2=value2` cookie string.
///
/// A name that appears more than once is treated as unreadable and yields
/// `None`, like a browser `document.cookie` split that does not produce
/// exactly two halves.
pub fn read_cookie(cookie_header: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let haystack = format!("; {}", cookie_header);
    let needle = format!("; {}=", name);
    let mut parts = haystack.split(needle.as_str());
    parts.next()?;
    let tail = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    tail.split(';').next().map(|value| value.to_string())
}
