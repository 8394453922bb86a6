use std::borrow::Cow;
use std::collections::BTreeSet;
use url::Url;

/// Returns the host lowercased with any leading `www.` removed.
///
/// A non-default port is kept (`example.com:8080`) so that services on
/// different ports never share a group.
pub fn normalized_host(url: &Url) -> String {
    let host = url.host_str().unwrap_or("").to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

/// Non-empty path segments, still percent-encoded as they appear in the URL.
pub fn path_segments(url: &Url) -> Vec<&str> {
    url.path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Percent-decodes a path segment for matching. Invalid UTF-8 is replaced
/// rather than rejected.
pub fn decode_segment(segment: &str) -> Cow<'_, str> {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded,
        Err(_) => {
            let bytes = urlencoding::decode_binary(segment.as_bytes());
            Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

/// Non-empty path segments, percent-decoded.
pub fn decoded_path_segments(url: &Url) -> Vec<String> {
    path_segments(url)
        .into_iter()
        .map(|segment| decode_segment(segment).into_owned())
        .collect()
}

/// Joins segments back into an absolute path, `/` when nothing is left.
pub fn join_path(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}

/// Sorted, de-duplicated, lowercased query parameter names.
pub fn query_param_names(url: &Url) -> Vec<String> {
    url.query_pairs()
        .map(|(name, _)| name.to_lowercase())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Number of distinct query parameter names, compared case-sensitively.
pub fn distinct_param_count(url: &Url) -> usize {
    url.query_pairs()
        .map(|(name, _)| name.into_owned())
        .collect::<BTreeSet<_>>()
        .len()
}
