//! Keeps session keys and oversized response bodies out of log lines.

/// Bodies longer than this many bytes are cut in debug logs.
const BODY_LOG_LIMIT: usize = 256;

/// Query parameters whose values never reach a log line.
const SECRET_PARAMS: [&str; 3] = ["sessionkey", "apikey", "signature"];

/// Cut `body` to at most [`BODY_LOG_LIMIT`] bytes on a char boundary, noting the full size.
pub fn truncate_for_log(body: &str) -> String {
    if body.len() <= BODY_LOG_LIMIT {
        return body.to_string();
    }
    let cut = body
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|i| *i <= BODY_LOG_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... ({} bytes total)", &body[..cut], body.len())
}

/// Replace the value of every secret query parameter in `url` with `***`.
pub fn redact_query(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let redacted = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SECRET_PARAMS.contains(&key.to_ascii_lowercase().as_str()) => {
                format!("{key}=***")
            }
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}?{redacted}")
}
