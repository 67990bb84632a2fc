use chrono::Utc;

pub const CACHE_BUST_PARAM: &str = "_ts";

/// Appends `_ts=<unix millis>` so intermediaries never serve a cached answer.
pub fn with_cache_bust(url: &str) -> String {
    append_query_param(url, CACHE_BUST_PARAM, &Utc::now().timestamp_millis().to_string())
}

pub fn append_query_param(url: &str, key: &str, value: &str) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };

    let separator = if !base.contains('?') {
        "?"
    } else if base.ends_with('?') || base.ends_with('&') {
        ""
    } else {
        "&"
    };

    let mut out = format!("{base}{separator}{key}={value}");
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_right_separator() {
        assert_eq!(append_query_param("/pis", "_ts", "1"), "/pis?_ts=1");
        assert_eq!(append_query_param("/pis?page=2", "_ts", "1"), "/pis?page=2&_ts=1");
        assert_eq!(append_query_param("/pis?", "_ts", "1"), "/pis?_ts=1");
        assert_eq!(append_query_param("/pis#top", "_ts", "1"), "/pis?_ts=1#top");
    }

    #[test]
    fn stamps_current_time() {
        let before = Utc::now().timestamp_millis();
        let url = with_cache_bust("/agencias");
        let stamp: i64 = url
            .strip_prefix("/agencias?_ts=")
            .and_then(|v| v.parse().ok())
            .unwrap();
        assert!(stamp >= before);
    }
}
