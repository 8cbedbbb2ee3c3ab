use chrono::DateTime;
use hitwatch_core::Hit;

pub fn hit(uri: &str, status: i64) -> Hit {
    let ts = DateTime::parse_from_rfc3339("2024-06-01T10:00:00Z").expect("valid timestamp");
    Hit::new(ts, "GET", uri, status)
}

/// `n` hits spread over a few sections and status classes.
pub fn hits(n: usize) -> Vec<Hit> {
    const URIS: [&str; 4] = ["/api/users", "/blog/post/1", "/", "/api/orders"];
    const STATUSES: [i64; 5] = [200, 200, 404, 503, 301];

    (0..n)
        .map(|i| hit(URIS[i % URIS.len()], STATUSES[i % STATUSES.len()]))
        .collect()
}

/// A Common Log Format line for `uri` and `status`.
pub fn clf_line(uri: &str, status: i64) -> String {
    format!("127.0.0.1 - frank [10/Oct/2024:13:55:36 -0700] \"GET {uri} HTTP/1.0\" {status} 2326\n")
}
