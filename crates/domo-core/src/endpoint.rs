//! Controller endpoint addressing

/// Path the controller serves its command endpoint on
pub const ENDPOINT_PATH: &str = "/domo/";

/// Turn a host into the command endpoint URL
///
/// A bare host or IP address becomes `http://<host>/domo/`. Anything that
/// already carries a scheme is used as given.
pub fn base_url(host: &str) -> String {
    let host = host.trim();
    if host.starts_with("http://") || host.starts_with("https://") {
        return host.to_string();
    }
    format!("http://{}{}", host.trim_end_matches('/'), ENDPOINT_PATH)
}
