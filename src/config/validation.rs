//! Configuration validation with detailed error reporting.
//!
//! Each check returns `Ok(..)` or a human-readable message; the caller
//! in [`crate::config`] wraps messages into
//! [`ValidationError`](crate::error::ValidationError)
//! values so every problem is reported in one pass.

use std::net::IpAddr;
use std::time::Duration;

use url::Url;

/// Validate the service name stamped on log lines.
pub fn validate_service_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("service name cannot be empty".into());
    }
    Ok(())
}

/// Validate that `host` is an IPv4 or IPv6 literal to listen on.
pub fn validate_listen_addr(host: &str) -> Result<(), String> {
    host.parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| format!("'{host}' is not a valid listen address"))
}

/// Validate the origin base URL. Returns the parsed URL.
pub fn validate_base_url(url: &str) -> Result<Url, String> {
    match Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            if scheme != "http" && scheme != "https" {
                Err(format!(
                    "unsupported scheme '{scheme}' (expected http or https)"
                ))
            } else {
                Ok(parsed)
            }
        }
        Err(_) => Err(format!("'{url}' is not a valid URL")),
    }
}

/// Validate the outbound timeout in (fractional) seconds.
pub fn validate_timeout(seconds: f64) -> Result<Duration, String> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(format!("{seconds} must be a finite number greater than zero"));
    }
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("{seconds}: {e}"))
}

/// `<base>/echo`, keeping any path prefix of `base` and dropping its
/// query and fragment.
#[must_use]
pub fn echo_endpoint(base: &Url) -> Url {
    let mut endpoint = base.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    let path = format!("{}/echo", endpoint.path().trim_end_matches('/'));
    endpoint.set_path(&path);
    endpoint
}
