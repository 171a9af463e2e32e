//! # Endpoint Resolution
//!
//! Pure URL construction for the Affirm API. The provider serves two
//! path-versioned generations (`/api/v1` transactions, `/api/v2` charges) on
//! a production/sandbox host pair; the resolver composes host, generation
//! segment, resource path, and an order-preserving query string.

use affirm_core::ApiGeneration;
use url::Url;

/// Production API host
pub const LIVE_HOST: &str = "https://api.affirm.com/api/";

/// Sandbox API host
pub const SANDBOX_HOST: &str = "https://sandbox.affirm.com/api/";

/// Resolve the fully qualified URL for one operation.
///
/// `resource_path` must start with `/` (e.g. `/charges/{ref}/capture`);
/// a malformed path is a programmer error and trips a debug assertion.
/// Query pairs are appended in the order given, percent-encoded, and only
/// when present; an empty slice leaves the URL without a query string.
pub fn resolve(
    generation: ApiGeneration,
    test_mode: bool,
    resource_path: &str,
    query: &[(&str, String)],
) -> Url {
    let base = if test_mode { SANDBOX_HOST } else { LIVE_HOST };
    resolve_with_base(base, generation, resource_path, query)
}

/// Resolve against an explicit base (for testing/mocking).
///
/// `base` replaces the host pair and must end with `/api/`.
pub fn resolve_with_base(
    base: &str,
    generation: ApiGeneration,
    resource_path: &str,
    query: &[(&str, String)],
) -> Url {
    debug_assert!(
        resource_path.starts_with('/'),
        "resource path must start with '/': {resource_path}"
    );
    debug_assert!(
        !resource_path.contains(char::is_whitespace),
        "resource path must not contain whitespace: {resource_path}"
    );

    let mut url = Url::parse(&format!("{}{}{}", base, generation.segment(), resource_path))
        .expect("endpoint components always form a valid URL");

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in query {
            pairs.append_pair(name, value);
        }
    }

    url
}
