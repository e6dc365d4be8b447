//! DTOs for the redirect endpoint.

use serde::Deserialize;

/// Query string of `GET /r/{slug}`.
///
/// `?password=` with an empty value deserializes to `Some("")`, which the
/// resolution service treats the same as no password.
#[derive(Deserialize, Default)]
pub struct RedirectQuery {
    pub password: Option<String>,
}
