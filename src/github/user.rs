use serde::Deserialize;

/// The authenticated user, as returned by `GET /user`.
///
/// Only the fields token validation looks at are kept.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthenticatedUser {
    pub login: String,
}
