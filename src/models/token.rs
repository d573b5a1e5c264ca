//! Bearer credential shared read-only across game sessions.

/// Authorization-header-ready bearer credential.
///
/// Created once per run by the token exchange and shared immutably by every
/// session driver; the wrapped string already carries the `Bearer` scheme
/// prefix. No mutation API is exposed, so concurrent sharing needs no
/// synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw access token in the `Bearer` scheme.
    #[must_use]
    pub fn bearer(access: &str) -> Self {
        Self(format!("Bearer {access}"))
    }

    /// The full `Authorization` header value.
    #[must_use]
    pub fn as_header(&self) -> &str {
        &self.0
    }
}
