use secrecy::{ExposeSecret, Secret};

/// Opaque bearer credential returned by the login endpoint.
///
/// Construction rejects empty strings: a `SessionToken` in hand means the
/// login response actually carried a usable token.
#[derive(Clone, Debug)]
pub struct SessionToken(Secret<String>);

impl SessionToken {
    pub fn parse(raw: String) -> Result<Self, TokenError> {
        if raw.trim().is_empty() {
            return Err(TokenError::Empty);
        }
        Ok(Self(Secret::new(raw)))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TokenError {
    #[error("the login response carried an empty access token")]
    Empty,
}
