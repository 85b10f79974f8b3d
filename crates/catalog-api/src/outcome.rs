//! `Authed` result variant for bearer-authenticated calls.

/// Outcome of a call that requires a valid session.
///
/// HTTP 401 is not treated as an error: it yields `Unauthenticated` so the
/// caller can drop the session and decide where to send the user.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Authed<T> {
    /// The request succeeded.
    Ok(T),
    /// The backend rejected the bearer token (HTTP 401).
    Unauthenticated,
}

impl<T> Authed<T> {
    /// Returns `true` for `Unauthenticated`.
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Converts into `Option`, discarding the unauthenticated case.
    #[cfg(test)]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Ok(value) => Some(value),
            Self::Unauthenticated => None,
        }
    }

    /// Maps the success value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Authed<U> {
        match self {
            Self::Ok(value) => Authed::Ok(f(value)),
            Self::Unauthenticated => Authed::Unauthenticated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_and_into_option() {
        // Arrange
        let ok: Authed<u32> = Authed::Ok(2);
        let unauth: Authed<u32> = Authed::Unauthenticated;

        // Act & Assert
        assert_eq!(ok.clone().map(|v| v * 10), Authed::Ok(20));
        assert_eq!(ok.into_option(), Some(2));
        assert!(unauth.is_unauthenticated());
        assert_eq!(unauth.into_option(), None);
    }
}
