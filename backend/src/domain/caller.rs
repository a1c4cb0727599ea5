//! Authenticated caller identity handed in by the request handler.
//!
//! Session handling lives outside this crate. The handler resolves the
//! session into a [`Caller`] and every owner-scoped operation asks it for a
//! user id, failing with `401` semantics when there is none.

use super::{Error, UserId};

/// Identity of whoever is invoking a driving port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caller(Option<UserId>);

impl Caller {
    /// A caller backed by an authenticated session.
    pub const fn authenticated(user_id: UserId) -> Self {
        Self(Some(user_id))
    }

    /// A caller with no session.
    pub const fn anonymous() -> Self {
        Self(None)
    }

    /// The caller's user id, if authenticated.
    pub const fn user_id(&self) -> Option<UserId> {
        self.0
    }

    /// Require an authenticated user id or return [`ErrorCode::Unauthorized`].
    ///
    /// [`ErrorCode::Unauthorized`]: super::ErrorCode::Unauthorized
    ///
    /// # Examples
    /// ```
    /// use rideshare::domain::{Caller, ErrorCode, UserId};
    ///
    /// assert_eq!(Caller::authenticated(UserId::new(3)).require().ok(), Some(UserId::new(3)));
    /// let err = Caller::anonymous().require().expect_err("anonymous caller");
    /// assert_eq!(err.code(), ErrorCode::Unauthorized);
    /// ```
    pub fn require(&self) -> Result<UserId, Error> {
        self.0.ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl From<Option<UserId>> for Caller {
    fn from(value: Option<UserId>) -> Self {
        Self(value)
    }
}
