//! User accounts and their public projections.
//!
//! Usernames and email addresses are unique without regard to case; the
//! validated newtypes expose a lowercase key for those comparisons. The
//! password credential is opaque here (hashing happens upstream) and never
//! leaves the domain in a serialisable form.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Rating, RatingSummary, UserId};

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must be at least {min} characters")]
    UsernameTooShort { min: usize },
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("username may only contain letters, numbers, underscores, dots, or hyphens")]
    UsernameInvalidCharacters,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must be a valid address")]
    InvalidEmail,
    #[error("full name must not be empty")]
    EmptyFullName,
    #[error("password must not be empty")]
    EmptyCredential,
}

impl UserValidationError {
    /// Name of the input field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername
            | Self::UsernameTooShort { .. }
            | Self::UsernameTooLong { .. }
            | Self::UsernameInvalidCharacters => "username",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyFullName => "fullName",
            Self::EmptyCredential => "password",
        }
    }
}

/// Login handle, unique without regard to case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    ///
    /// # Examples
    /// ```
    /// use rideshare::domain::Username;
    ///
    /// let name = Username::new("Ada_L").expect("valid username");
    /// assert_eq!(name.key(), "ada_l");
    /// assert!(Username::new("a b").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        let length = trimmed.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Lowercase form used for uniqueness checks.
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }

    /// Case-insensitive comparison against raw input.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Contact address, unique without regard to case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(UserValidationError::InvalidEmail);
        }
        let mut parts = trimmed.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(UserValidationError::InvalidEmail);
        };
        if local.is_empty() || domain.is_empty() {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Lowercase form used for uniqueness checks.
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }

    /// Case-insensitive comparison against raw input.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque password credential produced by the authentication collaborator.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordCredential(String);

impl PasswordCredential {
    /// Wrap a credential, rejecting blank input.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyCredential);
        }
        Ok(Self(raw))
    }

    /// Expose the credential to the authentication collaborator.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordCredential(***)")
    }
}

/// Registered account.
///
/// ## Invariants
/// - `username` and `email` are unique across all users, ignoring case.
/// - `rating` is only changed by the rating aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub credential: PasswordCredential,
    pub full_name: String,
    pub email: EmailAddress,
    pub college: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub rating: RatingSummary,
}

impl User {
    /// Public projection embedded next to rides, requests, and reviews.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.to_string(),
            full_name: self.full_name.clone(),
            profile_image: self.profile_image.clone(),
            avg_rating: self.rating.avg_rating,
            total_reviews: self.rating.total_reviews,
        }
    }

    /// Everything except the credential.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.to_string(),
            full_name: self.full_name.clone(),
            email: self.email.to_string(),
            college: self.college.clone(),
            department: self.department.clone(),
            bio: self.bio.clone(),
            profile_image: self.profile_image.clone(),
            avg_rating: self.rating.avg_rating,
            total_reviews: self.rating.total_reviews,
        }
    }
}

/// Validated registration input ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: Username,
    pub credential: PasswordCredential,
    pub full_name: String,
    pub email: EmailAddress,
    pub college: Option<String>,
    pub department: Option<String>,
}

/// Raw registration input as parsed by the request handler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDraft {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
    pub college: Option<String>,
    pub department: Option<String>,
}

impl TryFrom<RegistrationDraft> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: RegistrationDraft) -> Result<Self, Self::Error> {
        let username = Username::new(value.username)?;
        let credential = PasswordCredential::new(value.password)?;
        let full_name = value.full_name.trim().to_owned();
        if full_name.is_empty() {
            return Err(UserValidationError::EmptyFullName);
        }
        let email = EmailAddress::new(value.email)?;

        Ok(Self {
            username,
            credential,
            full_name,
            email,
            college: non_blank(value.college),
            department: non_blank(value.department),
        })
    }
}

/// Partial update applied to a stored user.
///
/// `None` leaves a field untouched. A recorded rating is folded into the
/// stored summary when the patch is applied, so concurrent reviews of the
/// same user never overwrite each other's counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub record_rating: Option<Rating>,
}

impl UserPatch {
    /// Patch that only folds one more rating into the stored summary.
    pub fn record_rating(rating: Rating) -> Self {
        Self {
            record_rating: Some(rating),
            ..Self::default()
        }
    }

    /// Apply the patch in place.
    pub fn apply(self, user: &mut User) {
        if let Some(full_name) = self.full_name {
            user.full_name = full_name;
        }
        if let Some(college) = self.college {
            user.college = Some(college);
        }
        if let Some(department) = self.department {
            user.department = Some(department);
        }
        if let Some(bio) = self.bio {
            user.bio = Some(bio);
        }
        if let Some(profile_image) = self.profile_image {
            user.profile_image = Some(profile_image);
        }
        if let Some(rating) = self.record_rating {
            user.rating = user.rating.record(rating);
        }
    }
}

/// Profile fields a user may edit on their own account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
}

impl TryFrom<ProfileUpdate> for UserPatch {
    type Error = UserValidationError;

    fn try_from(value: ProfileUpdate) -> Result<Self, Self::Error> {
        let full_name = match value.full_name {
            Some(name) if name.trim().is_empty() => {
                return Err(UserValidationError::EmptyFullName);
            }
            Some(name) => Some(name.trim().to_owned()),
            None => None,
        };
        Ok(Self {
            full_name,
            college: value.college,
            department: value.department,
            bio: value.bio,
            ..Self::default()
        })
    }
}

/// Compact public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub profile_image: Option<String>,
    pub avg_rating: u8,
    pub total_reviews: u32,
}

/// Full public view of a user (no credential).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub college: Option<String>,
    pub department: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub avg_rating: u8,
    pub total_reviews: u32,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}
