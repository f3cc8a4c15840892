use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    /// A required field is missing or empty; carries the endpoint's message
    #[error("{0}")]
    Validation(String),

    /// Email is already taken by another user
    #[error("User with this email already exists.")]
    EmailTaken,

    /// Login failed; deliberately does not say whether email or password was wrong
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// User with given id or email not found
    #[error("User not found.")]
    UserNotFound,

    /// Content item with given id not found
    #[error("Content not found.")]
    ContentNotFound,

    /// Old password did not match on a self-service password change
    #[error("Incorrect old password.")]
    IncorrectOldPassword,

    /// Admin login with a wrong password
    #[error("Incorrect admin password.")]
    IncorrectAdminPassword,

    /// Admin password rotation with a wrong current password
    #[error("Incorrect current password.")]
    IncorrectCurrentPassword,

    /// Content type outside the book|video enum
    #[error("Invalid content type: {0}. Must be 'book' or 'video'.")]
    InvalidContentType(String),

    /// Underlying store failed to load or persist the document
    #[error("Storage error: {0}")]
    Storage(String),

    /// bcrypt hashing or verification failed
    #[error("Password hashing error: {0}")]
    Hash(String),
}

impl From<bcrypt::BcryptError> for PortalError {
    fn from(err: bcrypt::BcryptError) -> Self {
        PortalError::Hash(err.to_string())
    }
}

impl PortalError {
    pub fn missing(message: &str) -> Self {
        PortalError::Validation(message.to_string())
    }
}
