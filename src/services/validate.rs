//! Input validation shared by the services.

use super::ServiceError;

pub(crate) fn username(username: &str) -> Result<(), ServiceError> {
    if username.is_empty() {
        return fail("Username cannot be empty");
    }
    if username.len() < 3 {
        return fail("Username must be at least 3 characters");
    }
    if username.len() > 50 {
        return fail("Username must be less than 50 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return fail("Username can only contain letters, numbers, underscore, and hyphen");
    }
    // First char is present per the emptiness check above
    if !username.chars().next().unwrap().is_alphanumeric() {
        return fail("Username must start with a letter or number");
    }
    Ok(())
}

pub(crate) fn email(email: &str) -> Result<(), ServiceError> {
    if email.is_empty() {
        return fail("Email cannot be empty");
    }
    if !email.contains('@') || !email.contains('.') {
        return fail("Invalid email format");
    }
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return fail("Invalid email format");
    }
    Ok(())
}

pub(crate) fn password(password: &str) -> Result<(), ServiceError> {
    if password.is_empty() {
        return fail("Password cannot be empty");
    }
    Ok(())
}

pub(crate) fn non_empty(value: &str, what: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return fail(format!("{} cannot be empty", what));
    }
    Ok(())
}

fn fail(message: impl Into<String>) -> Result<(), ServiceError> {
    Err(ServiceError::Validation(message.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_usernames() {
        assert!(username("alice").is_ok());
        assert!(username("tutor_07").is_ok());
        assert!(username("ab").is_err());
        assert!(username("_leading").is_err());
        assert!(username("has space").is_err());
    }

    #[test]
    fn accepts_reasonable_emails() {
        assert!(email("alice@x.com").is_ok());
        assert!(email("alice").is_err());
        assert!(email("@x.com").is_err());
        assert!(email("alice@").is_err());
    }
}
