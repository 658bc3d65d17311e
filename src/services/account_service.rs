//! Registration and credential checks. An account and its tutor profile
//! are created together; login failures are uniform toward the client.

use serde::Deserialize;

use super::{validate, ServiceError};
use crate::auth::password;
use crate::store::models::{Account, NewAccount, Tutor};
use crate::store::{StoreError, TutoringStore};

const CREDENTIALS_TAKEN: &str = "Username or email already taken";
const BAD_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub bio: Option<String>,
}

pub struct AccountService<'a> {
    store: &'a dyn TutoringStore,
}

impl<'a> AccountService<'a> {
    pub fn new(store: &'a dyn TutoringStore) -> Self {
        Self { store }
    }

    /// Register a new tutor account. The plaintext password is digested
    /// before anything is stored; account and tutor are inserted in one
    /// store transaction.
    pub async fn register(&self, input: RegisterInput) -> Result<(Account, Tutor), ServiceError> {
        validate::username(&input.username)?;
        validate::email(&input.email)?;
        validate::password(&input.password)?;

        if self
            .store
            .credentials_in_use(&input.username, &input.email)
            .await?
        {
            return Err(ServiceError::Conflict(CREDENTIALS_TAKEN.to_string()));
        }

        let digest = password::hash(&input.password)
            .map_err(|e| ServiceError::Internal(format!("password hashing failed: {}", e)))?;

        // The pre-check above races with concurrent registrations; the
        // store's unique constraints are the backstop.
        self.store
            .create_account_with_tutor(NewAccount {
                username: input.username,
                email: input.email,
                password_digest: digest,
                bio: input.bio,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => ServiceError::Conflict(CREDENTIALS_TAKEN.to_string()),
                other => other.into(),
            })
    }

    /// Check credentials for login. Unknown username and digest mismatch
    /// produce the same external error; the distinction exists only in
    /// debug logs.
    pub async fn authenticate(
        &self,
        username: &str,
        password_input: &str,
    ) -> Result<Account, ServiceError> {
        let account = match self.store.find_account_by_username(username).await? {
            Some(account) => account,
            None => {
                tracing::debug!(username, "login rejected: unknown username");
                return Err(ServiceError::Unauthorized(BAD_CREDENTIALS.to_string()));
            }
        };

        if !password::verify(password_input, &account.password_digest) {
            tracing::debug!(username, "login rejected: password mismatch");
            return Err(ServiceError::Unauthorized(BAD_CREDENTIALS.to_string()));
        }

        Ok(account)
    }
}
