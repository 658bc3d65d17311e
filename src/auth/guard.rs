//! Authorization guard: maps an authenticated token subject to the tutor
//! that owns the caller's records.

use crate::services::ServiceError;
use crate::store::models::Tutor;
use crate::store::TutoringStore;

/// Resolve the token subject to its tutor profile.
///
/// An unknown subject is an authentication failure (401). A known account
/// with no tutor profile violates the registration invariant; it is
/// surfaced as a distinct 404 rather than silently routed around.
pub async fn resolve_tutor(
    store: &dyn TutoringStore,
    subject: &str,
) -> Result<Tutor, ServiceError> {
    let account = match store.find_account_by_username(subject).await? {
        Some(account) => account,
        None => {
            tracing::debug!(subject, "token subject has no matching account");
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }
    };

    match store.find_tutor_by_account(account.id).await? {
        Some(tutor) => Ok(tutor),
        None => {
            tracing::warn!(
                username = %account.username,
                account_id = %account.id,
                "account exists without a tutor profile"
            );
            Err(ServiceError::Integrity(
                "Tutor not found for the current user".to_string(),
            ))
        }
    }
}
