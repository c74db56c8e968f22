//! Session service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::{debug, warn};

use crate::{
    auth::{
        AuthServiceError, AuthorizationError, Identity, IssuedSession, Role, UserUuid,
        models::{SessionBody, UserBody},
        token::{generate_session_token, hash_session_token, is_well_formed},
    },
    documents::{DocumentStore, DocumentStoreError, Filter, NewDocument, kinds},
};

/// Resolves bearer tokens to identities using `session` and `user` documents.
#[derive(Clone)]
pub struct DocumentSessionProvider {
    documents: Arc<dyn DocumentStore>,
}

impl fmt::Debug for DocumentSessionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentSessionProvider")
            .finish_non_exhaustive()
    }
}

impl DocumentSessionProvider {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    /// Issue a new session for an existing user.
    ///
    /// Only the SHA-256 hash of the token is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::UnknownUser`] when the user does not exist,
    /// or a storage error.
    pub async fn issue_session(
        &self,
        user: UserUuid,
        ttl: SignedDuration,
    ) -> Result<IssuedSession, AuthServiceError> {
        let document = self.documents.get(user.into_uuid()).await?;

        if !document.is_kind(kinds::USER) {
            return Err(AuthServiceError::UnknownUser);
        }

        let expires_at = Timestamp::now()
            .checked_add(ttl)
            .map_err(AuthServiceError::InvalidLifetime)?;

        let token = generate_session_token();

        let session = NewDocument::new(
            kinds::SESSION,
            &SessionBody {
                token_hash: hash_session_token(&token),
                user_id: user,
                expires_at,
            },
        )?;

        self.documents.create(session).await?;

        Ok(IssuedSession {
            token,
            user_id: user,
            expires_at,
        })
    }
}

#[async_trait]
impl SessionProvider for DocumentSessionProvider {
    async fn current_session(&self, token: &str) -> Result<Option<Identity>, AuthServiceError> {
        if !is_well_formed(token) {
            return Ok(None);
        }

        let filter = Filter::of_kind(kinds::SESSION)
            .eq("tokenHash", hash_session_token(token))
            .limit(1);

        let Some(document) = self.documents.fetch(filter).await?.into_iter().next() else {
            return Ok(None);
        };

        let session = match document.decode::<SessionBody>() {
            Ok(session) => session,
            Err(error) => {
                warn!(session = %document.id, "ignoring malformed session: {error}");
                return Ok(None);
            }
        };

        if session.expires_at <= Timestamp::now() {
            debug!(session = %document.id, "session expired");
            return Ok(None);
        }

        let user = match self.documents.get(session.user_id.into_uuid()).await {
            Ok(user) if user.is_kind(kinds::USER) => user,
            Ok(_) | Err(DocumentStoreError::NotFound) => return Ok(None),
            Err(error) => return Err(AuthServiceError::Store(error)),
        };

        let user: UserBody = user.decode()?;

        Ok(Some(Identity {
            user_id: session.user_id,
            email: user.email,
            name: user.name,
            role: user.role,
        }))
    }
}

#[automock]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Resolve a bearer token. Unknown, expired or malformed tokens are `None`.
    async fn current_session(&self, token: &str) -> Result<Option<Identity>, AuthServiceError>;
}

/// Check that a request's identity carries `required`.
///
/// # Errors
///
/// Returns [`AuthorizationError::NotSignedIn`] without an identity, and
/// [`AuthorizationError::Forbidden`] when the role is insufficient.
pub fn authorize(
    identity: Option<&Identity>,
    required: Role,
) -> Result<&Identity, AuthorizationError> {
    let identity = identity.ok_or(AuthorizationError::NotSignedIn)?;

    match (required, identity.role) {
        (Role::Customer, _) | (Role::Admin, Role::Admin) => Ok(identity),
        (Role::Admin, Role::Customer) => Err(AuthorizationError::Forbidden),
    }
}
