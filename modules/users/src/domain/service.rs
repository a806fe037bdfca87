use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::error::UsersError;
use crate::domain::model::{NewUser, User, UserPatch};
use crate::domain::repo::UsersRepository;

/// Domain service over the user collection. Depends only on the repository
/// port, not on the storage behind it.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    /// The full collection in insertion order. A pure read.
    #[instrument(name = "users.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, UsersError> {
        let users = self.repo.list().await.map_err(UsersError::internal)?;
        debug!("Listed {} users", users.len());
        Ok(users)
    }

    #[instrument(name = "users.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, UsersError> {
        debug!("Getting user by id");
        self.repo
            .find_by_id(id)
            .await
            .map_err(UsersError::internal)?
            .ok_or_else(|| UsersError::not_found(id))
    }

    /// Assign a fresh id and append.
    ///
    /// There is no validation failure path: whatever subset of fields the
    /// caller supplies is stored verbatim.
    #[instrument(name = "users.service.create_user", skip(self, new_user))]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, UsersError> {
        let user = User {
            id: Uuid::new_v4(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
        };

        self.repo
            .insert(user.clone())
            .await
            .map_err(UsersError::internal)?;

        info!("Created user with id={}", user.id);
        Ok(user)
    }

    /// Overwrite only the fields present (and non-empty) in the patch,
    /// leaving the rest unchanged.
    #[instrument(name = "users.service.update_user", skip(self, patch), fields(user_id = %id))]
    pub async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, UsersError> {
        let mut current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(UsersError::internal)?
            .ok_or_else(|| UsersError::not_found(id))?;

        if let Some(first_name) = patch.first_name.filter(|s| !s.is_empty()) {
            current.first_name = Some(first_name);
        }
        if let Some(last_name) = patch.last_name.filter(|s| !s.is_empty()) {
            current.last_name = Some(last_name);
        }
        if let Some(email) = patch.email.filter(|s| !s.is_empty()) {
            current.email = Some(email);
        }

        let replaced = self
            .repo
            .update(current.clone())
            .await
            .map_err(UsersError::internal)?;
        if !replaced {
            return Err(UsersError::not_found(id));
        }

        info!("Updated user");
        Ok(current)
    }

    /// Remove every record with the id. Returns the first removed record so
    /// callers can name it in confirmations.
    #[instrument(name = "users.service.delete_user", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: Uuid) -> Result<User, UsersError> {
        let removed = self
            .repo
            .remove(id)
            .await
            .map_err(UsersError::internal)?
            .ok_or_else(|| UsersError::not_found(id))?;

        info!("Deleted user");
        Ok(removed)
    }
}
