use crate::domain::model::User;
use async_trait::async_trait;
use uuid::Uuid;

/// Port for the domain layer: collection operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// The full collection in insertion order.
    async fn list(&self) -> anyhow::Result<Vec<User>>;
    /// Load a user by id (first match).
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Append a fully-formed domain user.
    ///
    /// Service computes the id; repo stores.
    async fn insert(&self, u: User) -> anyhow::Result<()>;
    /// Replace an existing user in place (matched on `u.id`). Returns false
    /// when no record matched.
    async fn update(&self, u: User) -> anyhow::Result<bool>;
    /// Remove every record with the given id. Returns the first removed
    /// record, if any.
    async fn remove(&self, id: Uuid) -> anyhow::Result<Option<User>>;
}
