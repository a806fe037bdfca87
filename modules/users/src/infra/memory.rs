use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::{uuid, Uuid};

use crate::domain::model::User;
use crate::domain::repo::UsersRepository;

/// In-memory adapter for [`UsersRepository`].
///
/// The collection is an insertion-ordered `Vec` behind an `RwLock`. Every
/// operation takes the lock once for the whole scan-and-mutate, so no caller
/// observes a partially updated collection; the lock is never held across an
/// await point. Linear scans are fine at this data scale.
pub struct InMemoryUsersRepository {
    users: RwLock<Vec<User>>,
}

const ITSUKI_ID: Uuid = uuid!("cb1e42c9-8914-494f-961c-77a5dde8429c");
const NINO_ID: Uuid = uuid!("468e6450-894c-4c83-a1fc-7aa5260650a2");

impl InMemoryUsersRepository {
    /// An empty collection.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    /// The collection the server boots with: two fixed sample records.
    pub fn seeded() -> Self {
        let users = vec![
            User {
                id: ITSUKI_ID,
                first_name: Some("Itsuki".to_string()),
                last_name: Some("Nakano".to_string()),
                email: Some("itsukinakano@email.jp".to_string()),
            },
            User {
                id: NINO_ID,
                first_name: Some("Nino".to_string()),
                last_name: Some("Nakano".to_string()),
                email: Some("ninonakano@email.jp".to_string()),
            },
        ];
        Self {
            users: RwLock::new(users),
        }
    }
}

impl Default for InMemoryUsersRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn list(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.users.read().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, u: User) -> anyhow::Result<()> {
        self.users.write().push(u);
        Ok(())
    }

    async fn update(&self, u: User) -> anyhow::Result<bool> {
        let mut users = self.users.write();
        match users.iter_mut().find(|existing| existing.id == u.id) {
            Some(slot) => {
                *slot = u;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let mut users = self.users.write();
        let first = users.iter().find(|u| u.id == id).cloned();
        if first.is_some() {
            users.retain(|u| u.id != id);
        }
        Ok(first)
    }
}
