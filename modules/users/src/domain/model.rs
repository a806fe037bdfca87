use uuid::Uuid;

/// Pure user model shared by the domain and storage layers (no serde here).
///
/// All three text fields are optional at the protocol level; presence is
/// never enforced on the way in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Data for creating a new user. The id is assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Partial update data for a user. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}
