use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::model::{NewUser, User, UserPatch};

/// REST DTO for user representation with serde/utoipa.
///
/// Absent fields are omitted from the JSON output rather than serialized as
/// null.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    #[schema(example = "cb1e42c9-8914-494f-961c-77a5dde8429c")]
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "John")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "johndoe@email.com")]
    pub email: Option<String>,
}

/// REST DTO for creating a new user. No field is required; extra fields are
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct CreateUserReq {
    #[schema(example = "John")]
    pub first_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[schema(example = "johndoe@email.com")]
    pub email: Option<String>,
}

/// REST DTO for updating a user (partial).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateUserReq {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

// Conversions between REST DTOs and domain models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let dto = UserDto {
            id: Uuid::nil(),
            first_name: Some("Miku".to_string()),
            last_name: None,
            email: None,
        };

        let value = serde_json::to_value(&dto).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("first_name").and_then(|v| v.as_str()), Some("Miku"));
        assert!(!obj.contains_key("last_name"));
        assert!(!obj.contains_key("email"));
    }

    #[test]
    fn unknown_payload_fields_are_ignored() {
        let req: CreateUserReq =
            serde_json::from_str(r#"{"first_name":"Miku","role":"admin"}"#).unwrap();
        assert_eq!(req.first_name.as_deref(), Some("Miku"));
        assert_eq!(req.last_name, None);
    }

    #[test]
    fn create_request_maps_onto_the_domain_model() {
        let req = CreateUserReq {
            first_name: Some("Miku".to_string()),
            last_name: Some("Nakano".to_string()),
            email: Some("m@e.jp".to_string()),
        };
        let new_user = NewUser::from(req);
        assert_eq!(new_user.first_name.as_deref(), Some("Miku"));
        assert_eq!(new_user.last_name.as_deref(), Some("Nakano"));
        assert_eq!(new_user.email.as_deref(), Some("m@e.jp"));
    }
}
