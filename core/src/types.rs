//! The `User` entity and the JSON shapes exchanged with the auth server.
//!
//! # Design
//! `User` is the caller-owned value that operations reconcile against the
//! server. The wire DTOs are kept separate from it: `NewPerson` is exactly the
//! create payload, and `UserRecord` accepts any server response shape by
//! making every field optional and ignoring unknown keys (the server also
//! sends `@context`, `groups`, `memberOf` and friends).

use serde::{Deserialize, Serialize};

/// A person record held by the auth server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct User {
    /// Server-assigned identifier. `None` until `create` succeeds.
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl User {
    /// A not-yet-created user.
    pub fn new(name: impl Into<String>, email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            is_admin,
            ..Self::default()
        }
    }

    /// A handle on an existing record, typically followed by `get`.
    pub fn with_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    /// Overwrite the profile fields from a fetched record. Fields the server
    /// omitted become unset rather than keeping their previous values.
    pub fn apply_record(&mut self, record: UserRecord) {
        self.name = record.name;
        self.email = record.email;
        self.is_admin = record.is_admin.unwrap_or(false);
    }

    /// Reset the profile fields, keeping the identifier.
    pub fn clear_profile(&mut self) {
        self.apply_record(UserRecord::default());
    }
}

/// Request payload for `POST user/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPerson {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_admin: bool,
}

impl From<&User> for NewPerson {
    fn from(user: &User) -> Self {
        Self {
            kind: "Person".to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// A user record as returned by create, get and delete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserRecord {
    #[serde(rename = "@id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

impl UserRecord {
    /// The identifier to address this record by, if the server sent one.
    ///
    /// Some server builds emit `@id` as an absolute IRI such as
    /// `https://host/user/<uuid>`; only the last path segment is routable.
    pub fn user_id(&self) -> Option<String> {
        let raw = self.id.as_deref()?.trim().trim_end_matches('/');
        let id = raw.rsplit('/').next().unwrap_or(raw);
        if id.is_empty() {
            None
        } else {
            Some(id.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_person_has_person_type_and_nullable_fields() {
        let user = User {
            is_admin: true,
            ..User::default()
        };
        let json = serde_json::to_value(NewPerson::from(&user)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"@type": "Person", "name": null, "email": null, "is_admin": true})
        );
    }

    #[test]
    fn record_ignores_unknown_fields() {
        let record: UserRecord = serde_json::from_str(
            r#"{"@id":"u1","@context":{"@base":"http://schema.org/"},"name":"Ann","memberOf":[]}"#,
        )
        .unwrap();
        assert_eq!(record.user_id().as_deref(), Some("u1"));
        assert_eq!(record.name.as_deref(), Some("Ann"));
        assert!(record.email.is_none());
        assert!(record.is_admin.is_none());
    }

    #[test]
    fn record_id_takes_last_segment_of_iri() {
        let record = UserRecord {
            id: Some("https://auth.example.org/user/3f2a".to_string()),
            ..UserRecord::default()
        };
        assert_eq!(record.user_id().as_deref(), Some("3f2a"));
    }

    #[test]
    fn blank_record_id_is_treated_as_missing() {
        for raw in ["", "  ", "/"] {
            let record = UserRecord {
                id: Some(raw.to_string()),
                ..UserRecord::default()
            };
            assert!(record.user_id().is_none(), "{raw:?}");
        }
        assert!(UserRecord::default().user_id().is_none());
    }

    #[test]
    fn user_serializes_without_unset_tokens() {
        let mut user = User::new("Ann", "ann@example.org", false);
        user.user_id = Some("u1".to_string());
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"user_id": "u1", "name": "Ann", "email": "ann@example.org", "is_admin": false})
        );
    }

    #[test]
    fn apply_record_overwrites_stale_fields() {
        let mut user = User::new("Old", "old@example.org", true);
        user.user_id = Some("u1".to_string());
        user.apply_record(UserRecord {
            name: Some("New".to_string()),
            ..UserRecord::default()
        });
        assert_eq!(user.name.as_deref(), Some("New"));
        assert!(user.email.is_none());
        assert!(!user.is_admin);
        assert_eq!(user.user_id.as_deref(), Some("u1"));
    }
}
