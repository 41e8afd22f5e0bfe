//! Accounts and roles.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RecordId;

/// Role attached to a user account.
///
/// Only `admin` carries privileges. Unknown roles are preserved verbatim so a
/// cached record serializes back exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    /// Administrator, allowed to moderate every listing.
    Admin,
    /// Regular buyer or seller.
    #[default]
    User,
    /// Any role string this client does not recognise.
    Other(String),
}

impl UserRole {
    /// Return the wire representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Self::Admin,
            "user" => Self::User,
            _ => Self::Other(value),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile fields cached next to the credential for display without a
/// network round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Server-assigned identifier.
    pub id: RecordId,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Login email address.
    pub email: String,
    /// Account role.
    #[serde(default)]
    pub role: UserRole,
}

impl UserRecord {
    /// Admin access is a pure function of the role; it is never cached.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Full name, falling back to the email when no name is on file.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

/// Response of `GET /user/showUser`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowUserResponse {
    /// Current profile of the signed-in account.
    pub user: UserRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: UserRole) -> UserRecord {
        UserRecord {
            id: RecordId::Number(7),
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            email: "ada@example.com".into(),
            role,
        }
    }

    #[test]
    fn role_wire_values() {
        for (text, role) in [("admin", UserRole::Admin), ("user", UserRole::User)] {
            assert_eq!(role.as_str(), text);
            assert_eq!(role.to_string(), text);
            assert_eq!(UserRole::from(text.to_string()), role);
        }
    }

    #[test]
    fn unknown_role_survives_roundtrip() {
        let json = r#"{"id":"u-1","first_name":"A","last_name":"B","email":"a@b.co","role":"dealer"}"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, UserRole::Other("dealer".into()));
        assert!(!user.is_admin());
        assert_eq!(serde_json::to_string(&user).unwrap(), json);
    }

    #[test]
    fn only_admin_role_is_admin() {
        assert!(sample_user(UserRole::Admin).is_admin());
        assert!(!sample_user(UserRole::User).is_admin());
        assert!(!sample_user(UserRole::Other("Admin".into())).is_admin());
    }

    #[test]
    fn missing_role_defaults_to_user() {
        let user: UserRecord = serde_json::from_str(r#"{"id":1,"email":"a@b.co"}"#).unwrap();
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.display_name(), "a@b.co");
    }

    #[test]
    fn display_name_joins_names() {
        assert_eq!(sample_user(UserRole::User).display_name(), "Ada Obi");
    }
}
