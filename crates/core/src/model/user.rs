use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::filter::{ListFilter, QueryParams};
use crate::id::UserId;
use crate::value_object::ValueObject;

// ─────────────────────────────────────────────────────────────────────────────
// Role
// ─────────────────────────────────────────────────────────────────────────────

/// Dashboard role. Gates are UI-level only; the backend enforces its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Manager,
    Supervisor,
    Operator,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::Supervisor, Role::Operator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Supervisor => "SUPERVISOR",
            Role::Operator => "OPERATOR",
        }
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Products and clients.
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }

    pub fn can_manage_orders(&self) -> bool {
        !matches!(self, Role::Operator)
    }

    pub fn can_bind_devices(&self) -> bool {
        !matches!(self, Role::Operator)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == upper)
            .ok_or_else(|| DomainError::unknown_variant(format!("role {s}")))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Username
// ─────────────────────────────────────────────────────────────────────────────

/// Unique login name: lower-cased, no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl ValueObject for Username {}

impl Username {
    pub fn normalize(input: &str) -> DomainResult<Self> {
        let normalized: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        if normalized.is_empty() {
            return Err(DomainError::validation("username", "username is required"));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Username {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub username: Username,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// Create/update payload. `password` is only sent when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub username: Username,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<Role>,
}

impl ListFilter for UserFilter {
    fn to_query_params(&self) -> DomainResult<Vec<(String, String)>> {
        Ok(QueryParams::new()
            .text("search", self.search.as_deref())
            .opt("role", self.role)
            .finish())
    }
}

/// Minimal e-mail shape check: one `@` with non-empty local part and a
/// dotted domain.
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_lowercased_without_whitespace() {
        assert_eq!(Username::normalize(" Jane Doe ").unwrap().as_str(), "janedoe");
        assert!(Username::normalize("   ").is_err());
    }

    #[test]
    fn role_gates() {
        assert!(Role::Admin.can_manage_users());
        assert!(!Role::Manager.can_manage_users());
        assert!(Role::Manager.can_manage_catalog());
        assert!(!Role::Supervisor.can_manage_catalog());
        assert!(Role::Supervisor.can_bind_devices());
        assert!(!Role::Operator.can_manage_orders());
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("supervisor".parse::<Role>().unwrap(), Role::Supervisor);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn email_shape() {
        assert!(is_plausible_email("ops@factory.io"));
        assert!(!is_plausible_email("ops@factory"));
        assert!(!is_plausible_email("@factory.io"));
        assert!(!is_plausible_email("o ps@factory.io"));
    }
}
