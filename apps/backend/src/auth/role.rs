//! Caller roles carried in access tokens and stored on user rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of roles. Only `Admin` and `Owner` may trigger manual
/// reminder checks or receive expiry notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Owner,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Owner => "owner",
            Role::User => "user",
        }
    }

    /// Whether this role is allowed to run reminder checks and is a
    /// reminder recipient.
    pub fn can_manage_reminders(&self) -> bool {
        matches!(self, Role::Admin | Role::Owner)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "owner" => Ok(Role::Owner),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Role;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Owner, Role::User] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_reminder_permission() {
        assert!(Role::Admin.can_manage_reminders());
        assert!(Role::Owner.can_manage_reminders());
        assert!(!Role::User.can_manage_reminders());
    }
}
