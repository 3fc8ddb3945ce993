//! Role enumeration and role resolution state.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::WizardStep;
use crate::error::OnboardError;

/// Client-selected persona that decides which stages are visible.
///
/// `Admin` fills in both stages; `Ops` only ever sees stage 2.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Ops,
}

impl Role {
    /// All roles, in selector order.
    pub const ALL: [Role; 2] = [Role::Admin, Role::Ops];

    /// Value used in the inbound role signal (`?role=admin`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Ops => "ops",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Ops => "Ops",
        }
    }

    /// Storage key of this role's draft slot.
    pub fn draft_key(&self) -> &'static str {
        match self {
            Role::Admin => "draft_admin",
            Role::Ops => "draft_ops",
        }
    }

    /// The step a session for this role starts on.
    pub fn initial_step(&self) -> WizardStep {
        match self {
            Role::Admin => WizardStep::Stage1,
            Role::Ops => WizardStep::Stage2,
        }
    }

    /// Whether this role fills in and submits stage 1.
    pub fn sees_stage1(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = OnboardError;

    /// Parses the exact signal value. Anything else, including different
    /// casing, is rejected so an unknown role never silently falls back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| OnboardError::InvalidRole {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of reading the inbound role signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleState {
    /// A valid role is active.
    Resolved(Role),
    /// The signal was present but not a known role. No forms are shown.
    Unresolved { value: String },
}

impl RoleState {
    /// Resolves the raw inbound signal.
    ///
    /// An absent signal defaults to [`Role::Admin`]; a present but unknown
    /// value is kept as [`RoleState::Unresolved`].
    pub fn resolve(signal: Option<&str>) -> Self {
        match signal {
            None => RoleState::Resolved(Role::Admin),
            Some(value) => match value.parse::<Role>() {
                Ok(role) => RoleState::Resolved(role),
                Err(_) => RoleState::Unresolved {
                    value: value.to_string(),
                },
            },
        }
    }

    /// The active role, if resolved.
    pub fn role(&self) -> Option<Role> {
        match self {
            RoleState::Resolved(role) => Some(*role),
            RoleState::Unresolved { .. } => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, RoleState::Unresolved { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_parses_from_its_signal_value() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().ok(), Some(role));
        }
    }

    #[test]
    fn test_resolve_keeps_unknown_values() {
        assert_eq!(RoleState::resolve(None), RoleState::Resolved(Role::Admin));
        assert_eq!(
            RoleState::resolve(Some("Admin")),
            RoleState::Unresolved {
                value: "Admin".to_string()
            }
        );
    }
}
