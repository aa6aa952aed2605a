//! Access Policy
//! Which roles may perform which operation

use crate::auth::models::Role;

const ADM_ONLY: &[Role] = &[Role::Adm];
const ADM_OR_EDITOR: &[Role] = &[Role::Adm, Role::Editor];

/// Named access policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// No token required.
    Public,
    /// Any valid token.
    Authenticated,
    AdmOrEditor,
    AdmOnly,
}

/// Outcome of checking a caller against a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// A token is required but none was verified.
    Unauthenticated,
    /// The token's role is not in the policy's role set.
    Forbidden,
}

impl Policy {
    /// Roles permitted by this policy, `None` when any caller's role will do.
    pub fn required_roles(self) -> Option<&'static [Role]> {
        match self {
            Policy::Public | Policy::Authenticated => None,
            Policy::AdmOrEditor => Some(ADM_OR_EDITOR),
            Policy::AdmOnly => Some(ADM_ONLY),
        }
    }

    pub fn requires_token(self) -> bool {
        !matches!(self, Policy::Public)
    }

    /// Any-of membership test of the caller's role against the role set.
    pub fn permits(self, role: &Role) -> bool {
        match self.required_roles() {
            None => true,
            Some(roles) => roles.contains(role),
        }
    }

    /// Decide access for a caller whose verified role is `role`
    /// (`None` when no valid token was presented).
    pub fn check(self, role: Option<&Role>) -> Access {
        match (self.requires_token(), role) {
            (false, _) => Access::Granted,
            (true, None) => Access::Unauthenticated,
            (true, Some(role)) if self.permits(role) => Access::Granted,
            (true, Some(_)) => Access::Forbidden,
        }
    }
}

/// Operations exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    CreateVehicle,
    ListVehicles,
    GetVehicle,
    UpdateVehicle,
    DeleteVehicle,
}

impl Operation {
    pub fn policy(self) -> Policy {
        match self {
            Operation::Login => Policy::Public,
            Operation::ListVehicles | Operation::GetVehicle => Policy::Authenticated,
            Operation::CreateVehicle | Operation::UpdateVehicle => Policy::AdmOrEditor,
            Operation::DeleteVehicle => Policy::AdmOnly,
        }
    }
}
