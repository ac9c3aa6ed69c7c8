/*
 * Responsibility
 * - operation 名 → 許可ロール集合 の静的レジストリ (AccessPolicy)
 * - 各 handler モジュールが宣言する POLICIES テーブルから起動時に 1 回だけ組み立てる
 * - 認可判定そのもの (authorize) は I/O なしの純粋関数
 */
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::services::auth::identity::{Identity, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllowedRole {
    Only(Role),
    /// Any authenticated identity, whatever its role.
    Any,
}

pub const HOST: AllowedRole = AllowedRole::Only(Role::Host);
pub const LISTENER: AllowedRole = AllowedRole::Only(Role::Listener);
pub const ANY: AllowedRole = AllowedRole::Any;

/// One guarded operation, declared next to the handler that implements it.
#[derive(Debug, Clone, Copy)]
pub struct OperationPolicy {
    pub operation: &'static str,
    pub allowed: &'static [AllowedRole],
}

impl OperationPolicy {
    pub const fn new(operation: &'static str, allowed: &'static [AllowedRole]) -> Self {
        Self { operation, allowed }
    }
}

/// Outcome of a successful authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No policy entry: anyone may call.
    Public,
    Granted,
}

/// Why the guard refused. Kept for logs; callers see a single rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    Unauthenticated,
    Forbidden,
}

#[derive(Debug)]
pub enum PolicyError {
    Duplicate(&'static str),
    EmptyRoleSet(&'static str),
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::Duplicate(op) => write!(f, "access policy declared twice: {}", op),
            PolicyError::EmptyRoleSet(op) => write!(f, "access policy has no roles: {}", op),
        }
    }
}

impl std::error::Error for PolicyError {}

#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    entries: HashMap<&'static str, HashSet<AllowedRole>>,
}

impl AccessPolicy {
    /// Build the registry from declaration tables.
    ///
    /// A second declaration for the same operation is rejected rather than merged.
    /// An empty role list would make the operation uncallable, so it is rejected too.
    pub fn from_declarations<'a, I>(declarations: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = &'a OperationPolicy>,
    {
        let mut entries = HashMap::new();

        for decl in declarations {
            if decl.allowed.is_empty() {
                return Err(PolicyError::EmptyRoleSet(decl.operation));
            }
            let roles: HashSet<AllowedRole> = decl.allowed.iter().copied().collect();
            if entries.insert(decl.operation, roles).is_some() {
                return Err(PolicyError::Duplicate(decl.operation));
            }
        }

        Ok(Self { entries })
    }

    #[cfg(test)]
    pub fn allowed_roles(&self, operation: &str) -> Option<&HashSet<AllowedRole>> {
        self.entries.get(operation)
    }

    #[cfg(test)]
    pub fn is_guarded(&self, operation: &str) -> bool {
        self.entries.contains_key(operation)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn authorize(&self, operation: &str, identity: Option<&Identity>) -> Result<Access, Denial> {
        let Some(allowed) = self.entries.get(operation) else {
            return Ok(Access::Public);
        };

        let Some(identity) = identity else {
            return Err(Denial::Unauthenticated);
        };

        if allowed.contains(&AllowedRole::Any) || allowed.contains(&AllowedRole::Only(identity.role))
        {
            Ok(Access::Granted)
        } else {
            Err(Denial::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST_ONLY: &str = "createPodcast";
    const ANYONE_SIGNED_IN: &str = "me";
    const BOTH_ROLES: &str = "myPodcasts";
    const UNPOLICED: &str = "getAllPodcasts";

    const DECLARATIONS: &[OperationPolicy] = &[
        OperationPolicy::new(HOST_ONLY, &[HOST]),
        OperationPolicy::new(ANYONE_SIGNED_IN, &[ANY]),
        OperationPolicy::new(BOTH_ROLES, &[HOST, LISTENER]),
    ];

    fn policy() -> AccessPolicy {
        AccessPolicy::from_declarations(DECLARATIONS).unwrap()
    }

    fn host() -> Identity {
        Identity::new(1, Role::Host)
    }

    fn listener() -> Identity {
        Identity::new(2, Role::Listener)
    }

    #[test]
    fn host_only_operation_matrix() {
        let policy = policy();
        assert_eq!(
            policy.authorize(HOST_ONLY, None),
            Err(Denial::Unauthenticated)
        );
        assert_eq!(
            policy.authorize(HOST_ONLY, Some(&listener())),
            Err(Denial::Forbidden)
        );
        assert_eq!(
            policy.authorize(HOST_ONLY, Some(&host())),
            Ok(Access::Granted)
        );
    }

    #[test]
    fn any_role_requires_only_authentication() {
        let policy = policy();
        assert_eq!(
            policy.authorize(ANYONE_SIGNED_IN, Some(&host())),
            Ok(Access::Granted)
        );
        assert_eq!(
            policy.authorize(ANYONE_SIGNED_IN, Some(&listener())),
            Ok(Access::Granted)
        );
        assert_eq!(
            policy.authorize(ANYONE_SIGNED_IN, None),
            Err(Denial::Unauthenticated)
        );
    }

    #[test]
    fn listing_both_roles_admits_both() {
        let policy = policy();
        assert!(policy.authorize(BOTH_ROLES, Some(&host())).is_ok());
        assert!(policy.authorize(BOTH_ROLES, Some(&listener())).is_ok());
        assert!(policy.authorize(BOTH_ROLES, None).is_err());
    }

    #[test]
    fn undeclared_operation_is_public() {
        let policy = policy();
        assert!(!policy.is_guarded(UNPOLICED));
        assert_eq!(policy.authorize(UNPOLICED, None), Ok(Access::Public));
        assert_eq!(
            policy.authorize(UNPOLICED, Some(&listener())),
            Ok(Access::Public)
        );
    }

    #[test]
    fn duplicate_declaration_is_rejected() {
        let decls = [
            OperationPolicy::new(HOST_ONLY, &[HOST]),
            OperationPolicy::new(HOST_ONLY, &[LISTENER]),
        ];
        assert!(matches!(
            AccessPolicy::from_declarations(&decls),
            Err(PolicyError::Duplicate(HOST_ONLY))
        ));
    }

    #[test]
    fn empty_role_list_is_rejected() {
        let decls = [OperationPolicy::new(HOST_ONLY, &[])];
        assert!(matches!(
            AccessPolicy::from_declarations(&decls),
            Err(PolicyError::EmptyRoleSet(HOST_ONLY))
        ));
    }
}
