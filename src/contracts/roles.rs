//! Access-control roles recognised by the Aftermarket Device contract
//!
//! Role identifiers are the keccak256 hash of the Solidity constant name, except
//! for the default admin role which is the zero word.

use std::fmt;

use alloy_primitives::{keccak256, B256};

/// A role granted through the contract's `AccessControl` surface
///
/// # Example
///
/// ```rust
/// use aftermarket_device::Role;
/// use alloy_primitives::keccak256;
///
/// assert_eq!(Role::Minter.id(), keccak256("MINTER_ROLE"));
/// assert_eq!(Role::from_id(Role::Burner.id()), Some(Role::Burner));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Role {
    /// `DEFAULT_ADMIN_ROLE`, admin of every other role
    DefaultAdmin,
    /// `UPGRADER_ROLE`, may upgrade the proxy implementation
    Upgrader,
    /// `MINTER_ROLE`, may call `safeMint`
    Minter,
    /// `BURNER_ROLE`, may call `burn`
    Burner,
    /// `TRANSFERER_ROLE`, may call `safeTransferByRegistry`
    Transferer,
}

impl Role {
    /// Every known role, in declaration order
    pub const ALL: [Role; 5] = [
        Role::DefaultAdmin,
        Role::Upgrader,
        Role::Minter,
        Role::Burner,
        Role::Transferer,
    ];

    /// The Solidity constant name of the role
    pub const fn name(self) -> &'static str {
        match self {
            Role::DefaultAdmin => "DEFAULT_ADMIN_ROLE",
            Role::Upgrader => "UPGRADER_ROLE",
            Role::Minter => "MINTER_ROLE",
            Role::Burner => "BURNER_ROLE",
            Role::Transferer => "TRANSFERER_ROLE",
        }
    }

    /// The on-chain `bytes32` identifier of the role
    pub fn id(self) -> B256 {
        match self {
            Role::DefaultAdmin => B256::ZERO,
            other => keccak256(other.name()),
        }
    }

    /// Maps an on-chain identifier back to a known role
    pub fn from_id(id: B256) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Role> for B256 {
    fn from(role: Role) -> Self {
        role.id()
    }
}
