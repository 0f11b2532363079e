// SPDX-License-Identifier: Apache-2.0
//! AftermarketDeviceId contract bindings
//!
//! This module contains the Alloy-generated bindings for the Aftermarket Device
//! NFT contract: an upgradeable ERC721 whose tokens identify hardware devices,
//! with role-based administration and time-limited per-token privileges.
//!
//! The generated types (`AftermarketDeviceId::Transfer`,
//! `AftermarketDeviceId::safeMintCall`, the `AftermarketDeviceIdInstance`
//! bound contract, ...) are re-exported so callers can drop down to the raw
//! bindings whenever the wrappers are not enough.

use alloy_sol_types::sol;

sol!(
    #[allow(clippy::too_many_arguments)]
    #[allow(missing_docs)]
    #[sol(rpc, all_derives)]
    contract AftermarketDeviceId {
        struct SetPrivilegeData {
            uint256 tokenId;
            uint256 privId;
            address user;
            uint256 expires;
        }

        // ERC721
        event Approval(address indexed owner, address indexed approved, uint256 indexed tokenId);
        event ApprovalForAll(address indexed owner, address indexed operator, bool approved);
        event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);

        // AccessControl
        event RoleAdminChanged(bytes32 indexed role, bytes32 indexed previousAdminRole, bytes32 indexed newAdminRole);
        event RoleGranted(bytes32 indexed role, address indexed account, address indexed sender);
        event RoleRevoked(bytes32 indexed role, address indexed account, address indexed sender);

        // Initializable / UUPS
        event Initialized(uint8 version);
        event Upgraded(address indexed implementation);
        event AdminChanged(address previousAdmin, address newAdmin);
        event BeaconUpgraded(address indexed beacon);

        // MultiPrivilege
        event PrivilegeCreated(uint256 indexed privilegeId, bool enabled, string description);
        event PrivilegeEnabled(uint256 indexed privilegeId);
        event PrivilegeDisabled(uint256 indexed privilegeId);
        event PrivilegeSet(uint256 indexed tokenId, uint256 version, uint256 indexed privId, address indexed user, uint256 expires);

        function DEFAULT_ADMIN_ROLE() external view returns (bytes32);
        function UPGRADER_ROLE() external view returns (bytes32);
        function MINTER_ROLE() external view returns (bytes32);
        function BURNER_ROLE() external view returns (bytes32);
        function TRANSFERER_ROLE() external view returns (bytes32);
        function _dimoRegistry() external view returns (address);

        function balanceOf(address owner) external view returns (uint256);
        function ownerOf(uint256 tokenId) external view returns (address);
        function getApproved(uint256 tokenId) external view returns (address);
        function isApprovedForAll(address owner, address operator) external view returns (bool);
        function name() external view returns (string);
        function symbol() external view returns (string);
        function tokenURI(uint256 tokenId) external view returns (string);
        function supportsInterface(bytes4 interfaceId) external view returns (bool);

        function getRoleAdmin(bytes32 role) external view returns (bytes32);
        function hasRole(bytes32 role, address account) external view returns (bool);

        function hasPrivilege(uint256 tokenId, uint256 privId, address user) external view returns (bool);
        function privilegeExpiresAt(uint256 tokenId, uint256 privId, address user) external view returns (uint256);
        function privilegeRecord(uint256 privId) external view returns (bool enabled, string description);
        function tokenIdToVersion(uint256 tokenId) external view returns (uint256);

        function exists(uint256 tokenId) external view returns (bool);
        function trustedForwarders(address forwarder) external view returns (bool);
        function isTrustedForwarder(address forwarder) external view returns (bool);
        function proxiableUUID() external view returns (bytes32);

        function initialize(string name_, string symbol_, string baseUri_) external;
        function approve(address to, uint256 tokenId) external;
        function burn(uint256 tokenId) external;
        function createPrivilege(bool enabled, string description) external;
        function enablePrivilege(uint256 privId) external;
        function disablePrivilege(uint256 privId) external;
        function grantRole(bytes32 role, address account) external;
        function revokeRole(bytes32 role, address account) external;
        function renounceRole(bytes32 role, address account) external;
        function safeMint(address to) external returns (uint256 tokenId);
        function safeTransferByRegistry(address from, address to, uint256 tokenId) external;
        function safeTransferFrom(address from, address to, uint256 tokenId) external;
        function safeTransferFrom(address from, address to, uint256 tokenId, bytes data) external;
        function setApprovalForAll(address operator, bool approved) external;
        function setBaseURI(string baseURI_) external;
        function setDimoRegistryAddress(address addr) external;
        function setPrivilege(uint256 tokenId, uint256 privId, address user, uint256 expires) external;
        function setPrivileges(SetPrivilegeData[] privData) external;
        function setTrustedForwarder(address addr, bool trusted) external;
        function transferFrom(address from, address to, uint256 tokenId) external;
        function upgradeTo(address newImplementation) external;
        function upgradeToAndCall(address newImplementation, bytes data) external payable;
    }
);
