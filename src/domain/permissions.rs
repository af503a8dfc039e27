//! Capability bitmask shared with the user-identity service.
//!
//! Each bit is one capability. The catalog never interprets a caller's granted
//! mask beyond testing it against a required mask.

/// Granted or required capability bits.
pub type PermissionMask = u64;

/// Add, edit and delete books.
pub const MANAGE_BOOKS: PermissionMask = 1 << 0;
/// Read the total stored copy count.
pub const QUERY_TOTAL_STOCK: PermissionMask = 1 << 1;
/// Register changes to the total stored copy count.
/// Nominally requires QUERY_TOTAL_STOCK; not enforced here.
pub const CHANGE_TOTAL_STOCK: PermissionMask = 1 << 2;
/// Read other users, including their permissions.
pub const QUERY_USERS: PermissionMask = 1 << 3;
/// Add, edit and delete other users. Nominally requires QUERY_USERS.
pub const MANAGE_USERS: PermissionMask = 1 << 4;
/// Grant a subset of one's own permissions. Nominally requires QUERY_USERS.
pub const GRANT_PERMISSIONS: PermissionMask = 1 << 5;
/// Register takeouts and returns.
pub const LOAN_BOOKS: PermissionMask = 1 << 6;
/// Read the available (not lent out) copy count.
pub const QUERY_AVAILABLE_STOCK: PermissionMask = 1 << 7;
/// Read reservation information.
pub const QUERY_RESERVATIONS: PermissionMask = 1 << 8;

/// Whether `granted` satisfies `required`: any shared bit is enough.
pub fn grants(granted: PermissionMask, required: PermissionMask) -> bool {
    granted & required != 0
}
