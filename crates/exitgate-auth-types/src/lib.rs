//! Auth types shared across exitgate services.
//!
//! Authentication happens upstream; services only read the identity the gateway injects.

pub mod identity;

/// Header carrying the authenticated operator's UUID.
pub const OPERATOR_ID_HEADER: &str = "x-exitgate-operator-id";

/// Header carrying the authenticated operator's role as a `u8` wire value.
pub const OPERATOR_ROLE_HEADER: &str = "x-exitgate-operator-role";
