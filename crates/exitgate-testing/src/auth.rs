//! Mock auth helpers for integration tests.
//!
//! Services behind the gateway receive `x-exitgate-operator-id` + `x-exitgate-operator-role`
//! headers injected by the gateway. In tests, `MockAuth` produces these headers directly
//! so no real gateway or session is needed.

use http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use exitgate_auth_types::{OPERATOR_ID_HEADER, OPERATOR_ROLE_HEADER};
use exitgate_domain::operator::OperatorRole;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub operator_id: Uuid,
    pub role: OperatorRole,
}

impl MockAuth {
    pub fn new(operator_id: Uuid, role: OperatorRole) -> Self {
        Self { operator_id, role }
    }

    pub fn operator() -> Self {
        Self::new(Uuid::new_v4(), OperatorRole::Operator)
    }

    pub fn admin() -> Self {
        Self::new(Uuid::new_v4(), OperatorRole::Admin)
    }

    /// Header pairs as if the gateway injected them.
    pub fn header_pairs(&self) -> Vec<(HeaderName, HeaderValue)> {
        vec![
            (
                HeaderName::from_static(OPERATOR_ID_HEADER),
                HeaderValue::from_str(&self.operator_id.to_string()).unwrap(),
            ),
            (
                HeaderName::from_static(OPERATOR_ROLE_HEADER),
                HeaderValue::from(u16::from(self.role.as_u8())),
            ),
        ]
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        self.header_pairs().into_iter().collect()
    }
}
