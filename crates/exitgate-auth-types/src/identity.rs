//! Gateway-injected operator identity extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use exitgate_domain::id::OperatorId;
use exitgate_domain::operator::OperatorRole;

use crate::{OPERATOR_ID_HEADER, OPERATOR_ROLE_HEADER};

/// Operator identity injected by the gateway via `x-exitgate-operator-id` and
/// `x-exitgate-operator-role` headers.
///
/// Returns 401 if either header is absent or unparsable, including unknown role values.
/// Role enforcement (403) is done by use cases after extraction.
#[derive(Debug, Clone, Copy)]
pub struct OperatorIdentity {
    pub operator_id: OperatorId,
    pub role: OperatorRole,
}

impl<S> FromRequestParts<S> for OperatorIdentity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 declares `fn -> impl Future + Send`; read the headers synchronously and
    // return a 'static future so no borrow of `parts` is captured.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let operator_id = parts
            .headers
            .get(OPERATOR_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok())
            .map(OperatorId);

        let role = parts
            .headers
            .get(OPERATOR_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u8>().ok())
            .and_then(OperatorRole::from_u8);

        async move {
            let operator_id = operator_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let role = role.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { operator_id, role })
        }
    }
}
