use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use uuid::Uuid;

use application::service::ResolveSessionService;
use kernel::prelude::entity::Session;

use crate::error::ErrorStatus;
use crate::handler::AppModule;

/// Session named by the bearer token, if any.
///
/// A missing or unparsable token, or one with no stored session, resolves to `None`.
/// Services decide whether a session was required.
pub struct CurrentSession(pub Option<Session>);

impl CurrentSession {
    pub fn get(&self) -> Option<&Session> {
        self.0.as_ref()
    }
}

#[async_trait]
impl FromRequestParts<AppModule> for CurrentSession {
    type Rejection = ErrorStatus;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppModule,
    ) -> Result<Self, Self::Rejection> {
        let Ok(TypedHeader(Authorization(bearer))) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
        else {
            return Ok(Self(None));
        };
        let Ok(id) = Uuid::parse_str(bearer.token()) else {
            return Ok(Self(None));
        };
        let session = state.database().resolve_session(id).await?;
        Ok(Self(session))
    }
}
