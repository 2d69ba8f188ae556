use std::sync::Arc;

use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};

use crate::{AppState, error::AppError};

/// The authenticated caller, resolved from HTTP Basic credentials.
/// Missing, malformed, or non-matching credentials all reject with the
/// same 401 response.
pub struct CurrentUser(pub String);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(basic)) = parts
            .extract::<TypedHeader<Authorization<Basic>>>()
            .await
            .map_err(|_| AppError::AuthFailed)?;

        let user = state.store.verify(basic.username(), basic.password()).await?;
        user.map(|u| CurrentUser(u.login)).ok_or(AppError::AuthFailed)
    }
}
