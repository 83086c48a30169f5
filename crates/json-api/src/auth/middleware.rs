//! Bearer session middleware.

use std::sync::Arc;

use kusuri_app::domain::users::Requester;
use salvo::{http::header::AUTHORIZATION, prelude::*};

use crate::{auth::into_status_error, extensions::*, state::State};

/// Put the session's [`Requester`] in the depot, or answer 401 and stop the chain.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match resolve_requester(req, depot).await {
        Ok(requester) => {
            tracing::Span::current().record("user.id", tracing::field::display(requester.uuid));
            depot.insert_requester(requester);

            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();
        }
    }
}

async fn resolve_requester(req: &Request, depot: &Depot) -> Result<Requester, StatusError> {
    let token = extract_bearer_token(req).ok_or_else(|| {
        StatusError::unauthorized().brief("Missing or invalid Authorization header")
    })?;

    let state = Arc::clone(depot.obtain_or_500::<Arc<State>>()?);

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(into_status_error)
}

/// The credential from `Authorization: Bearer <token>`. The scheme is matched case-insensitively.
pub(crate) fn extract_bearer_token(req: &Request) -> Option<&str> {
    let (scheme, token) = req
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;

    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
