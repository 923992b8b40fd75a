//! Cookie-session access for the shop's HTTP handlers.
//!
//! Cart and order handlers need to know who is shopping. Rather than reading
//! ambient request state, they extract a [`SessionContext`] and ask it for the
//! signed-in [`UserId`]. Login is the only writer; everything else reads.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const SESSION_USER_KEY: &str = "user_id";

/// Domain-flavoured view of the request's session cookie.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Record a successful login by storing the user's id in the session.
    pub fn sign_in(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(SESSION_USER_KEY, user_id)
            .map_err(|error| Error::internal(format!("failed to write session: {error}")))
    }

    /// The signed-in user, if any.
    ///
    /// The stored value deserialises through [`UserId`]'s own validation, so
    /// a cookie carrying anything but a UUID counts as signed out.
    pub fn current_user(&self) -> Option<UserId> {
        match self.0.get::<UserId>(SESSION_USER_KEY) {
            Ok(user_id) => user_id,
            Err(error) => {
                warn!(%error, "discarding unreadable session entry");
                None
            }
        }
    }

    /// The signed-in user, or `401 Unauthorized` when there is none.
    pub fn require_user(&self) -> Result<UserId, Error> {
        self.current_user()
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = Session::from_request(req, payload);
        Box::pin(async move { session.await.map(Self) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    const FIXTURE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn sign_in_fixture(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = UserId::new(FIXTURE_ID).map_err(|err| Error::internal(err.to_string()))?;
        session.sign_in(&id)?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = session.require_user()?;
        Ok(HttpResponse::Ok().body(id.to_string()))
    }

    fn app_with_routes() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::session_middleware())
            .route("/sign-in", web::get().to(sign_in_fixture))
            .route("/whoami", web::get().to(whoami))
            .route(
                "/corrupt",
                web::get().to(|session: Session| async move {
                    session
                        .insert(SESSION_USER_KEY, "not-a-uuid")
                        .expect("write raw session value");
                    HttpResponse::Ok()
                }),
            )
    }

    async fn session_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        uri: &str,
    ) -> actix_web::cookie::Cookie<'static> {
        let res = test::call_service(app, test::TestRequest::get().uri(uri).to_request()).await;
        assert!(res.status().is_success());
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie issued")
            .into_owned()
    }

    #[actix_web::test]
    async fn signed_in_user_is_visible_on_the_next_request() {
        let app = test::init_service(app_with_routes()).await;
        let cookie = session_cookie(&app, "/sign-in").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, FIXTURE_ID);
    }

    #[actix_web::test]
    async fn anonymous_requests_are_unauthorised() {
        let app = test::init_service(app_with_routes()).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/whoami").to_request());
        assert_eq!(res.await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn non_uuid_session_values_count_as_signed_out() {
        let app = test::init_service(app_with_routes()).await;
        let cookie = session_cookie(&app, "/corrupt").await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
