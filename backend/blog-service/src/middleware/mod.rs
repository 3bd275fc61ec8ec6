/// HTTP middleware for blog-service
///
/// Bearer-token authentication. The middleware validates a token whenever
/// one is presented and stores the identity in request extensions, but it
/// does not reject anonymous requests: post and group reads are public.
/// Handlers that require authentication take the `AuthUser` extractor,
/// which fails with 401 when no identity was established.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use uuid::Uuid;

use crate::error::AppError;

/// Authenticated identity stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// Actix middleware that validates Bearer tokens via auth-core.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            if let Some(header) = auth_header {
                // A presented credential must be valid, even on public routes
                let token = header.strip_prefix("Bearer ").ok_or_else(|| {
                    Error::from(AppError::Unauthorized(
                        "Invalid Authorization scheme".to_string(),
                    ))
                })?;

                let claims = auth_core::jwt::validate_access_token(token)
                    .map_err(|_| {
                        Error::from(AppError::Unauthorized(
                            "Invalid or expired token".to_string(),
                        ))
                    })?;

                let user_id = claims.user_id().map_err(|_| {
                    Error::from(AppError::Unauthorized("Invalid user ID".to_string()))
                })?;

                req.extensions_mut().insert(AuthUser {
                    id: user_id,
                    username: claims.username,
                });
            }

            service.call(req).await
        })
    }
}

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthUser>()
                .cloned()
                .ok_or_else(|| {
                    Error::from(AppError::Unauthorized(
                        "Authentication required".to_string(),
                    ))
                }),
        )
    }
}
