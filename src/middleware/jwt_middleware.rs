/// JWT Authentication Middleware
///
/// Guards the user management routes. A missing or malformed Authorization
/// header is a 401; a present token that fails verification is a 403.
/// Verified claims are injected into request extensions for use by route
/// handlers.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::auth::verify_access_token;
use crate::configuration::AuthSettings;

/// Access token middleware for protecting routes
///
/// Must be applied to routes that require authentication.
/// Extracts and verifies the bearer token from the Authorization header.
pub struct JwtMiddleware {
    auth_config: AuthSettings,
}

impl JwtMiddleware {
    pub fn new(auth_config: AuthSettings) -> Self {
        Self { auth_config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(JwtMiddlewareService {
            service: Rc::new(service),
            auth_config: self.auth_config.clone(),
        }))
    }
}

pub struct JwtMiddlewareService<S> {
    service: Rc<S>,
    auth_config: AuthSettings,
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
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
        // Extract the bearer token from the Authorization header
        let bearer_token = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer ").map(str::to_string));

        match bearer_token {
            None => {
                tracing::warn!("Missing or invalid Authorization header");
                let response = HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "Missing or invalid authorization header",
                    "code": "UNAUTHORIZED"
                }));
                Box::pin(async move {
                    Err(
                        actix_web::error::InternalError::from_response("Unauthorized", response)
                            .into(),
                    )
                })
            }
            Some(token) => match verify_access_token(&token, &self.auth_config) {
                Ok(claims) => {
                    tracing::debug!(
                        email = %claims.user_info.email,
                        "Access token verified"
                    );

                    // Inject claims into request extensions
                    req.extensions_mut().insert(claims);

                    let service = self.service.clone();
                    Box::pin(async move { service.call(req).await })
                }
                Err(e) => {
                    tracing::warn!("Access token rejected: {}", e);
                    let response = HttpResponse::Forbidden().json(serde_json::json!({
                        "error": "Invalid or expired token",
                        "code": "TOKEN_INVALID"
                    }));
                    Box::pin(async move {
                        Err(
                            actix_web::error::InternalError::from_response("Forbidden", response)
                                .into(),
                        )
                    })
                }
            },
        }
    }
}
