use super::http_error::HttpError;
use crate::config::Config;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, ResponseError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

#[derive(Debug, Eq, PartialEq)]
struct Credentials {
    user: String,
    password: String,
}

/// Middleware that rejects requests without the configured basic auth credentials
pub struct BasicAuth {
    credentials: Rc<Credentials>,
}

impl BasicAuth {
    pub fn new(config: &Config) -> Self {
        Self {
            credentials: Rc::new(Credentials {
                user: config.auth_user.clone(),
                password: config.auth_password.clone(),
            }),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BasicAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BasicAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BasicAuthService {
            service: Rc::new(service),
            credentials: Rc::clone(&self.credentials),
        }))
    }
}

pub struct BasicAuthService<S> {
    service: Rc<S>,
    credentials: Rc<Credentials>,
}

impl<S, B> Service<ServiceRequest> for BasicAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authorized = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_basic)
            .map_or(false, |credentials| credentials == *self.credentials);

        if !authorized {
            let response = HttpError::Unauthorized.error_response();
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

// Decode the user and password out of an `Authorization: Basic ...` header value
// Empty users and passwords are never accepted.
fn parse_basic(header: &str) -> Option<Credentials> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (user, password) = decoded.split_once(':')?;
    if user.is_empty() || password.is_empty() {
        return None;
    }

    Some(Credentials {
        user: user.to_owned(),
        password: password.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn test_parse_basic() {
        assert_eq!(
            parse_basic(&header("user:secret")),
            Some(Credentials {
                user: "user".to_owned(),
                password: "secret".to_owned(),
            })
        );
        // Only the first colon separates the user from the password
        assert_eq!(
            parse_basic(&header("user:se:cret")).map(|credentials| credentials.password),
            Some("se:cret".to_owned())
        );
        assert!(parse_basic(&format!("basic {}", STANDARD.encode("user:secret"))).is_some());
    }

    #[test]
    fn test_parse_basic_invalid() {
        assert_eq!(parse_basic(""), None);
        assert_eq!(parse_basic("Basic"), None);
        assert_eq!(parse_basic("Bearer abc.def.ghi"), None);
        assert_eq!(parse_basic("Basic !!!not-base64!!!"), None);
        assert_eq!(parse_basic(&header("no-colon")), None);
        assert_eq!(parse_basic(&header(":secret")), None);
        assert_eq!(parse_basic(&header("user:")), None);
    }
}
