//! Middlewares for routes.

use axum::extract::{MatchedPath, State};
use axum::http::{Method, header};

use crate::AppState;
use crate::ServerError;
use crate::employee::Role;
use crate::error::Result;

const EMPLOYEE_OR_MANAGER: &[Role] = &[Role::Employee, Role::Manager];
const MANAGER_ONLY: &[Role] = &[Role::Manager];

/// Who may call a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// No token needed.
    Public,
    /// Any valid access token.
    Authenticated,
    /// A valid access token carrying one of the listed roles.
    Roles(&'static [Role]),
}

/// Requirements per route, looked up by method and matched path.
/// Anything not listed needs a valid token.
static ROUTE_ACCESS: &[(Method, &str, Access)] = &[
    (Method::GET, "/api/v1/health", Access::Public),
    (Method::POST, "/api/v1/auth/login", Access::Public),
    (
        Method::POST,
        "/api/v1/auth/refresh",
        Access::Roles(EMPLOYEE_OR_MANAGER),
    ),
    (
        Method::POST,
        "/api/v1/auth/logout",
        Access::Roles(EMPLOYEE_OR_MANAGER),
    ),
    (
        Method::POST,
        "/api/v1/auth/password",
        Access::Roles(EMPLOYEE_OR_MANAGER),
    ),
    (Method::GET, "/api/v1/employees", Access::Roles(MANAGER_ONLY)),
    (Method::POST, "/api/v1/employees", Access::Roles(MANAGER_ONLY)),
    (
        Method::GET,
        "/api/v1/employees/{id}",
        Access::Roles(MANAGER_ONLY),
    ),
    (
        Method::PUT,
        "/api/v1/employees/{id}",
        Access::Roles(MANAGER_ONLY),
    ),
    (
        Method::DELETE,
        "/api/v1/employees/{id}",
        Access::Roles(MANAGER_ONLY),
    ),
    (
        Method::POST,
        "/api/v1/employees/{id}/password",
        Access::Roles(MANAGER_ONLY),
    ),
    (
        Method::GET,
        "/api/v1/employees/{id}/vacations",
        Access::Roles(EMPLOYEE_OR_MANAGER),
    ),
    (
        Method::POST,
        "/api/v1/vacations",
        Access::Roles(EMPLOYEE_OR_MANAGER),
    ),
    (
        Method::GET,
        "/api/v1/vacations/pending",
        Access::Roles(MANAGER_ONLY),
    ),
    (
        Method::POST,
        "/api/v1/vacations/{id}/approve",
        Access::Roles(MANAGER_ONLY),
    ),
    (
        Method::POST,
        "/api/v1/vacations/{id}/reject",
        Access::Roles(MANAGER_ONLY),
    ),
    (
        Method::DELETE,
        "/api/v1/vacations/{id}",
        Access::Roles(EMPLOYEE_OR_MANAGER),
    ),
];

/// Caller identity, attached to the request once the token checks out.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub employee_id: String,
    pub role: i32,
}

pub fn access_for(method: &Method, path: &str) -> Access {
    ROUTE_ACCESS
        .iter()
        .find(|(m, p, _)| m == method && *p == path)
        .map(|(_, _, access)| *access)
        .unwrap_or(Access::Authenticated)
}

/// Middleware to check access tokens against the route table.
pub async fn authorize(
    State(state): State<AppState>,
    mut request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<axum::response::Response> {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let access = access_for(request.method(), &path);
    if access == Access::Public {
        return Ok(next.run(request).await);
    }

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ServerError::Unauthorized("Missing bearer token"))?;

    let claims = state
        .token
        .decode(token)
        .map_err(|_| ServerError::Unauthorized("Invalid token"))?;

    if claims.sub.is_empty() || claims.role <= 0 {
        return Err(ServerError::Unauthorized("Invalid claims"));
    }

    if let Access::Roles(allowed) = access {
        let role = Role::from_value(claims.role);
        if !role.is_some_and(|role| allowed.contains(&role)) {
            return Err(ServerError::AccessDenied {
                role: claims.role,
                allowed,
            });
        }
    }

    request.extensions_mut().insert(AuthContext {
        employee_id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(request).await)
}
