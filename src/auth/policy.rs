use super::Role;
use axum::http::Method;

/// Role required for a request with `method` on any `/api/**` route:
/// safe methods need USER (or ADMIN), everything else needs ADMIN.
pub fn required_role(method: &Method) -> Role {
    if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
        Role::User
    } else {
        Role::Admin
    }
}
