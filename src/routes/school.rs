//! /api routes for teachers, students and courses, all behind Basic auth.
//! GET needs USER or ADMIN; POST/PUT/DELETE need ADMIN (see `auth::required_role`).

use crate::auth::require_auth;
use crate::handlers::{course, student, teacher};
use crate::state::AppState;
use axum::{middleware, routing::get, Router};

pub fn school_routes(state: AppState) -> Router {
    Router::new()
        .route("/teachers", get(teacher::list).post(teacher::create))
        .route(
            "/teachers/:id",
            get(teacher::read).put(teacher::update).delete(teacher::delete),
        )
        .route("/students", get(student::list))
        .route(
            "/students/:id",
            get(student::read).put(student::update).delete(student::delete),
        )
        .route(
            "/students/teacher/:teacher_id",
            get(student::list_by_teacher).post(student::create_for_teacher),
        )
        .route("/courses", get(course::list))
        .route(
            "/courses/:id",
            get(course::read).put(course::update).delete(course::delete),
        )
        .route(
            "/courses/teacher/:teacher_id",
            get(course::list_by_teacher).post(course::create_for_teacher),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}
