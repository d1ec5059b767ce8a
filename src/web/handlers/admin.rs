//! Admin panel handlers: user management.
//!
//! Every route here is guarded by the `AdminUser` extractor; non-admin
//! sessions are redirected to the login page before the handler runs.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::board::{normalize_page, PageInfo};
use crate::db::{NewUser, UserRepository, UserUpdate};
use crate::web::error::WebError;
use crate::web::middleware::AdminUser;
use crate::web::views;

use super::AppState;

/// Users shown per admin listing page.
pub const USERS_PER_PAGE: i64 = 5;

/// Query parameters for the admin listing.
#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    pub page: Option<String>,
}

/// Form fields for adding a user.
#[derive(Debug, Deserialize)]
pub struct AddUserForm {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Form fields for updating a user. The password is not editable here.
#[derive(Debug, Deserialize)]
pub struct UpdateUserForm {
    pub user_name: String,
    pub email: String,
}

/// GET /admin - paginated user listing, newest first.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Query(query): Query<AdminListQuery>,
) -> Result<Html<String>, WebError> {
    let page = normalize_page(query.page.as_deref());
    let repo = UserRepository::new(state.db.pool());

    let total = repo.count().await?;
    let users = repo
        .list_page((page - 1) * USERS_PER_PAGE, USERS_PER_PAGE)
        .await?;
    let info = PageInfo::compute(total, USERS_PER_PAGE, page);

    Ok(Html(views::admin_page(&admin, &users, &info)))
}

/// POST /admin/add - create a user account.
pub async fn add_user(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Form(form): Form<AddUserForm>,
) -> Result<Response, WebError> {
    let password_hash = crate::hash_password(&form.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        WebError::internal()
    })?;

    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .create(&NewUser::new(&form.user_name, &form.email, password_hash))
        .await?;

    tracing::info!(user_id = user.user_id, "user added by admin");
    Ok(Redirect::to("/admin").into_response())
}

/// POST /admin/update/:id - update a user's name and email.
///
/// Redirects back to the listing whether or not a row matched.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
    Form(form): Form<UpdateUserForm>,
) -> Result<Response, WebError> {
    let repo = UserRepository::new(state.db.pool());
    repo.update(
        id,
        &UserUpdate {
            user_name: form.user_name,
            email: form.email,
        },
    )
    .await?;

    Ok(Redirect::to("/admin").into_response())
}

/// GET /admin/delete/:id - delete a user account.
///
/// Redirects back to the listing whether or not a row matched.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let repo = UserRepository::new(state.db.pool());
    repo.delete(id).await?;

    tracing::info!(user_id = id, "user deleted by admin");
    Ok(Redirect::to("/admin").into_response())
}
