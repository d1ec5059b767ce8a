//! Board handlers: listing, detail, create, edit and delete.
//!
//! Every route here is guarded by the `CurrentUser` extractor.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::board::{normalize_page, BoardService, PostType};
use crate::web::error::WebError;
use crate::web::middleware::CurrentUser;
use crate::web::views;

use super::AppState;

/// Query parameters for the post listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
}

/// Query parameter carrying the active tab.
#[derive(Debug, Deserialize)]
pub struct TypeQuery {
    #[serde(rename = "type")]
    pub post_type: Option<String>,
}

/// Form fields for creating a post.
#[derive(Debug, Deserialize)]
pub struct CreatePostForm {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
}

/// Form fields for editing a post.
#[derive(Debug, Deserialize)]
pub struct EditPostForm {
    pub title: String,
    pub content: String,
}

/// GET /posts - paginated, searchable, type-filtered listing.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, WebError> {
    let page = normalize_page(query.page.as_deref());
    let search = query.search.unwrap_or_default();
    let post_type = PostType::coerce_opt(query.post_type.as_deref());

    let service = BoardService::new(&state.db);
    let listing = service.list_posts(page, &search, post_type).await?;

    Ok(Html(views::post_list_page(&user, &listing)))
}

/// GET /posts/:id - post detail. Every request counts a view.
pub async fn show_post(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, WebError> {
    let service = BoardService::new(&state.db);
    let post = service.get_post(id).await?;

    Ok(Html(views::post_detail_page(&user, &post)))
}

/// GET /posts/new/create - new post form for the active tab.
pub async fn new_post_form(
    CurrentUser(user): CurrentUser,
    Query(query): Query<TypeQuery>,
) -> Html<String> {
    let post_type = PostType::coerce_opt(query.post_type.as_deref());
    Html(views::new_post_page(&user, post_type))
}

/// POST /posts - create a post owned by the session user, then return
/// to the tab it was written for.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<CreatePostForm>,
) -> Result<Response, WebError> {
    let post_type = PostType::coerce_opt(form.post_type.as_deref());

    let service = BoardService::new(&state.db);
    service
        .create_post(user.user_id, &form.title, &form.content, post_type)
        .await?;

    Ok(Redirect::to(&format!("/posts?type={}", post_type.as_str())).into_response())
}

/// GET /posts/edit/:id - edit form, owner only.
pub async fn edit_post_form(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, WebError> {
    let service = BoardService::new(&state.db);
    let post = service.post_for_edit(id, user.user_id).await?;

    Ok(Html(views::edit_post_page(&user, &post)))
}

/// POST /posts/update/:id - owner-scoped update, then back to the
/// detail view.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<EditPostForm>,
) -> Result<Response, WebError> {
    let service = BoardService::new(&state.db);
    service
        .update_post(id, user.user_id, &form.title, &form.content)
        .await?;

    Ok(Redirect::to(&format!("/posts/{id}")).into_response())
}

/// POST /posts/delete/:id - owner-scoped delete, then back to the
/// default listing. The tab context is lost after a delete.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let service = BoardService::new(&state.db);
    service.delete_post(id, user.user_id).await?;

    Ok(Redirect::to("/posts").into_response())
}
