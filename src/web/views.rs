//! Server-rendered HTML views for CORKBOARD.
//!
//! Each function takes a view model and returns a complete page; the
//! handlers treat this module as the rendering collaborator. Nothing in
//! here touches the database.

use crate::auth::AuthContext;
use crate::board::{PageInfo, Post, PostDetail, PostListing, PostType};
use crate::db::User;

/// Stylesheet embedded in every page.
const STYLE: &str = "\
body { font-family: sans-serif; max-width: 56rem; margin: 0 auto; padding: 0 1rem; }
nav { padding: 0.5rem 0; border-bottom: 1px solid #ccc; }
nav .whoami { font-weight: bold; margin-right: 1rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #ddd; padding: 0.4rem; text-align: left; }
.tabs a { margin-right: 1rem; }
.tabs a.active { font-weight: bold; text-decoration: none; }
.error { color: #b00020; }
.pager { margin: 1rem 0; }
form.inline { display: inline; }
pre.content { white-space: pre-wrap; font-family: inherit; }
label { display: block; margin: 0.5rem 0; }
";

/// Escape text for safe interpolation into HTML.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a page body in the common document shell.
fn layout(title: &str, user: Option<&AuthContext>, body: &str) -> String {
    let nav = match user {
        Some(user) => format!(
            r#"<nav><span class="whoami">{}</span><a href="/posts">Board</a> <a href="/logout">Log out</a></nav>"#,
            escape_html(&user.user_name)
        ),
        None => r#"<nav><a href="/">Log in</a> <a href="/signup">Sign up</a></nav>"#.to_string(),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\n{style}</style>\n</head>\n<body>\n{nav}\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape_html(title),
        style = STYLE,
        nav = nav,
        body = body,
    )
}

fn inline_error(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape_html(e)))
        .unwrap_or_default()
}

/// Login view, optionally with an inline error message.
pub fn login_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Log in</h1>
{error}
<form method="post" action="/login">
<label>Email <input type="email" name="email"></label>
<label>Password <input type="password" name="password"></label>
<button type="submit">Log in</button>
</form>
<p><a href="/signup">Create an account</a></p>"#,
        error = inline_error(error),
    );
    layout("Log in", None, &body)
}

/// Signup view, optionally with an inline error message.
pub fn signup_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Sign up</h1>
{error}
<form method="post" action="/signup">
<label>Username <input type="text" name="username"></label>
<label>Email <input type="email" name="email"></label>
<label>Password <input type="password" name="password"></label>
<button type="submit">Sign up</button>
</form>
<p><a href="/">Back to login</a></p>"#,
        error = inline_error(error),
    );
    layout("Sign up", None, &body)
}

/// Admin user-management view.
pub fn admin_page(admin: &AuthContext, users: &[User], page: &PageInfo) -> String {
    let mut rows = String::new();
    for user in users {
        rows.push_str(&format!(
            r#"<tr class="user-row">
<td>{id}</td>
<td><form class="inline" method="post" action="/admin/update/{id}">
<input type="text" name="user_name" value="{name}">
<input type="email" name="email" value="{email}">
<button type="submit">Update</button>
</form></td>
<td>{created}</td>
<td><a href="/admin/delete/{id}">Delete</a></td>
</tr>
"#,
            id = user.user_id,
            name = escape_html(&user.user_name),
            email = escape_html(&user.email),
            created = escape_html(&user.created_at),
        ));
    }

    let pager = admin_pager(page);
    let body = format!(
        r#"<h1>Admin - User Management</h1>
<table>
<tr><th>ID</th><th>User</th><th>Created</th><th></th></tr>
{rows}</table>
{pager}
<h2>Add user</h2>
<form method="post" action="/admin/add">
<label>Username <input type="text" name="user_name"></label>
<label>Email <input type="email" name="email"></label>
<label>Password <input type="password" name="password"></label>
<button type="submit">Add</button>
</form>"#,
    );
    layout("Admin - User Management", Some(admin), &body)
}

fn admin_pager(page: &PageInfo) -> String {
    let prev = if page.has_prev() {
        format!(r#"<a href="/admin?page={}">Prev</a> "#, page.page - 1)
    } else {
        String::new()
    };
    let next = if page.has_next() {
        format!(r#" <a href="/admin?page={}">Next</a>"#, page.page + 1)
    } else {
        String::new()
    };
    format!(
        r#"<div class="pager">{prev}<span class="pages">Page {} of {}</span>{next}</div>"#,
        page.page, page.total_pages,
    )
}

/// Post listing view with tabs, search and pagination.
pub fn post_list_page(user: &AuthContext, listing: &PostListing) -> String {
    let title = match listing.post_type {
        PostType::Notice => "Notices",
        PostType::Free => "Free Board",
    };
    let active_type = listing.post_type.as_str();

    let tabs = format!(
        r#"<div class="tabs"><a href="/posts?type=free"{free}>Free Board</a><a href="/posts?type=notice"{notice}>Notices</a></div>"#,
        free = if listing.post_type == PostType::Free {
            r#" class="active""#
        } else {
            ""
        },
        notice = if listing.post_type == PostType::Notice {
            r#" class="active""#
        } else {
            ""
        },
    );

    let search_form = format!(
        r#"<form method="get" action="/posts">
<input type="hidden" name="type" value="{active_type}">
<input type="text" name="search" value="{search}" placeholder="Search titles">
<button type="submit">Search</button>
</form>"#,
        search = escape_html(&listing.search),
    );

    let mut rows = String::new();
    for post in &listing.posts {
        rows.push_str(&format!(
            r#"<tr class="post-row"><td>{id}</td><td><a href="/posts/{id}">{title}</a></td><td>{author}</td><td>{views}</td><td>{created}</td></tr>
"#,
            id = post.id,
            title = escape_html(&post.title),
            author = escape_html(&post.author),
            views = post.views,
            created = escape_html(&post.created_at),
        ));
    }

    let body = format!(
        r#"<h1>{title}</h1>
{tabs}
{search_form}
<table>
<tr><th>ID</th><th>Title</th><th>Author</th><th>Views</th><th>Created</th></tr>
{rows}</table>
{pager}
<p><a href="/posts/new/create?type={active_type}">New post</a></p>"#,
        pager = list_pager(listing),
    );
    layout(title, Some(user), &body)
}

fn list_pager(listing: &PostListing) -> String {
    let link = |page: i64| {
        format!(
            "/posts?type={}&search={}&page={}",
            listing.post_type.as_str(),
            urlencoding::encode(&listing.search),
            page,
        )
    };
    let prev = if listing.page.has_prev() {
        format!(r#"<a href="{}">Prev</a> "#, link(listing.page.page - 1))
    } else {
        String::new()
    };
    let next = if listing.page.has_next() {
        format!(r#" <a href="{}">Next</a>"#, link(listing.page.page + 1))
    } else {
        String::new()
    };
    format!(
        r#"<div class="pager">{prev}<span class="pages">Page {} of {}</span>{next}</div>"#,
        listing.page.page, listing.page.total_pages,
    )
}

/// Post detail view.
pub fn post_detail_page(user: &AuthContext, post: &PostDetail) -> String {
    // Edit and delete are only offered to the author; the server
    // enforces ownership regardless.
    let controls = if post.user_id == user.user_id {
        format!(
            r#"<p><a href="/posts/edit/{id}">Edit</a></p>
<form class="inline" method="post" action="/posts/delete/{id}">
<button type="submit">Delete</button>
</form>"#,
            id = post.id,
        )
    } else {
        String::new()
    };

    let body = format!(
        r#"<h1>{title}</h1>
<p>By {author} | Views: {views} | {created}</p>
<pre class="content">{content}</pre>
{controls}
<p><a href="/posts?type={ptype}">Back to list</a></p>"#,
        title = escape_html(&post.title),
        author = escape_html(&post.author),
        views = post.views,
        created = escape_html(&post.created_at),
        content = escape_html(&post.content),
        ptype = post.post_type.as_str(),
    );
    layout(&post.title, Some(user), &body)
}

/// New post form; the target tab travels in a hidden field.
pub fn new_post_page(user: &AuthContext, target: PostType) -> String {
    let title = match target {
        PostType::Notice => "Write a notice",
        PostType::Free => "Write a post",
    };
    let body = format!(
        r#"<h1>{title}</h1>
<form method="post" action="/posts">
<input type="hidden" name="type" value="{ptype}">
<label>Title <input type="text" name="title"></label>
<label>Content <textarea name="content" rows="10"></textarea></label>
<button type="submit">Submit</button>
</form>
<p><a href="/posts?type={ptype}">Cancel</a></p>"#,
        ptype = target.as_str(),
    );
    layout(title, Some(user), &body)
}

/// Edit form for an existing post.
pub fn edit_post_page(user: &AuthContext, post: &Post) -> String {
    let body = format!(
        r#"<h1>Edit post</h1>
<form method="post" action="/posts/update/{id}">
<label>Title <input type="text" name="title" value="{title}"></label>
<label>Content <textarea name="content" rows="10">{content}</textarea></label>
<button type="submit">Save</button>
</form>
<p><a href="/posts/{id}">Cancel</a></p>"#,
        id = post.id,
        title = escape_html(&post.title),
        content = escape_html(&post.content),
    );
    layout("Edit post", Some(user), &body)
}
