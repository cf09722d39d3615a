//! A login flow built on cookies: a POST form sets a session cookie, a
//! before-request hook guards the profile page, logout clears the session.

use maya::cookies::{Cookie, SameSite};
use maya::{ServerConfig, WebServer, redirect, render_from_string};
use uuid::Uuid;

const LOGIN_PAGE: &str = r#"<form method="post" action="/login">
  <input name="user" placeholder="user name">
  <button type="submit">Sign in</button>
</form>"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let app = WebServer::new(ServerConfig::default());

    // The profile page requires a session cookie
    app.before_request(|req| async move {
        if req.path.starts_with("/profile") && !req.has_cookie("session") {
            return Some(redirect("/"));
        }
        None
    })
    .await;

    app.add_route("/", |_req, _params| async {
        Ok(render_from_string(LOGIN_PAGE))
    })
    .await?;

    // The form post issues a fresh session cookie
    app.add_route("/login", |req, _params| async move {
        let user = req
            .form_params()
            .ok()
            .and_then(|form| form.get("user").cloned())
            .unwrap_or_else(|| "anonymous".to_string());

        let session = Cookie::new("session", Uuid::new_v4().to_string())
            .with_path("/")
            .with_http_only()
            .with_same_site(SameSite::Lax);

        Ok(redirect("/profile")
            .with_cookie(&session)
            .with_cookie(&Cookie::new("user", user)))
    })
    .await?;

    app.add_route("/profile", |req, _params| async move {
        let user = req.cookie("user").cloned().unwrap_or_else(|| "stranger".to_string());
        Ok(render_from_string(format!(
            "<h1>Welcome, {user}</h1><a href=\"/logout\">Log out</a>"
        )))
    })
    .await?;

    // Logout expires both cookies
    app.add_route("/logout", |_req, _params| async {
        Ok(redirect("/")
            .with_cookie(&Cookie::new("session", "").with_path("/").with_max_age(0))
            .with_cookie(&Cookie::new("user", "").with_max_age(0)))
    })
    .await?;

    app.run().await?;

    Ok(())
}
