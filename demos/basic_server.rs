//! A basic server example demonstrating routing, query parameters and
//! dynamic path segments.

use log::info;
use maya::{ServerConfig, StatusCode, WebServer, render_from_string, render_json};
use serde::Serialize;

#[derive(Serialize)]
struct User {
    id: i64,
    name: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger
    env_logger::init();

    // Create a server configuration with default values
    let config = ServerConfig {
        addr: "127.0.0.1:8081".parse()?,
        max_connections: 100,
        read_buffer_size: 4096,
        ..ServerConfig::default()
    };

    // Create a new web server
    let app = WebServer::new(config);

    // Add a simple route
    app.add_route("/", |_req, _params| async {
        Ok(render_from_string("<h1>Hello, World!</h1>"))
    })
    .await?;

    // Add a route that handles query parameters
    app.add_route("/hello", |req, _params| async move {
        let name = req.get_query_param("name").map_or("World", |s| s.as_str()).to_string();
        Ok(render_from_string(format!("<p>Hello, {name}!</p>")))
    })
    .await?;

    // Add a route with a typed dynamic segment
    app.add_route("/users/<int:id>", |_req, params| async move {
        let user = User {
            id: params.get_int("id").unwrap_or_default(),
            name: "Maya".to_string(),
        };
        Ok(render_json(&user)?)
    })
    .await?;

    // Replace the default 404 page
    app.add_status_handler(StatusCode::NotFound, |status| {
        render_from_string("<h1>There is nothing here</h1>").with_status(status)
    })
    .await;

    info!("Try:");
    info!("  curl http://127.0.0.1:8081/");
    info!("  curl http://127.0.0.1:8081/hello?name=Rust");
    info!("  curl http://127.0.0.1:8081/users/42");

    // Start the server
    app.run().await?;

    Ok(())
}
