//! An HTTP server example demonstrating the flyroute router API.

use flyroute::{
    HttpResponse, HttpServer, ServerConfig, StatusCode, default_handler, handler_fn,
};
use serde::Serialize;

#[derive(Serialize)]
struct User {
    id: String,
    name: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger so server banner and route registrations are visible
    env_logger::init();

    // Create a server configuration
    let config = ServerConfig {
        addr: "127.0.0.1:8080".parse()?,
        max_connections: 1024,
        read_buffer_size: 8192,
    };

    // Create a new HTTP server
    let server = HttpServer::new(config);
    let router = server.router();

    // The stock welcome handler at the root
    router.get("/", default_handler()).await?;

    // A simple static route
    router.get("/health", handler_fn(|_req| async {
        Ok(HttpResponse::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body_string("ok"))
    })).await?;

    // A dynamic route; the captured segment arrives as a path parameter
    router.get("/users/:id", handler_fn(|req| async move {
        let id = req.get_path_param("id").cloned().unwrap_or_default();
        let user = User {
            id,
            name: "Jane Doe".to_string(),
        };
        HttpResponse::new(StatusCode::Ok).with_json(&user)
    })).await?;

    // A static route at the same level as the dynamic one; static wins
    router.get("/users/me", handler_fn(|_req| async {
        Ok(HttpResponse::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body_string("it's you"))
    })).await?;

    // Start the server
    server.start().await?;

    Ok(())
}
