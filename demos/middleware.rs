//! Middleware example: request logging and a bearer-token check composed
//! onto routes at registration time.

use flyroute::{
    HttpResponse, HttpServer, ServerConfig, StatusCode, handler_fn, middleware_fn,
};
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let server = HttpServer::new(ServerConfig::default());
    let router = server.router();

    // Routes registered before any middleware stay unwrapped
    router.get("/open", handler_fn(|_req| async {
        Ok(HttpResponse::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body_string("no middleware here"))
    })).await?;

    // Logging middleware: registered first, so it runs outermost
    router.use_middleware(middleware_fn(|inner| {
        handler_fn(move |req| {
            let inner = inner.clone();
            async move {
                let method = req.method;
                let path = req.path.clone();
                let response = inner(req).await;
                if let Ok(ref resp) = response {
                    info!("{method} {path} -> {status}", status = resp.status as u16);
                }
                response
            }
        })
    })).await;

    // Token-check middleware: runs inside the logger, short-circuits with
    // 401 when the Authorization header is missing
    router.use_middleware(middleware_fn(|inner| {
        handler_fn(move |req| {
            let inner = inner.clone();
            async move {
                if !req.has_header("Authorization") {
                    return Ok(HttpResponse::new(StatusCode::Unauthorized)
                        .with_content_type("text/plain")
                        .with_body_string("missing Authorization header"));
                }
                inner(req).await
            }
        })
    })).await;

    // Registered after both middleware, so both wrap it
    router.get("/private", handler_fn(|_req| async {
        Ok(HttpResponse::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body_string("secret stuff"))
    })).await?;

    server.start().await?;

    Ok(())
}
