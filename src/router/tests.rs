//! Tests for the trie-based router.

#[cfg(test)]
mod router_tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::parser::{HttpRequest, HttpVersion, Method};
    use crate::router::{
        Error, HandlerFn, Middleware, Router, default_handler, handler_fn, middleware_fn,
        not_found_handler,
    };
    use crate::server::{HttpResponse, StatusCode};

    fn request(method: Method, path: &str) -> HttpRequest {
        let mut headers = HashMap::new();
        headers.insert("Host".to_string(), "example.com".to_string());
        HttpRequest::new(method, path.to_string(), HttpVersion::Http11, headers)
    }

    fn respond_with(body: &'static str) -> HandlerFn {
        handler_fn(move |_req| async move {
            Ok(HttpResponse::new(StatusCode::Ok)
                .with_content_type("text/plain")
                .with_body_string(body))
        })
    }

    fn body_string(response: &HttpResponse) -> String {
        String::from_utf8(response.body.clone()).unwrap()
    }

    /// A middleware that records its pre/post steps into a shared log.
    fn recording_middleware(label: &'static str, log: Arc<Mutex<Vec<String>>>) -> Middleware {
        middleware_fn(move |inner| {
            let log = log.clone();
            handler_fn(move |req| {
                let inner = inner.clone();
                let log = log.clone();
                async move {
                    log.lock().unwrap().push(format!("{label}-pre"));
                    let response = inner(req).await;
                    log.lock().unwrap().push(format!("{label}-post"));
                    response
                }
            })
        })
    }

    /// A middleware that counts how many requests pass through it.
    fn counting_middleware(counter: Arc<AtomicUsize>) -> Middleware {
        middleware_fn(move |inner| {
            let counter = counter.clone();
            handler_fn(move |req| {
                let inner = inner.clone();
                counter.fetch_add(1, Ordering::SeqCst);
                inner(req)
            })
        })
    }

    #[tokio::test]
    async fn test_static_route_dispatch() {
        let router = Router::new();
        router.get("/users", respond_with("user list")).await.unwrap();

        let response = router.dispatch(request(Method::GET, "/users")).await.unwrap();
        assert_eq!(response.status, StatusCode::Ok);
        assert_eq!(body_string(&response), "user list");

        // Any other method at the same path is a 404, not a 405
        let response = router.dispatch(request(Method::POST, "/users")).await.unwrap();
        assert_eq!(response.status, StatusCode::NotFound);
    }

    #[tokio::test]
    async fn test_unmatched_path_is_not_found() {
        let router = Router::new();
        router.get("/users", respond_with("user list")).await.unwrap();

        let response = router.dispatch(request(Method::GET, "/orders")).await.unwrap();
        assert_eq!(response.status, StatusCode::NotFound);
    }

    #[tokio::test]
    async fn test_dynamic_route_delivers_params() {
        let router = Router::new();
        router
            .get(
                "/users/:id/posts/:post_id",
                handler_fn(|req| async move {
                    let id = req.get_path_param("id").cloned().unwrap_or_default();
                    let post_id = req.get_path_param("post_id").cloned().unwrap_or_default();
                    Ok(HttpResponse::new(StatusCode::Ok)
                        .with_body_string(format!("user={id} post={post_id}")))
                }),
            )
            .await
            .unwrap();

        let response = router
            .dispatch(request(Method::GET, "/users/7/posts/42"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::Ok);
        assert_eq!(body_string(&response), "user=7 post=42");
    }

    #[tokio::test]
    async fn test_static_route_wins_over_dynamic() {
        let router = Router::new();
        router
            .get(
                "/users/:id",
                handler_fn(|req| async move {
                    let id = req.get_path_param("id").cloned().unwrap_or_default();
                    Ok(HttpResponse::new(StatusCode::Ok).with_body_string(format!("by-id {id}")))
                }),
            )
            .await
            .unwrap();
        router.get("/users/me", respond_with("me")).await.unwrap();

        let response = router.dispatch(request(Method::GET, "/users/me")).await.unwrap();
        assert_eq!(body_string(&response), "me");

        let response = router.dispatch(request(Method::GET, "/users/42")).await.unwrap();
        assert_eq!(body_string(&response), "by-id 42");
    }

    #[tokio::test]
    async fn test_middleware_onion_ordering() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new();
        router
            .use_middleware(recording_middleware("A", log.clone()))
            .await;
        router
            .use_middleware(recording_middleware("B", log.clone()))
            .await;

        let inner_log = log.clone();
        router
            .get(
                "/onion",
                handler_fn(move |_req| {
                    let log = inner_log.clone();
                    async move {
                        log.lock().unwrap().push("inner".to_string());
                        Ok(HttpResponse::new(StatusCode::Ok))
                    }
                }),
            )
            .await
            .unwrap();

        let response = router.dispatch(request(Method::GET, "/onion")).await.unwrap();
        assert_eq!(response.status, StatusCode::Ok);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["A-pre", "B-pre", "inner", "B-post", "A-post"]
        );
    }

    #[tokio::test]
    async fn test_middleware_binds_at_registration_time() {
        let counter = Arc::new(AtomicUsize::new(0));
        let router = Router::new();

        router.get("/early", respond_with("early")).await.unwrap();
        router
            .use_middleware(counting_middleware(counter.clone()))
            .await;
        router.get("/late", respond_with("late")).await.unwrap();

        // The route registered before the middleware is not wrapped by it
        let response = router.dispatch(request(Method::GET, "/early")).await.unwrap();
        assert_eq!(response.status, StatusCode::Ok);
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        // The route registered after is
        let response = router.dispatch(request(Method::GET, "/late")).await.unwrap();
        assert_eq!(response.status, StatusCode::Ok);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_default_handler() {
        let response = default_handler()(request(Method::GET, "/")).await.unwrap();
        assert_eq!(response.status, StatusCode::Ok);
        assert_eq!(
            body_string(&response),
            "Welcome to the go-fly route! This is the default handler."
        );
    }

    #[tokio::test]
    async fn test_not_found_handler() {
        let response = not_found_handler()(request(Method::GET, "/")).await.unwrap();
        assert_eq!(response.status, StatusCode::NotFound);
    }

    #[tokio::test]
    async fn test_duplicate_registration_last_wins() {
        let router = Router::new();
        router.get("/dup", respond_with("first")).await.unwrap();
        router.get("/dup", respond_with("second")).await.unwrap();

        let response = router.dispatch(request(Method::GET, "/dup")).await.unwrap();
        assert_eq!(body_string(&response), "second");

        // Re-registering the winner changes nothing observable
        router.get("/dup", respond_with("second")).await.unwrap();
        let response = router.dispatch(request(Method::GET, "/dup")).await.unwrap();
        assert_eq!(response.status, StatusCode::Ok);
        assert_eq!(body_string(&response), "second");
        assert_eq!(router.routes().await.len(), 1);
    }

    #[tokio::test]
    async fn test_conflicting_param_names_rejected() {
        let router = Router::new();
        router.get("/users/:id", respond_with("by id")).await.unwrap();

        let result = router.get("/users/:name", respond_with("by name")).await;
        assert_eq!(
            result,
            Err(Error::ConflictingParamName {
                existing: "id".to_string(),
                requested: "name".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_query_string_is_ignored_for_matching() {
        let router = Router::new();
        router
            .get(
                "/search",
                handler_fn(|req| async move {
                    let q = req.get_query_param("q").cloned().unwrap_or_default();
                    Ok(HttpResponse::new(StatusCode::Ok).with_body_string(format!("q={q}")))
                }),
            )
            .await
            .unwrap();

        let response = router
            .dispatch(request(Method::GET, "/search?q=flyroute"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::Ok);
        assert_eq!(body_string(&response), "q=flyroute");
    }

    #[tokio::test]
    async fn test_trailing_slash_and_empty_segments_are_distinct() {
        let router = Router::new();
        router.get("/a/b", respond_with("plain")).await.unwrap();

        let response = router.dispatch(request(Method::GET, "/a/b/")).await.unwrap();
        assert_eq!(response.status, StatusCode::NotFound);
        let response = router.dispatch(request(Method::GET, "/a//b")).await.unwrap();
        assert_eq!(response.status, StatusCode::NotFound);

        router.get("/a/b/", respond_with("trailing")).await.unwrap();
        let response = router.dispatch(request(Method::GET, "/a/b/")).await.unwrap();
        assert_eq!(body_string(&response), "trailing");
    }

    #[tokio::test]
    async fn test_malformed_paths_are_normalized() {
        let router = Router::new();
        // Missing leading slash and empty path are normalized, not rejected
        router.get("users", respond_with("users")).await.unwrap();
        router.get("", default_handler()).await.unwrap();

        let response = router.dispatch(request(Method::GET, "/users")).await.unwrap();
        assert_eq!(body_string(&response), "users");

        let response = router.dispatch(request(Method::GET, "/")).await.unwrap();
        assert_eq!(response.status, StatusCode::Ok);
    }

    #[tokio::test]
    async fn test_method_sugar_registers_fixed_methods() {
        let router = Router::new();
        router.get("/r", respond_with("GET")).await.unwrap();
        router.post("/r", respond_with("POST")).await.unwrap();
        router.put("/r", respond_with("PUT")).await.unwrap();
        router.delete("/r", respond_with("DELETE")).await.unwrap();
        router.patch("/r", respond_with("PATCH")).await.unwrap();
        router.options("/r", respond_with("OPTIONS")).await.unwrap();
        router.head("/r", respond_with("HEAD")).await.unwrap();
        router.connect("/r", respond_with("CONNECT")).await.unwrap();
        router.trace("/r", respond_with("TRACE")).await.unwrap();

        let methods = [
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
            Method::HEAD,
            Method::CONNECT,
            Method::TRACE,
        ];
        for method in methods {
            let response = router.dispatch(request(method, "/r")).await.unwrap();
            assert_eq!(response.status, StatusCode::Ok);
            assert_eq!(body_string(&response), method.to_string());
        }
        assert_eq!(router.routes().await.len(), methods.len());
    }

    #[tokio::test]
    async fn test_registration_while_serving() {
        let router = Arc::new(Router::new());
        router.get("/stable", respond_with("stable")).await.unwrap();

        let reader = {
            let router = router.clone();
            tokio::spawn(async move {
                for _ in 0..100 {
                    let response = router
                        .dispatch(request(Method::GET, "/stable"))
                        .await
                        .unwrap();
                    assert_eq!(response.status, StatusCode::Ok);
                }
            })
        };
        let writer = {
            let router = router.clone();
            tokio::spawn(async move {
                for i in 0..100 {
                    let path = format!("/generated/{i}");
                    router.get(&path, respond_with("generated")).await.unwrap();
                }
            })
        };

        reader.await.unwrap();
        writer.await.unwrap();

        let response = router
            .dispatch(request(Method::GET, "/generated/99"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::Ok);
    }

    #[tokio::test]
    async fn test_routes_listing() {
        let router = Router::new();
        router.get("/users", respond_with("list")).await.unwrap();
        router.post("/users", respond_with("create")).await.unwrap();
        router.get("/users/:id", respond_with("show")).await.unwrap();

        let routes = router.routes().await;
        assert_eq!(
            routes,
            vec![
                (Method::GET, "/users".to_string()),
                (Method::POST, "/users".to_string()),
                (Method::GET, "/users/:id".to_string()),
            ]
        );
    }
}
