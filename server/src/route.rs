mod auth;
mod catalog;
mod customer;
mod rental;
mod report;

use axum::Router;

use crate::handler::AppModule;

pub use self::{auth::*, catalog::*, customer::*, rental::*, report::*};

pub fn router(app: AppModule) -> Router {
    Router::new()
        .route_catalog()
        .route_customer()
        .route_rental()
        .route_report()
        .route_auth()
        .with_state(app)
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use driver::database::{DefaultAccounts, SqliteDatabase};
    use driver::hash::Argon2Hasher;

    use crate::handler::AppModule;

    async fn app() -> Router {
        let database = SqliteDatabase::in_memory().await.expect("database opens");
        database
            .seed_sample_data()
            .await
            .expect("sample data loads");
        database
            .seed_accounts(&DefaultAccounts::new("admin1234", "user1234"), &Argon2Hasher)
            .await
            .expect("accounts are created");
        super::router(AppModule::with_database(database))
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request is well formed")
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body is readable")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body is json")
        };
        (status, body)
    }

    async fn login(app: &Router, username: &str, password: &str) -> String {
        let (status, body) = send(
            app,
            request(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "username": username, "password": password })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().expect("token is a string").to_string()
    }

    #[tokio::test]
    async fn catalog_is_public() {
        let app = app().await;
        let (status, body) = send(&app, request(Method::GET, "/movies?sort=title", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.as_array().expect("movie list").is_empty());

        let (status, body) = send(&app, request(Method::GET, "/movies/999", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn rentals_need_a_bearer_token() {
        let app = app().await;
        let rental = json!({ "movie_id": 1, "customer_id": 1 });
        let (status, body) = send(&app, request(Method::POST, "/rentals", None, Some(rental.clone()))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "authentication");

        let bogus = "00000000-0000-0000-0000-000000000000";
        let (status, _) = send(&app, request(Method::POST, "/rentals", Some(bogus), Some(rental))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn clerk_rents_the_last_copy_and_returns_it() {
        let app = app().await;
        let token = login(&app, "user", "user1234").await;
        let rental = json!({ "movie_id": 1, "customer_id": 2 });

        let (status, created) =
            send(&app, request(Method::POST, "/rentals", Some(&token), Some(rental.clone()))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "OPEN");

        let (status, body) =
            send(&app, request(Method::POST, "/rentals", Some(&token), Some(rental))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "no_available_copy");

        let uri = format!("/rentals/{}/return", created["id"]);
        let (status, returned) = send(&app, request(Method::POST, &uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(returned["status"], "RETURNED");

        let (status, _) = send(&app, request(Method::POST, &uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn catalog_edits_are_for_admins() {
        let app = app().await;
        let category = json!({ "name": "Noir" });

        let user = login(&app, "user", "user1234").await;
        let (status, _) = send(
            &app,
            request(Method::POST, "/categories", Some(&user), Some(category.clone())),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let admin = login(&app, "admin", "admin1234").await;
        let (status, body) = send(
            &app,
            request(Method::POST, "/categories", Some(&admin), Some(category)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["id"].is_i64());
    }

    #[tokio::test]
    async fn logout_ends_the_session() {
        let app = app().await;
        let token = login(&app, "user", "user1234").await;

        let (status, _) = send(&app, request(Method::POST, "/auth/logout", Some(&token), None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, request(Method::GET, "/rentals", Some(&token), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
