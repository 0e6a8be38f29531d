#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use oc_lettings::lettings::{Letting, NewAddress, NewLetting, SqliteLettingRepository};
use oc_lettings::profiles::{NewProfile, NewUser, Profile, SqliteProfileRepository, User};
use oc_lettings::storage::Database;
use oc_lettings::{site_router, SiteState};
use tower::ServiceExt;

pub struct TestSite {
    pub database: Database,
    pub lettings: SqliteLettingRepository,
    pub profiles: SqliteProfileRepository,
}

impl TestSite {
    pub async fn new() -> Self {
        let database = Database::in_memory().await.expect("in-memory database");
        let lettings = SqliteLettingRepository::new(&database);
        let profiles = SqliteProfileRepository::new(&database);
        Self {
            database,
            lettings,
            profiles,
        }
    }

    pub fn router(&self) -> Router {
        site_router(SiteState::from_database(&self.database))
    }

    pub async fn letting(&self, title: &str, number: u32, street: &str) -> Letting {
        let address = self
            .lettings
            .insert_address(address(number, street))
            .await
            .expect("address inserts");
        self.lettings
            .insert_letting(NewLetting {
                title: title.to_string(),
                address_id: address.id,
            })
            .await
            .expect("letting inserts")
    }

    pub async fn user(&self, username: &str) -> User {
        self.profiles
            .insert_user(NewUser {
                username: username.to_string(),
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                email: format!("{username}@example.com"),
            })
            .await
            .expect("user inserts")
    }

    pub async fn profile(&self, username: &str, favorite_city: &str) -> Profile {
        let user = self.user(username).await;
        self.profiles
            .insert_profile(NewProfile {
                user_id: user.id,
                favorite_city: favorite_city.to_string(),
            })
            .await
            .expect("profile inserts")
    }
}

pub fn address(number: u32, street: &str) -> NewAddress {
    NewAddress {
        number,
        street: street.to_string(),
        city: "Test City".to_string(),
        state: "TS".to_string(),
        zip_code: 12345,
        country_iso_code: "TST".to_string(),
    }
}

pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

pub async fn get(router: Router, path: &str) -> Page {
    send(router, Method::GET, path).await
}

pub async fn send(router: Router, method: Method, path: &str) -> Page {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header(header::USER_AGENT, "integration-test")
        .body(Body::empty())
        .expect("request builds");
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    Page {
        status,
        location,
        body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
    }
}
