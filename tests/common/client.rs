//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

/// HTTP test client with cookie-based session management
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    /// Creates a new unauthenticated client
    ///
    /// Use this for testing authentication flows and the public feed.
    /// For admin tests, use `authenticated()` instead.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .cookie_store(true) // Automatically handle session cookies
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// Creates a client pre-authenticated as the admin
    ///
    /// # Panics
    ///
    /// Panics if authentication fails (indicates test infrastructure problem).
    pub async fn authenticated(base_url: String) -> Self {
        let client = Self::new(base_url);

        let response = client.login(ADMIN_EMAIL, ADMIN_PASS).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::CREATED,
            "Admin authentication failed: {:?}",
            response.text().await
        );

        client
    }

    // ========================================================================
    // Authentication Endpoints
    // ========================================================================

    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.client
            .post(format!("{}/auth/login", self.base_url))
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Login request failed")
    }

    /// GET /auth/logout
    pub async fn logout(&self) -> Response {
        self.client
            .get(format!("{}/auth/logout", self.base_url))
            .send()
            .await
            .expect("Logout request failed")
    }

    // ========================================================================
    // Public Endpoints
    // ========================================================================

    /// GET /tracks
    pub async fn get_public_tracks(&self) -> Response {
        self.client
            .get(format!("{}/tracks", self.base_url))
            .send()
            .await
            .expect("Public tracks request failed")
    }

    // ========================================================================
    // Admin Endpoints
    // ========================================================================

    /// GET /admin/tracks
    pub async fn get_admin_tracks(&self) -> Response {
        self.client
            .get(format!("{}/admin/tracks", self.base_url))
            .send()
            .await
            .expect("Admin tracks request failed")
    }

    /// POST /admin/tracks
    pub async fn create_track(&self, body: &Value) -> Response {
        self.client
            .post(format!("{}/admin/tracks", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Create track request failed")
    }

    /// PUT /admin/tracks
    pub async fn update_track(&self, body: &Value) -> Response {
        self.client
            .put(format!("{}/admin/tracks", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Update track request failed")
    }

    /// DELETE /admin/tracks?id=...
    pub async fn delete_track(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/admin/tracks?id={}", self.base_url, id))
            .send()
            .await
            .expect("Delete track request failed")
    }

    /// DELETE /admin/tracks without an id parameter
    pub async fn delete_track_without_id(&self) -> Response {
        self.client
            .delete(format!("{}/admin/tracks", self.base_url))
            .send()
            .await
            .expect("Delete track request failed")
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Creates a track with all required fields and returns its id
    ///
    /// # Panics
    ///
    /// Panics if creation does not succeed.
    pub async fn create_valid_track(&self, title: &str) -> String {
        let response = self
            .create_track(&json!({
                "title": title,
                "artist": "Test Artist",
                "source_url": VALID_SOURCE_URL,
                "genre": "Electronic",
                "release_date": "2024-03-01",
            }))
            .await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "Track creation failed"
        );
        let body: Value = response.json().await.expect("Invalid creation response");
        body["id"]
            .as_str()
            .expect("Creation response has no id")
            .to_string()
    }
}
