//! Shared constants for end-to-end tests
//!
//! When test credentials or fixture data change, update only this file.

// ============================================================================
// Admin Credentials
// ============================================================================

/// Email of the single admin account the test server is configured with
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Admin password, hashed at server spawn time
pub const ADMIN_PASS: &str = "adminpass123";

// ============================================================================
// Fixture Track Data
// ============================================================================

/// A watch-style YouTube link that resolves to an 11-char video id
pub const VALID_SOURCE_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

/// A short-form YouTube link
pub const VALID_SHORT_SOURCE_URL: &str = "https://youtu.be/jNQXAC9IVRw";

/// A link no video id can be derived from
pub const INVALID_SOURCE_URL: &str = "https://example.com/not-a-video";

/// A tiny valid PNG as an inline data URL
pub const TINY_PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for the test server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Poll interval while waiting for readiness
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 25;

/// Timeout for individual test requests
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
