//! # Resolver Configuration Module
//!
//! Configuration for the best-effort image resolver: fetch timeouts,
//! retry policy and size limits. None of this affects aggregation
//! correctness; the resolver degrades to "no image" on any failure.

// Constants for image resolution
pub const TARGET_WIDTH: u32 = 350;
pub const TARGET_HEIGHT: u32 = 250;
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024; // 10MB limit for fetched photos

/// Retry policy for the photo fetch
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub base_retry_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_retry_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_retry_delay_ms: 500,
            max_retry_delay_ms: 5000, // 5 seconds
        }
    }
}

/// Configuration structure for image resolution
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Per-request timeout in seconds
    pub fetch_timeout_secs: u64,
    /// Maximum accepted response size in bytes
    pub max_image_bytes: u64,
    /// Output width after resizing
    pub target_width: u32,
    /// Output height after resizing
    pub target_height: u32,
    /// Retry and backoff settings
    pub retry: RetryConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 10,
            max_image_bytes: MAX_IMAGE_BYTES,
            target_width: TARGET_WIDTH,
            target_height: TARGET_HEIGHT,
            retry: RetryConfig::default(),
        }
    }
}
