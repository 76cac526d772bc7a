//! # Image Resolver Module
//!
//! Best-effort resolution of a recipe's photo reference into a decoded,
//! resized image. References may be absent, local paths, direct URLs or
//! album-page URLs that need scraping for the real image URL.
//!
//! Every failure path returns `None` with a warning log; nothing in here
//! can fail the aggregation results, which are independent of image
//! availability.

use image::DynamicImage;
use lazy_static::lazy_static;
use log::{debug, info, warn};
use rand::Rng;
use regex::Regex;
use std::time::Duration;

use crate::resolver_config::ResolverConfig;

lazy_static! {
    /// og:image meta tag on album pages
    static ref OG_IMAGE_RE: Regex =
        Regex::new(r#"<meta property="og:image" content="([^"]+)""#)
            .expect("og:image pattern should be valid");
    /// Fallback: link rel="image_src"
    static ref IMAGE_SRC_RE: Regex =
        Regex::new(r#"<link rel="image_src" href="([^"]+)""#)
            .expect("image_src pattern should be valid");
}

/// Resolve a recipe's image reference to a resized image, if possible.
///
/// Local paths are opened directly; http(s) URLs are fetched with retry,
/// going through the album-page scrape first when the URL looks like a
/// gallery link.
pub async fn resolve_recipe_image(
    reference: &str,
    config: &ResolverConfig,
) -> Option<DynamicImage> {
    if !reference.starts_with("http") {
        return match image::open(reference) {
            Ok(img) => Some(resize(img, config)),
            Err(e) => {
                warn!("Failed to open local image '{}': {}", reference, e);
                None
            }
        };
    }

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!("Failed to build HTTP client: {}", e);
            return None;
        }
    };

    let display_url = if is_album_url(reference) {
        match scrape_direct_url(&client, reference).await {
            Some(url) => {
                debug!("Album page resolved to direct image URL: {}", url);
                url
            }
            None => reference.to_string(),
        }
    } else {
        reference.to_string()
    };

    let bytes = fetch_with_retry(&client, &display_url, config).await?;
    if bytes.len() as u64 > config.max_image_bytes {
        warn!(
            "Image at '{}' exceeds size limit ({} bytes)",
            display_url,
            bytes.len()
        );
        return None;
    }

    match image::load_from_memory(&bytes) {
        Ok(img) => {
            info!("Resolved recipe image from '{}'", display_url);
            Some(resize(img, config))
        }
        Err(e) => {
            warn!("Failed to decode image from '{}': {}", display_url, e);
            None
        }
    }
}

/// Album/gallery pages need a scrape for the direct image URL
fn is_album_url(url: &str) -> bool {
    url.contains("/a/") || url.contains("/gallery/")
}

/// Fetch an album page and extract the direct image URL from its markup
async fn scrape_direct_url(client: &reqwest::Client, url: &str) -> Option<String> {
    let html = match client.get(url).send().await {
        Ok(resp) => match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read album page '{}': {}", url, e);
                return None;
            }
        },
        Err(e) => {
            warn!("Failed to fetch album page '{}': {}", url, e);
            return None;
        }
    };

    OG_IMAGE_RE
        .captures(&html)
        .or_else(|| IMAGE_SRC_RE.captures(&html))
        .map(|caps| caps[1].to_string())
}

/// Fetch the image bytes, retrying with exponential backoff and jitter
async fn fetch_with_retry(
    client: &reqwest::Client,
    url: &str,
    config: &ResolverConfig,
) -> Option<Vec<u8>> {
    for attempt in 0..=config.retry.max_retries {
        match client.get(url).send().await {
            Ok(resp) => match resp.bytes().await {
                Ok(bytes) => return Some(bytes.to_vec()),
                Err(e) => warn!(
                    "Failed to read image bytes from '{}' (attempt {}): {}",
                    url,
                    attempt + 1,
                    e
                ),
            },
            Err(e) => warn!(
                "Failed to fetch image from '{}' (attempt {}): {}",
                url,
                attempt + 1,
                e
            ),
        }

        if attempt < config.retry.max_retries {
            let backoff = config.retry.base_retry_delay_ms.saturating_mul(1 << attempt);
            let capped = backoff.min(config.retry.max_retry_delay_ms);
            let jitter = rand::thread_rng().gen_range(0..=capped / 4);
            tokio::time::sleep(Duration::from_millis(capped + jitter)).await;
        }
    }
    None
}

fn resize(img: DynamicImage, config: &ResolverConfig) -> DynamicImage {
    img.resize_exact(
        config.target_width,
        config.target_height,
        image::imageops::FilterType::Triangle,
    )
}
