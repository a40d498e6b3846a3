//! Locate a compose on the Fedora compose mirror and flatten its metadata.

use crate::images::ImageDescriptor;
use chrono::Utc;
use isahc::{http::StatusCode, AsyncReadResponseExt};
use serde_derive::Deserialize;
use std::{collections::BTreeMap, io};
use thiserror::Error;

/// Base of the compose tree that nightly composes are published to.
pub const COMPOSE_BASE: &str = "https://kojipkgs.fedoraproject.org/compose";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("failed to fetch compose metadata due to client error: {0}")]
    Client(StatusCode),

    #[error(
        "a compose identifier is required: only {} defaults to today's nightly",
        crate::DEFAULT_RELEASE
    )]
    ComposeRequired,

    #[error("failed to fetch compose metadata from {url}")]
    Get {
        url: String,
        #[source]
        source: isahc::Error,
    },

    #[error("failed to construct the HTTP client")]
    HttpClient(#[source] isahc::Error),

    #[error("failed to parse compose metadata")]
    Json(#[source] serde_json::Error),

    #[error("failed to fetch compose metadata due to server error: {0}")]
    Server(StatusCode),

    #[error("failed to read compose metadata from the response")]
    TextFetch(#[source] io::Error),
}

/// A located compose and every image it publishes.
#[derive(Debug)]
pub struct Compose {
    pub id: String,
    pub images: Vec<ImageDescriptor>,
}

impl Compose {
    /// Fetches and flattens the image metadata for `release` + `compose`.
    pub async fn fetch(release: &str, compose: &str) -> Result<Self, LookupError> {
        let location = compose_location(release, compose);
        let url = fomat!((location) "/metadata/images.json");

        info!("fetching compose metadata from '{}'", url);

        let client = crate::misc::http_client().map_err(LookupError::HttpClient)?;

        let mut resp = client
            .get_async(&*url)
            .await
            .map_err(|source| LookupError::Get { url: url.clone(), source })?;

        let status = resp.status();

        if status.is_client_error() {
            return Err(LookupError::Client(status));
        } else if status.is_server_error() {
            return Err(LookupError::Server(status));
        }

        let text = resp.text().await.map_err(LookupError::TextFetch)?;

        let raw = serde_json::from_str::<RawMetadata>(&text).map_err(LookupError::Json)?;

        Ok(Self::flatten(&location, raw))
    }

    fn flatten(location: &str, raw: RawMetadata) -> Self {
        let mut images = Vec::new();

        for (variant, arches) in raw.payload.images {
            for records in arches.into_values() {
                for record in records {
                    images.push(ImageDescriptor {
                        url: fomat!((location) "/" (record.path)),
                        arch: record.arch,
                        variant: variant.clone(),
                        subvariant: record.subvariant,
                        image_type: record.image_type,
                        sha256: record.checksums.sha256,
                    });
                }
            }
        }

        Compose { id: raw.payload.compose.id, images }
    }
}

/// The compose tree location for a release + compose identifier.
pub fn compose_location(release: &str, compose: &str) -> String {
    let tree =
        if release.eq_ignore_ascii_case(crate::DEFAULT_RELEASE) { "rawhide" } else { "branched" };

    fomat!((COMPOSE_BASE) "/" (tree) "/Fedora-" (release) "-" (compose) ".n.0/compose")
}

/// Resolves the compose identifier to look up.
///
/// The rolling release defaults to today's UTC date in `YYYYMMDD` form;
/// every other release requires an explicit identifier.
pub fn resolve_compose(release: &str, compose: Option<&str>) -> Result<String, LookupError> {
    if let Some(compose) = compose {
        return Ok(compose.to_owned());
    }

    if release.eq_ignore_ascii_case(crate::DEFAULT_RELEASE) {
        let today = today_compose();
        info!("the compose date was not given: trying with today's value {}", today);
        return Ok(today);
    }

    Err(LookupError::ComposeRequired)
}

fn today_compose() -> String { Utc::now().format("%Y%m%d").to_string() }

#[derive(Deserialize)]
struct RawMetadata {
    payload: RawPayload,
}

#[derive(Deserialize)]
struct RawPayload {
    compose: RawComposeInfo,
    images: BTreeMap<String, BTreeMap<String, Vec<RawImage>>>,
}

#[derive(Deserialize)]
struct RawComposeInfo {
    id: String,
}

#[derive(Deserialize)]
struct RawImage {
    arch: String,
    path: String,
    #[serde(default)]
    subvariant: Option<String>,
    #[serde(default, rename = "type")]
    image_type: Option<String>,
    checksums: RawChecksums,
}

#[derive(Deserialize)]
struct RawChecksums {
    sha256: String,
}
