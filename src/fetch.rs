//! Download images into the target directory, and purge them after a run.

use crate::images::ImageDescriptor;
use futures_util::AsyncReadExt;
use isahc::http::StatusCode;
use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to move the completed download into place at {path:?}")]
    Commit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create {path:?}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to GET {url}")]
    Get {
        url: String,
        #[source]
        source: isahc::Error,
    },

    #[error("failed to construct the HTTP client")]
    HttpClient(#[source] isahc::Error),

    #[error("request for {url} failed with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to stream {url} to {path:?}")]
    Write {
        url: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Ensures the descriptor's image exists in `dir`, downloading it if absent.
///
/// A file already named like the image suppresses the transfer unless
/// `force` is set. Downloads stream to a `.partial` file which is renamed
/// into place only after a complete, flushed write, so an interrupted
/// transfer is never mistaken for a cached image on a later run.
pub async fn fetch_image(
    image: &ImageDescriptor,
    dir: &Path,
    force: bool,
) -> Result<PathBuf, FetchError> {
    let target = dir.join(image.filename());

    if target.exists() && !force {
        info!("{} is already downloaded: skipping the transfer", image.filename());
        return Ok(target);
    }

    let partial = dir.join(fomat!((image.filename()) ".partial"));

    info!("downloading {}", image.url);

    if let Err(why) = download(&image.url, &partial).await {
        let _ = std::fs::remove_file(&partial);
        return Err(why);
    }

    tokio::fs::rename(&partial, &target)
        .await
        .map_err(|source| FetchError::Commit { path: target.clone(), source })?;

    Ok(target)
}

async fn download(url: &str, partial: &Path) -> Result<(), FetchError> {
    let client = crate::misc::http_client().map_err(FetchError::HttpClient)?;

    let resp = client
        .get_async(url)
        .await
        .map_err(|source| FetchError::Get { url: url.to_owned(), source })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status { url: url.to_owned(), status });
    }

    let mut file = tokio::fs::File::create(partial)
        .await
        .map_err(|source| FetchError::Create { path: partial.to_owned(), source })?;

    let mut body = resp.into_body();
    let mut buffer = vec![0u8; 8 * 1024];

    loop {
        let read = body.read(&mut buffer).await.map_err(|source| FetchError::Write {
            url: url.to_owned(),
            path: partial.to_owned(),
            source,
        })?;

        if read == 0 {
            break;
        }

        file.write_all(&buffer[..read]).await.map_err(|source| FetchError::Write {
            url: url.to_owned(),
            path: partial.to_owned(),
            source,
        })?;
    }

    file.flush().await.map_err(|source| FetchError::Write {
        url: url.to_owned(),
        path: partial.to_owned(),
        source,
    })?;

    Ok(())
}

/// Deletes every local file corresponding to the given descriptors.
///
/// Purging is an explicit opt-in and runs regardless of verification
/// outcome; files that were never fetched are only warned about.
pub fn purge_images(images: &[ImageDescriptor], dir: &Path) {
    for image in images {
        let target = dir.join(image.filename());

        info!("deleting {:?}", target);

        if let Err(why) = std::fs::remove_file(&target) {
            warn!("failed to delete {:?}: {}", target, why);
        }
    }
}
