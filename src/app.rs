//! The sequential fetch-then-verify pipeline.

use crate::{
    compose_api::{self, Compose, LookupError},
    fetch,
    images::{self, SelectionCriteria},
    report::{self, Results, MEDIA_FIELD, SHA256_FIELD},
    verify::{CheckOutcome, Verifier},
};
use std::{io, path::PathBuf};
use thiserror::Error;

/// Everything the command line resolves to.
#[derive(Clone, Debug)]
pub struct Options {
    pub release: String,
    pub compose: Option<String>,
    pub arch: String,
    pub variant: String,
    pub subvariant: Option<String>,
    pub image_type: Option<String>,
    /// Target directory for downloads, verification and purging.
    pub directory: PathBuf,
    pub purge: bool,
    pub force_download: bool,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create the target directory {path:?}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to locate the requested compose")]
    Lookup(#[from] LookupError),
}

/// Runs the whole pipeline.
///
/// `Ok(true)` means every recorded check passed or was skipped; fatal
/// lookup errors abort before any descriptor is processed.
pub async fn run(options: &Options) -> Result<bool, Error> {
    let compose_id = compose_api::resolve_compose(&options.release, options.compose.as_deref())?;
    let compose = Compose::fetch(&options.release, &compose_id).await?;

    info!("found compose {}", compose.id);

    let criteria = SelectionCriteria {
        arch: options.arch.clone(),
        variant: options.variant.clone(),
        subvariant: options.subvariant.clone(),
        image_type: options.image_type.clone(),
    };

    let matches = images::filter_images(&compose.images, &criteria);

    report::print_matches(&matches);

    if matches.is_empty() {
        return Ok(true);
    }

    std::fs::create_dir_all(&options.directory)
        .map_err(|source| Error::Directory { path: options.directory.clone(), source })?;

    let verifier = Verifier::default();

    let mut sha256_results = Results::new();
    let mut media_results = Results::new();

    for image in &matches {
        let filename = image.filename().to_owned();

        let path = match fetch::fetch_image(image, &options.directory, options.force_download)
            .await
        {
            Ok(path) => path,
            Err(why) => {
                // A failed transfer faults this descriptor only.
                let diagnostic = crate::misc::format_error(&why);
                error!("{}", diagnostic);

                sha256_results.insert(filename.clone(), CheckOutcome::Error(diagnostic.clone()));
                media_results.insert(filename, CheckOutcome::Error(diagnostic));
                continue;
            }
        };

        sha256_results
            .insert(filename.clone(), verifier.check_sha256(&path, &image.sha256).await);
        media_results.insert(filename, verifier.check_media(&path).await);
    }

    report::print_results(SHA256_FIELD, &sha256_results);
    report::print_results(MEDIA_FIELD, &media_results);

    if options.purge {
        fetch::purge_images(&matches, &options.directory);
    }

    Ok(report::all_good(&sha256_results) && report::all_good(&media_results))
}
