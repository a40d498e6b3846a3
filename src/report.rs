//! Format the match list and the per-check result tables.

use crate::{images::ImageDescriptor, verify::CheckOutcome};
use std::collections::BTreeMap;
use yansi::Paint;

/// Filename → outcome for one check mechanism.
pub type Results = BTreeMap<String, CheckOutcome>;

pub const SHA256_FIELD: &str = "SHA256 CHECKSUM";

pub const MEDIA_FIELD: &str = "MEDIA CHECKSUM";

/// `true` iff every recorded outcome passed or was skipped.
///
/// `ERROR` outcomes fail the run alongside `FAILED`.
pub fn all_good(results: &Results) -> bool {
    results.values().all(|outcome| !outcome.is_failure())
}

/// Prints the list of images matching the selection criteria.
pub fn print_matches(images: &[ImageDescriptor]) {
    match images.len() {
        0 => pintln!("No image file matching the criteria found."),
        1 => pintln!("One image file matching the criteria found:"),
        count => pintln!((count) " image files matching the criteria found:"),
    }

    for image in images {
        pintln!("    " (image.url));
    }

    pintln!();
}

/// Prints one check's results, grouped under a section header.
pub fn print_results(field: &str, results: &Results) {
    pintln!("================ " (field) " RESULTS ============================");

    for (filename, outcome) in results {
        match outcome {
            CheckOutcome::Error(diagnostic) => {
                pintln!((filename) ": " (color_outcome(outcome)) " (" (diagnostic) ")");
            }
            outcome => pintln!((filename) ": " (color_outcome(outcome))),
        }
    }

    pintln!();
}

fn color_outcome(outcome: &CheckOutcome) -> Paint<&'static str> {
    let label = outcome.as_str();

    if !atty::is(atty::Stream::Stdout) {
        return Paint::new(label);
    }

    match outcome {
        CheckOutcome::Passed => Paint::green(label).bold(),
        CheckOutcome::Failed => Paint::red(label).bold(),
        CheckOutcome::Skipped => Paint::yellow(label).bold(),
        CheckOutcome::Error(_) => Paint::red(label).bold().dimmed(),
    }
}
