#![deny(clippy::all)]

#[macro_use]
extern crate cascade;

#[macro_use]
extern crate fomat_macros;

#[macro_use]
extern crate log;

/// The fetch-then-verify pipeline driven by the CLI
pub mod app;

/// Locate a compose and flatten its published image metadata
pub mod compose_api;

/// Run external tools with captured output and a bounded timeout
pub mod external;

/// Download images into the target directory, and purge them after a run
pub mod fetch;

/// Image descriptors, and the selection criteria used to filter them
pub mod images;

/// Miscellaneous helpers used throughout the library.
pub mod misc;

/// Format the per-check result tables
pub mod report;

/// SHA256 and embedded-checksum verification of local image files
pub mod verify;

pub const DEFAULT_RELEASE: &str = "Rawhide";

pub const DEFAULT_ARCH: &str = "x86_64";

pub const DEFAULT_VARIANT: &str = "Everything";
