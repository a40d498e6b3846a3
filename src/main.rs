#[macro_use]
extern crate fomat_macros;

mod logging;

use crate::logging::setup_logging;
use clap::{App, Arg};
use fedora_media_check::{
    app::{self, Options},
    misc, DEFAULT_ARCH, DEFAULT_RELEASE, DEFAULT_VARIANT,
};
use std::{path::PathBuf, process::exit};

#[tokio::main]
async fn main() {
    let _ = setup_logging(::log::LevelFilter::Info);

    let matches = App::new("fedora-media-check")
        .about("Fedora installation media checksum tester")
        .arg(
            Arg::new("release")
                .help("Fedora release to locate a compose for")
                .short('r')
                .long("release")
                .takes_value(true)
                .default_value(DEFAULT_RELEASE),
        )
        .arg(
            Arg::new("compose")
                .help("compose identifier; YYYYMMDD for Rawhide")
                .short('c')
                .long("compose")
                .takes_value(true),
        )
        .arg(
            Arg::new("arch")
                .help("architecture of the images")
                .short('a')
                .long("arch")
                .takes_value(true)
                .default_value(DEFAULT_ARCH),
        )
        .arg(
            Arg::new("variant")
                .help("variant (Everything, Server, Workstation, Spins, Cloud)")
                .short('v')
                .long("variant")
                .takes_value(true)
                .default_value(DEFAULT_VARIANT),
        )
        .arg(
            Arg::new("subvariant")
                .help("subvariant (for Spins: KDE, LXQt, Xfce)")
                .short('s')
                .long("subvariant")
                .takes_value(true),
        )
        .arg(
            Arg::new("type")
                .help("type of image (for Server: boot, dvd)")
                .short('t')
                .long("type")
                .takes_value(true),
        )
        .arg(
            Arg::new("directory")
                .help("directory that images are downloaded into and verified from")
                .short('d')
                .long("directory")
                .takes_value(true)
                .default_value("."),
        )
        .arg(
            Arg::new("purge")
                .help("delete the downloaded images after testing")
                .short('p')
                .long("purge"),
        )
        .arg(
            Arg::new("forcedownload")
                .help("download images even when they already exist locally")
                .short('f')
                .long("forcedownload"),
        )
        .get_matches();

    let options = Options {
        release: matches.value_of("release").unwrap_or(DEFAULT_RELEASE).to_owned(),
        compose: matches.value_of("compose").map(String::from),
        arch: matches.value_of("arch").unwrap_or(DEFAULT_ARCH).to_owned(),
        variant: matches.value_of("variant").unwrap_or(DEFAULT_VARIANT).to_owned(),
        subvariant: matches.value_of("subvariant").map(String::from),
        image_type: matches.value_of("type").map(String::from),
        directory: PathBuf::from(matches.value_of("directory").unwrap_or(".")),
        purge: matches.is_present("purge"),
        force_download: matches.is_present("forcedownload"),
    };

    match app::run(&options).await {
        Ok(true) => (),
        Ok(false) => exit(1),
        Err(why) => {
            epintln!("fedora-media-check: " (misc::format_error(&why)));
            exit(1);
        }
    }
}
