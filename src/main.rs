#![recursion_limit = "1024"] // for error_chain

#[macro_use]
extern crate log;
#[macro_use]
extern crate clap;
#[macro_use]
extern crate json;
#[macro_use]
extern crate error_chain;
extern crate atty;
extern crate max3ds;
extern crate termcolor;

mod dump;
mod info;
mod logger;
mod version;

use clap::ArgMatches;
use max3ds::errors::Result;
use max3ds::ReadOptions;
use std::process::exit;

fn main() {
    let long_version = version::long_version();
    let app = clap_app!(max3ds =>
        (@setting SubcommandRequiredElseHelp)
        (@setting VersionlessSubcommands)
        (version: &long_version[..])
        (about: "Discreet 3D Studio (.3ds) reader")
        (@arg verbose: -v --verbose +multiple +global "Print more log messages (repeat for even more)")
        (@arg quiet: -q --quiet +global conflicts_with[verbose] "Only print errors")
        (@subcommand info =>
            (about: "Print a summary of what's in some .3ds files")
            (alias: "i")
            (@arg strict: --strict "Fail on chunks whose sizes don't add up")
            (@arg INPUT: +required +multiple "Input file(s)")
        )
        (@subcommand dump =>
            (about: "Dump a .3ds file as JSON")
            (alias: "d")
            (@arg strict: --strict "Fail on chunks whose sizes don't add up")
            (@arg normals: --normals "Generate and include vertex normals")
            (@arg tangents: --tangents "Generate and include tangents and binormals")
            (@arg OUTPUT: -o --output +takes_value "Write here instead of stdout")
            (@arg INPUT: +required "Input file")
        )
    );
    let matches = app.get_matches();

    logger::init(log_level(&matches));

    if let Err(e) = dispatch(&matches) {
        error!("{}", e);
        for cause in e.iter().skip(1) {
            error!("  caused by: {}", cause);
        }
        exit(1);
    }
}

fn log_level(matches: &ArgMatches) -> log::Level {
    if matches.is_present("quiet") {
        return log::Level::Error;
    }
    match matches.occurrences_of("verbose") {
        0 => log::Level::Warn,
        1 => log::Level::Info,
        2 => log::Level::Debug,
        _ => log::Level::Trace,
    }
}

fn dispatch(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        ("info", Some(m)) => info::main(m),
        ("dump", Some(m)) => dump::main(m),
        _ => Ok(()),
    }
}

/// Read options from the `--strict` flag.
pub fn read_options(matches: &ArgMatches) -> ReadOptions {
    if matches.is_present("strict") {
        ReadOptions::strict()
    } else {
        ReadOptions::default()
    }
}
