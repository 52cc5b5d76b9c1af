use anyhow::{anyhow, Result};
use clap::{crate_version, App, Arg, ArgMatches};
use log::{error, info};
use plainsite::build::build_site;
use plainsite::config::Config;
use std::path::PathBuf;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = App::new("plainsite")
        .version(crate_version!())
        .about("Builds HTML pages and an index from a directory of plain-text documents")
        .arg(
            Arg::with_name("INPUT_DIR")
                .help("Directory containing the .txt documents")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("OUTPUT_DIR")
                .help("Directory to write the HTML pages to")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("STYLESHEET")
                .help("Stylesheet inlined into every page")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::with_name("site")
                .long("site")
                .value_name("FILE")
                .takes_value(true)
                .help("YAML file overriding the site title, subtitle, and back link"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

// Document failures are reported as they happen and don't affect the exit
// status; only a build that couldn't run at all does.
fn run(matches: &ArgMatches) -> Result<()> {
    let mut config = Config::new(
        &path_arg(matches, "INPUT_DIR")?,
        &path_arg(matches, "OUTPUT_DIR")?,
        &path_arg(matches, "STYLESHEET")?,
    );
    if let Some(site_file) = matches.value_of_os("site") {
        config = config.with_site_file(&PathBuf::from(site_file))?;
    }

    let report = build_site(&config)?;
    info!(
        "Wrote {} of {} pages and an index of {}",
        report.compiled.len(),
        report.compiled.len() + report.failures.len(),
        report.indexed
    );
    Ok(())
}

fn path_arg(matches: &ArgMatches, name: &str) -> Result<PathBuf> {
    matches
        .value_of_os(name)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("missing argument {}", name))
}
