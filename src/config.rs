use clap::{value_parser, Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const DEFAULT_SOURCE_DIR: &str = ".";
pub const DEFAULT_OUTPUT_FILE: &str = "parseller.geojson";

pub const SOURCE_DIR_ENV: &str = "PARCEL_SOURCE_DIR";
pub const OUTPUT_FILE_ENV: &str = "PARCEL_OUTPUT_FILE";
pub const CENTROIDS_FILE_ENV: &str = "PARCEL_CENTROIDS_FILE";

/// Paths for one combine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineConfig {
    pub source_dir: PathBuf,
    pub output_file: PathBuf,
    /// When set, a point collection of parcel centroids is written here too.
    pub centroids_file: Option<PathBuf>,
}

impl Default for CombineConfig {
    fn default() -> Self {
        CombineConfig {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            centroids_file: None,
        }
    }
}

impl CombineConfig {
    pub fn new(source_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        CombineConfig {
            source_dir: source_dir.into(),
            output_file: output_file.into(),
            centroids_file: None,
        }
    }

    pub fn with_centroids(mut self, centroids_file: impl Into<PathBuf>) -> Self {
        self.centroids_file = Some(centroids_file.into());
        self
    }

    pub fn from_matches(matches: &ArgMatches) -> Self {
        let source_dir = matches
            .get_one::<PathBuf>("source-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR));
        let output_file = matches
            .get_one::<PathBuf>("output")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));
        let centroids_file = matches.get_one::<PathBuf>("centroids").cloned();

        CombineConfig {
            source_dir,
            output_file,
            centroids_file,
        }
    }
}

// Command line, with every option also readable from the environment.
pub fn build_cli() -> Command {
    Command::new("Parcel Combiner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Merges a folder of parcel JSON/GeoJSON files into a single FeatureCollection")
        .arg(
            Arg::new("source-dir")
                .short('s')
                .long("source-dir")
                .num_args(1)
                .env(SOURCE_DIR_ENV)
                .default_value(DEFAULT_SOURCE_DIR)
                .value_parser(value_parser!(PathBuf))
                .help("Folder containing the parcel .json files"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .num_args(1)
                .env(OUTPUT_FILE_ENV)
                .default_value(DEFAULT_OUTPUT_FILE)
                .value_parser(value_parser!(PathBuf))
                .help("Combined GeoJSON file to write (overwritten if present)"),
        )
        .arg(
            Arg::new("centroids")
                .short('c')
                .long("centroids")
                .num_args(1)
                .env(CENTROIDS_FILE_ENV)
                .value_parser(value_parser!(PathBuf))
                .help("Also write one centroid point per parcel to this file"),
        )
}
