use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Map viewer for GeoAPI projects
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Options file (default: geoapi_viewer.toml next to the binary)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the options file
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all projects
    Projects,
    /// Build the map layers of a project
    Map {
        /// Project id
        project_id: u64,
        /// Base map style (`satellite` or streets)
        #[arg(long, value_name = "STYLE")]
        style: Option<String>,
        /// Zoom level applied after fitting the layers
        #[arg(long, value_name = "Z")]
        zoom: Option<f64>,
    },
    /// Show gallery and properties of one feature
    Detail {
        /// Project id
        project_id: u64,
        /// Index of the feature in the project's collection
        feature_index: usize,
    },
    /// Write the current options to the options file
    WriteConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_arguments_are_parsed() {
        let args = Args::parse_from([
            "GeoAPI-Viewer",
            "--base-url",
            "http://geoapi.local",
            "map",
            "42",
            "--style",
            "satellite",
        ]);

        assert_eq!(args.base_url.as_deref(), Some("http://geoapi.local"));
        match args.command {
            Command::Map {
                project_id, style, ..
            } => {
                assert_eq!(project_id, 42);
                assert_eq!(style.as_deref(), Some("satellite"));
            }
            other => panic!("Map erwartet, erhalten: {other:?}"),
        }
    }
}
