//! CLI argument parsing using clap derive

use std::path::PathBuf;

use bundle_core::ImageSubRule;
use bundle_tree::Format;
use clap::{Parser, Subcommand};

/// bundlectl - Resolve, query and patch component bundles
#[derive(Parser, Debug)]
#[command(name = "bundlectl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Inline every file reference of a bundle
    ///
    /// Examples:
    ///   bundlectl inline bundle.yaml                   # Print the resolved bundle
    ///   bundlectl inline bundle.yaml -o out.json       # Write JSON atomically
    ///   bundlectl inline bundle.yaml --top-layer-only  # Pull in component files only
    Inline {
        /// Bundle file (.yaml, .yml or .json)
        input: PathBuf,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only pull in component files, leaving their references unresolved
        #[arg(long)]
        top_layer_only: bool,

        /// Output format (defaults to the output file's extension, else yaml)
        #[arg(long)]
        format: Option<Format>,
    },

    /// Print objects of a resolved bundle matching the filters
    ///
    /// Every filter is optional; omitted filters match anything.
    Find {
        /// Bundle file (.yaml, .yml or .json)
        input: PathBuf,

        /// Component name
        #[arg(long)]
        component: Option<String>,

        /// Component version
        #[arg(long)]
        version: Option<String>,

        /// Object apiVersion
        #[arg(long)]
        api_version: Option<String>,

        /// Object kind
        #[arg(long)]
        kind: Option<String>,

        /// Object metadata.name
        #[arg(long)]
        name: Option<String>,
    },

    /// List every image referenced by a resolved bundle
    Images {
        /// Bundle file (.yaml, .yml or .json)
        input: PathBuf,

        /// Group images by component
        #[arg(long)]
        by_component: bool,
    },

    /// Rewrite image references of a resolved bundle
    ///
    /// Examples:
    ///   bundlectl patch-images bundle.yaml --rule k8s.gcr.io=registry.example.com
    PatchImages {
        /// Bundle file (.yaml, .yml or .json)
        input: PathBuf,

        /// Substitution as find=replace (repeatable, applied in order)
        #[arg(short, long = "rule", required = true)]
        rules: Vec<ImageSubRule>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (defaults to the output file's extension, else yaml)
        #[arg(long)]
        format: Option<Format>,
    },
}
