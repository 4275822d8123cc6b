//! Error types for subway-waker.
//!
//! Data-source failures are always recoverable: the tracking loop logs
//! them and keeps polling, and station selection shows them as a blocking
//! message. Only start-up errors (`AppError`) end the process.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::machine::{Command, Phase};

/// A real-time feed could not be read.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("feed answered {code}: {message}")]
    Upstream { code: String, message: String },
    #[error("could not decode feed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid feed endpoint {0}")]
    BadEndpoint(String),
    #[error("no feed endpoints configured")]
    NoEndpoints,
}

/// Station selection could not produce a train list.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("No {line} trains reported at {station}. Pick another station or try again.")]
    NoMatchingService { station: String, line: String },
    #[error("Could not load arrivals: {0}")]
    DataUnavailable(#[from] DataUnavailable),
    #[error("unknown line {0}")]
    UnknownLine(String),
    #[error("no train at position {0}")]
    NoSuchTrain(usize),
    #[error("station name is empty")]
    EmptyStation,
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// A command was issued in a phase that does not accept it.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{command:?} is not allowed while in {phase:?}")]
pub struct TransitionError {
    pub phase: Phase,
    pub command: Command,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read station directory {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse station directory: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("station directory is empty")]
    Empty,
}

/// Start-up failures that abort the program.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to open log file {path}: {source}")]
    Log {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
