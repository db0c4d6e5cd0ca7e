use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const CONFIG_FILE: &str = "jokes";
const ENV_PREFIX: &str = "JOKES";

/// Runtime configuration. Sources, lowest to highest precedence: an optional
/// `jokes.toml` in the working directory, `JOKES_*` environment variables
/// (`JOKES_QUESTIONS` takes a comma-separated list), then command-line flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Session cookie sent with every request. May be empty; public answers
    /// are served without one.
    pub cookie: String,
    /// Question ids to crawl, in order.
    pub questions: Vec<u64>,
    /// Directory joke files are written to. Must already exist.
    pub out_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cookie: String::new(),
            questions: Vec::new(),
            out_dir: PathBuf::from("jokes"),
        }
    }
}

pub fn load(
    questions: Vec<u64>,
    cookie: Option<String>,
    out_dir: Option<PathBuf>,
) -> Result<Settings> {
    let sources = Config::builder()
        .add_source(File::with_name(CONFIG_FILE).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("questions"),
        )
        .build()
        .context("failed to read configuration")?;
    let mut settings: Settings = sources
        .try_deserialize()
        .context("invalid configuration")?;

    if !questions.is_empty() {
        settings.questions = questions;
    }
    if let Some(cookie) = cookie {
        settings.cookie = cookie;
    }
    if let Some(dir) = out_dir {
        settings.out_dir = dir;
    }

    if settings.questions.is_empty() {
        bail!(
            "no question ids configured (pass ids as arguments, set {}_QUESTIONS, \
             or list `questions` in {}.toml)",
            ENV_PREFIX,
            CONFIG_FILE
        );
    }
    Ok(settings)
}
