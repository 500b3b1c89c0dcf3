//! CLI definitions for formwire.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use formwire_config::EncodingProfile;

/// formwire CLI.
#[derive(Parser)]
#[command(name = "formwire")]
#[command(about = "Fill in HTML forms and encode their submission parameters")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.formwire/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Apply actions to a form and print the encoded parameters
    Encode {
        /// JSON element tree containing the form
        form: PathBuf,

        /// Which form of the document to encode, in document order
        #[arg(long, default_value_t = 0)]
        form_index: usize,

        /// Parameter encoding profile (nested, flat)
        #[arg(long)]
        profile: Option<EncodingProfile>,

        /// Action to apply, in order (e.g. set:user[name]=Ada, check:agree, click:commit)
        #[arg(short, long = "action", value_name = "ACTION")]
        actions: Vec<Action>,
    },

    /// List every control with its kind, name and current value
    Classify {
        /// JSON element tree
        form: PathBuf,
    },

    /// Validate a configuration file
    CheckConfig,
}

/// One user interaction, written `verb:argument`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Set { name: String, value: String },
    Unset { name: String },
    Check { name: String },
    Uncheck { name: String },
    Choose { name: String, value: String },
    /// Pick an option by its visible text (or value).
    Select { name: String, option: String },
    Unselect { name: String, value: String },
    Attach {
        name: String,
        path: String,
        content_type: Option<String>,
    },
    Click { name: String, at: Option<(i64, i64)> },
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, arg) = s
            .split_once(':')
            .ok_or_else(|| format!("expected VERB:ARGUMENT, got '{}'", s))?;
        let pair = |arg: &str| -> Result<(String, String), String> {
            arg.split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .ok_or_else(|| format!("expected NAME=VALUE for '{}', got '{}'", verb, arg))
        };

        let action = match verb {
            "set" => {
                let (name, value) = pair(arg)?;
                Action::Set { name, value }
            }
            "unset" => Action::Unset { name: arg.to_string() },
            "check" => Action::Check { name: arg.to_string() },
            "uncheck" => Action::Uncheck { name: arg.to_string() },
            "choose" => {
                let (name, value) = pair(arg)?;
                Action::Choose { name, value }
            }
            "select" => {
                let (name, option) = pair(arg)?;
                Action::Select { name, option }
            }
            "unselect" => {
                let (name, value) = pair(arg)?;
                Action::Unselect { name, value }
            }
            "attach" => {
                let (name, file) = pair(arg)?;
                let (path, content_type) = match file.split_once(':') {
                    Some((path, content_type)) => (path.to_string(), Some(content_type.to_string())),
                    None => (file, None),
                };
                Action::Attach {
                    name,
                    path,
                    content_type,
                }
            }
            "click" => match arg.rsplit_once('@') {
                Some((name, point)) => {
                    let (x, y) = point
                        .split_once(',')
                        .and_then(|(x, y)| Some((x.trim().parse().ok()?, y.trim().parse().ok()?)))
                        .ok_or_else(|| format!("expected NAME@X,Y, got '{}'", arg))?;
                    Action::Click {
                        name: name.to_string(),
                        at: Some((x, y)),
                    }
                }
                None => Action::Click {
                    name: arg.to_string(),
                    at: None,
                },
            },
            other => return Err(format!("unknown action '{}'", other)),
        };
        Ok(action)
    }
}
