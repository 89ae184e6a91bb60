//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::{PreferencesUpdate, Theme};

#[derive(Parser, Debug)]
#[command(name = "usercache")]
#[command(about = "usercache - cached user lookups with storage fallback", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a YAML config file (defaults to .usercache/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a user (cache, then remote, then stored copy)
    Fetch {
        /// User ID
        id: String,
    },

    /// Fetch a user and print its engagement score
    Score {
        /// User ID
        id: String,
    },

    /// Update a user's preferences
    Prefs(PrefsArgs),

    /// Drop the cached and persisted copies of a user
    Forget {
        /// User ID
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct PrefsArgs {
    /// User ID
    pub id: String,

    /// Theme: light, dark or system
    #[arg(short, long)]
    pub theme: Option<Theme>,

    /// Enable or disable notifications
    #[arg(short, long)]
    pub notifications: Option<bool>,

    /// Language tag, e.g. "fr"
    #[arg(short, long)]
    pub language: Option<String>,
}

impl PrefsArgs {
    pub fn update(&self) -> PreferencesUpdate {
        PreferencesUpdate {
            theme: self.theme,
            notifications: self.notifications,
            language: self.language.clone(),
        }
    }
}
