use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use dotenvy::dotenv;

use crate::orchestrator::SearchPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanKind {
    /// One query over every kind.
    Single,
    /// Separate video and playlist queries run side by side.
    Split,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "ytgbss", version, about = "Anonymous YouTube search server for the game bar overlay")]
pub struct Config {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 54522)]
    pub port: u16,

    /// Also write logs to this file.
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Default filter when RUST_LOG is unset.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long = "search-plan", env = "SEARCH_PLAN", value_enum, default_value_t = PlanKind::Split)]
    pub plan_kind: PlanKind,

    #[arg(long, env = "VIDEO_LIMIT", default_value_t = 5)]
    pub video_limit: usize,

    #[arg(long, env = "PLAYLIST_LIMIT", default_value_t = 3)]
    pub playlist_limit: usize,

    /// Result cap for single-call searches and the legacy routes.
    #[arg(long, env = "SINGLE_LIMIT", default_value_t = 10)]
    pub single_limit: usize,

    #[arg(long, env = "PROVIDER_TIMEOUT_SECS")]
    pub provider_timeout_secs: Option<u64>,

    /// Serve only /current/search.
    #[arg(long, env = "NO_LEGACY_ROUTES")]
    pub no_legacy_routes: bool,
}

impl Config {
    /// Reads `.env` (if present), then flags and environment.
    pub fn load() -> Result<Config> {
        dotenv().ok();
        let config = Config::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.video_limit == 0 {
            bail!("video_limit must be > 0");
        }
        if self.playlist_limit == 0 {
            bail!("playlist_limit must be > 0");
        }
        if self.single_limit == 0 {
            bail!("single_limit must be > 0");
        }
        if self.provider_timeout_secs == Some(0) {
            bail!("provider_timeout_secs must be > 0 when set");
        }
        Ok(())
    }

    /// Plan behind `/current/search`.
    pub fn plan(&self) -> SearchPlan {
        match self.plan_kind {
            PlanKind::Single => SearchPlan::Single {
                limit: self.single_limit,
            },
            PlanKind::Split => SearchPlan::Split {
                videos: self.video_limit,
                playlists: self.playlist_limit,
            },
        }
    }

    /// Plan behind the legacy `/search` routes.
    pub fn legacy_plan(&self) -> SearchPlan {
        SearchPlan::Single {
            limit: self.single_limit,
        }
    }

    pub fn provider_timeout(&self) -> Option<Duration> {
        self.provider_timeout_secs.map(Duration::from_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
