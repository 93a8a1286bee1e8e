use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use recall_core::api::{HooksConfig, Profile, RelayKind};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Block,
    Warn,
    Off,
}

impl ModeArg {
    fn as_str(self) -> &'static str {
        match self {
            ModeArg::Block => "block",
            ModeArg::Warn => "warn",
            ModeArg::Off => "off",
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileArg {
    Strict,
    Session,
}

impl From<ProfileArg> for Profile {
    fn from(p: ProfileArg) -> Self {
        match p {
            ProfileArg::Strict => Profile::Strict,
            ProfileArg::Session => Profile::Session,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishKind {
    ToolPre,
    Prompt,
}

impl From<PublishKind> for RelayKind {
    fn from(k: PublishKind) -> Self {
        match k {
            PublishKind::ToolPre => RelayKind::ToolPre,
            PublishKind::Prompt => RelayKind::Prompt,
        }
    }
}

/// Hook entry points. Each subcommand reads the host's JSON payload from stdin.
#[derive(Parser, Debug)]
#[command(name = "recall-hooks", version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.claude-recall/config.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, global = true)]
    pub mode: Option<ModeArg>,

    /// Search freshness window in milliseconds; overrides the profile default.
    #[arg(long, global = true)]
    pub ttl_ms: Option<u64>,

    /// - strict: search again every 5 minutes
    /// - session: one search per session (24h)
    #[arg(long, value_enum, global = true)]
    pub profile: Option<ProfileArg>,

    #[arg(long, global = true)]
    pub state_dir: Option<String>,
}

impl Args {
    /// Command-line flags win over the config file and the environment.
    pub fn apply_overrides(&self, cfg: &mut HooksConfig) {
        if let Some(mode) = self.mode {
            cfg.enforce.mode = mode.as_str().to_string();
        }
        if let Some(profile) = self.profile {
            cfg.enforce.profile = profile.into();
        }
        if let Some(ttl) = self.ttl_ms {
            cfg.enforce.ttl_ms = Some(ttl);
        }
        if let Some(dir) = self.state_dir.as_deref().filter(|d| !d.trim().is_empty()) {
            cfg.session.state_dir = Some(dir.trim().to_string());
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Post-tool: stamp searches and keep the tool history.
    Track,
    /// Pre-tool: allow, warn or block a sensitive tool call.
    Gate,
    /// Pre-tool, single hook: record searches, gate everything else.
    Enforce,
    /// Prompt submit: print a search reminder for the prompt.
    PromptReminder,
    /// Prompt submit: forward the prompt to the memory service.
    CapturePrompt,
    /// Relay the payload to the pub/sub publisher.
    Publish(PublishArgs),
    /// Print the stored record for a session.
    Inspect(InspectArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PublishArgs {
    #[arg(value_enum)]
    pub kind: PublishKind,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct InspectArgs {
    #[arg(long)]
    pub session: String,
}
