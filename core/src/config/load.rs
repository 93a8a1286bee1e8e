use std::path::{Path, PathBuf};

use anyhow::Context;

use super::types::{HooksConfig, Profile};

pub const ENV_SEARCH_TTL: &str = "CLAUDE_RECALL_SEARCH_TTL";
pub const ENV_ENFORCE_MODE: &str = "CLAUDE_RECALL_ENFORCE_MODE";
pub const ENV_STATE_DIR: &str = "CLAUDE_RECALL_STATE_DIR";
pub const ENV_PROFILE: &str = "CLAUDE_RECALL_PROFILE";

/// Get the default data directory: ~/.claude-recall
pub fn get_recall_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir()
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
        .or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from))
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".claude-recall"))
}

/// Config file layers plus environment overrides. Rejected overrides are logged,
/// so call this after tracing is set up, or use [`load_file_default`] and
/// [`apply_env_overrides`] separately.
pub fn load_default() -> anyhow::Result<HooksConfig> {
    let mut cfg = load_file_default()?;
    log_rejected(&apply_env_overrides(&mut cfg, |k| std::env::var(k).ok()));
    Ok(cfg)
}

/// Loads an explicit config file, then applies the same directory defaults and
/// environment overrides as [`load_default`].
pub fn load_from_path(path: &Path) -> anyhow::Result<HooksConfig> {
    let mut cfg = load_file(path)?;
    log_rejected(&apply_env_overrides(&mut cfg, |k| std::env::var(k).ok()));
    Ok(cfg)
}

/// File layers only: `~/.claude-recall/config.toml`, `./recall-hooks.toml`, or
/// defaults, with data directories filled in.
pub fn load_file_default() -> anyhow::Result<HooksConfig> {
    // Priority 1: ~/.claude-recall/config.toml
    let data_dir = get_recall_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./recall-hooks.toml
    let local_config = Path::new("recall-hooks.toml");

    let mut cfg: HooksConfig = if user_config.exists() {
        let s = std::fs::read_to_string(&user_config)?;
        toml::from_str::<HooksConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<HooksConfig>(&s)?
    } else {
        HooksConfig::default()
    };

    fill_data_dirs(&mut cfg, &data_dir);
    Ok(cfg)
}

/// An explicit config file with data directories filled in, no environment.
pub fn load_file(path: &Path) -> anyhow::Result<HooksConfig> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut cfg = toml::from_str::<HooksConfig>(&s)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    fill_data_dirs(&mut cfg, &get_recall_data_dir()?);
    Ok(cfg)
}

/// Point unset state/log directories at the data directory and expand `~` in
/// configured ones.
pub fn fill_data_dirs(cfg: &mut HooksConfig, data_dir: &Path) {
    cfg.session.state_dir = Some(match non_blank(cfg.session.state_dir.as_deref()) {
        Some(d) => expand(d),
        None => data_dir.join("hook-state").to_string_lossy().to_string(),
    });

    cfg.logging.directory = Some(match non_blank(cfg.logging.directory.as_deref()) {
        Some(d) => expand(d),
        None => data_dir.join("logs").to_string_lossy().to_string(),
    });
}

/// Environment variable overrides (highest priority). `lookup` is injected so the
/// precedence rules can be exercised without touching the process environment.
///
/// Returns one message per override that could not be applied; the previous
/// value is kept for those.
pub fn apply_env_overrides<F>(cfg: &mut HooksConfig, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut rejected = Vec::new();

    if let Some(v) = lookup(ENV_PROFILE).filter(|v| !v.trim().is_empty()) {
        match v.parse::<Profile>() {
            Ok(p) => cfg.enforce.profile = p,
            Err(e) => rejected.push(format!("ignoring {ENV_PROFILE}={v}: {e}")),
        }
    }

    if let Some(v) = lookup(ENV_SEARCH_TTL).filter(|v| !v.trim().is_empty()) {
        match v.trim().parse::<u64>() {
            Ok(ms) => cfg.enforce.ttl_ms = Some(ms),
            Err(e) => rejected.push(format!("ignoring {ENV_SEARCH_TTL}={v}: {e}")),
        }
    }

    if let Some(v) = lookup(ENV_ENFORCE_MODE).filter(|v| !v.trim().is_empty()) {
        cfg.enforce.mode = v.trim().to_string();
    }

    if let Some(v) = lookup(ENV_STATE_DIR).filter(|v| !v.trim().is_empty()) {
        cfg.session.state_dir = Some(expand(v.trim()));
    }

    rejected
}

pub fn log_rejected(rejected: &[String]) {
    for msg in rejected {
        tracing::warn!(target: "recall.config", "{}", msg);
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn expand(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}
