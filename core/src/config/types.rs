use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HooksConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub enforce: EnforceConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub suggest: SuggestConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub capture: CaptureConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr. The host shows hook stderr to the model, so this stays off
    /// unless debugging a hook by hand.
    #[serde(default)]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "recall_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_file() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: false,
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

/// Deployment profile. Selects the TTL used when none is configured explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Search must be repeated every few minutes.
    #[default]
    Strict,
    /// One search per session is enough.
    Session,
}

pub const STRICT_TTL_MS: u64 = 5 * 60 * 1000;
pub const SESSION_TTL_MS: u64 = 24 * 60 * 60 * 1000;

impl Profile {
    pub fn default_ttl_ms(self) -> u64 {
        match self {
            Profile::Strict => STRICT_TTL_MS,
            Profile::Session => SESSION_TTL_MS,
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Profile::Strict),
            "session" => Ok(Profile::Session),
            other => Err(format!("unknown profile: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnforceConfig {
    /// "block" | "warn" | "off". Unknown values resolve to block.
    #[serde(default = "default_enforce_mode")]
    pub mode: String,

    #[serde(default)]
    pub profile: Profile,

    /// Explicit TTL; overrides the profile default when set.
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

fn default_enforce_mode() -> String {
    "block".to_string()
}

impl Default for EnforceConfig {
    fn default() -> Self {
        Self {
            mode: default_enforce_mode(),
            profile: Profile::default(),
            ttl_ms: None,
        }
    }
}

impl EnforceConfig {
    pub fn effective_ttl_ms(&self) -> u64 {
        self.ttl_ms.unwrap_or_else(|| self.profile.default_ttl_ms())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Tool names (substring match) that count as a memory search.
    #[serde(default = "default_search_tools")]
    pub search_tools: Vec<String>,

    /// Tool names (exact match) that require a fresh search.
    #[serde(default = "default_gated_tools")]
    pub gated_tools: Vec<String>,

    /// Gated tools whose `command` parameter is checked against `read_only_commands`.
    #[serde(default = "default_command_tools")]
    pub command_tools: Vec<String>,

    #[serde(default = "default_read_only_commands")]
    pub read_only_commands: Vec<String>,

    /// Tool calls whose name contains this (case-insensitive) are kept in the session
    /// history. Empty keeps every call.
    #[serde(default = "default_track_filter")]
    pub track_filter: String,
}

fn default_search_tools() -> Vec<String> {
    [
        "mcp__claude-recall__search",
        "mcp__claude-recall__retrieve_memory",
        "mcp__claude-recall__load_rules",
        "mcp__claude-recall__search_memory",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_gated_tools() -> Vec<String> {
    ["Write", "Edit", "Bash", "Task"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_command_tools() -> Vec<String> {
    vec!["Bash".to_string()]
}

fn default_read_only_commands() -> Vec<String> {
    [
        // files
        "ls", "cat", "head", "tail", "less", "more", "file", "stat", "wc",
        "find", "locate", "which", "whereis", "type", "pwd", "whoami",
        // vcs
        "git status", "git log", "git diff", "git show", "git branch",
        "git remote", "git fetch", "git stash list", "git tag",
        // package managers and test runners
        "npm list", "npm ls", "npm view", "npm outdated", "npm audit",
        "npm test", "npm run test", "npm run build", "npm run lint",
        "pip list", "pip show", "pip freeze",
        "pytest", "jest", "cargo test", "go test", "tsc --noEmit",
        // text tools
        "grep", "rg", "ag", "awk", "sed", "sort", "uniq", "diff",
        // system
        "tree", "realpath", "dirname", "basename", "date", "env", "echo",
        "ps", "top", "df", "du", "free", "uptime", "hostname",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_track_filter() -> String {
    "claude-recall".to_string()
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            search_tools: default_search_tools(),
            gated_tools: default_gated_tools(),
            command_tools: default_command_tools(),
            read_only_commands: default_read_only_commands(),
            track_filter: default_track_filter(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    #[serde(default = "default_suggest_max_tokens")]
    pub max_tokens: usize,

    /// Keywords appended for specific tools, keyed by tool name.
    #[serde(default = "default_tool_keywords")]
    pub tool_keywords: BTreeMap<String, Vec<String>>,

    /// Keywords always appended last.
    #[serde(default = "default_generic_keywords")]
    pub generic_keywords: Vec<String>,
}

fn default_suggest_max_tokens() -> usize {
    6
}

fn default_tool_keywords() -> BTreeMap<String, Vec<String>> {
    let mut m = BTreeMap::new();
    m.insert(
        "Write".to_string(),
        vec!["create".into(), "new file".into(), "template".into()],
    );
    m.insert(
        "Edit".to_string(),
        vec!["update".into(), "modify".into(), "pattern".into()],
    );
    m
}

fn default_generic_keywords() -> Vec<String> {
    vec!["preferences".to_string(), "correction".to_string()]
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_suggest_max_tokens(),
            tool_keywords: default_tool_keywords(),
            generic_keywords: default_generic_keywords(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStoreKind {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub store: SessionStoreKind,

    /// Directory holding one JSON record per session. Filled in by `load_default`.
    #[serde(default)]
    pub state_dir: Option<String>,

    #[serde(default = "default_history_cap")]
    pub history_cap: usize,
}

fn default_history_cap() -> usize {
    20
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: SessionStoreKind::default(),
            state_dir: None,
            history_cap: default_history_cap(),
        }
    }
}

/// `provider` is optional in the file; a `[relay]` section without it uses the
/// command publisher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawRelayConfig")]
pub struct RelayConfig {
    /// Upper bound on how long a hook waits for a publish to hand off.
    pub timeout_ms: u64,

    #[serde(flatten)]
    pub provider: RelayProvider,
}

#[derive(Deserialize)]
struct RawRelayConfig {
    #[serde(default = "default_relay_timeout_ms")]
    timeout_ms: u64,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

impl TryFrom<RawRelayConfig> for RelayConfig {
    type Error = String;

    fn try_from(raw: RawRelayConfig) -> Result<Self, Self::Error> {
        let mut rest = raw.rest;
        rest.entry("provider")
            .or_insert_with(|| serde_json::Value::String("command".to_string()));
        let provider = serde_json::from_value::<RelayProvider>(serde_json::Value::Object(rest))
            .map_err(|e| format!("invalid [relay] provider: {e}"))?;
        Ok(Self {
            timeout_ms: raw.timeout_ms,
            provider,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum RelayProvider {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "command")]
    Command(CommandRelayConfig),
    #[serde(rename = "http")]
    Http(HttpRelayConfig),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRelayConfig {
    #[serde(default = "default_relay_program")]
    pub program: String,
    #[serde(default = "default_relay_args")]
    pub args: Vec<String>,
}

impl Default for CommandRelayConfig {
    fn default() -> Self {
        Self {
            program: default_relay_program(),
            args: default_relay_args(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpRelayConfig {
    pub url: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_relay_timeout_ms() -> u64 {
    1_500
}

fn default_relay_program() -> String {
    "node".to_string()
}

fn default_relay_args() -> Vec<String> {
    vec![".claude/dist/pubnub/publisher-cli.js".to_string()]
}

fn default_relay_provider() -> RelayProvider {
    RelayProvider::Command(CommandRelayConfig::default())
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_relay_timeout_ms(),
            provider: default_relay_provider(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_capture_enabled")]
    pub enabled: bool,
    #[serde(default = "default_capture_program")]
    pub program: String,
    #[serde(default = "default_capture_args")]
    pub args: Vec<String>,
    #[serde(default = "default_capture_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_capture_enabled() -> bool {
    true
}

fn default_capture_program() -> String {
    "claude-recall".to_string()
}

fn default_capture_args() -> Vec<String> {
    vec!["capture-prompt".to_string()]
}

fn default_capture_timeout_ms() -> u64 {
    2_000
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            enabled: default_capture_enabled(),
            program: default_capture_program(),
            args: default_capture_args(),
            timeout_ms: default_capture_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: HooksConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.enforce.mode, "block");
        assert_eq!(cfg.enforce.effective_ttl_ms(), STRICT_TTL_MS);
        assert_eq!(cfg.session.history_cap, 20);
        assert!(cfg.policy.gated_tools.contains(&"Task".to_string()));
        assert!(matches!(cfg.relay.provider, RelayProvider::Command(_)));
    }

    #[test]
    fn profile_selects_ttl_unless_explicit() {
        let cfg: HooksConfig = toml::from_str(
            r#"
            [enforce]
            profile = "session"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.enforce.effective_ttl_ms(), SESSION_TTL_MS);

        let cfg: HooksConfig = toml::from_str(
            r#"
            [enforce]
            profile = "session"
            ttl_ms = 1000
            "#,
        )
        .unwrap();
        assert_eq!(cfg.enforce.effective_ttl_ms(), 1000);
    }

    #[test]
    fn relay_provider_is_tagged() {
        let cfg: HooksConfig = toml::from_str(
            r#"
            [relay]
            provider = "http"
            url = "http://localhost:9000/events"
            timeout_ms = 300
            "#,
        )
        .unwrap();
        assert_eq!(cfg.relay.timeout_ms, 300);
        match cfg.relay.provider {
            RelayProvider::Http(h) => assert_eq!(h.url, "http://localhost:9000/events"),
            other => panic!("unexpected provider: {other:?}"),
        }

        let cfg: HooksConfig = toml::from_str(
            r#"
            [relay]
            provider = "none"
            "#,
        )
        .unwrap();
        assert!(matches!(cfg.relay.provider, RelayProvider::None));
    }

    #[test]
    fn relay_without_provider_keeps_rest_of_file() {
        let cfg: HooksConfig = toml::from_str(
            r#"
            [enforce]
            mode = "warn"

            [relay]
            timeout_ms = 300
            "#,
        )
        .unwrap();
        assert_eq!(cfg.enforce.mode, "warn");
        assert_eq!(cfg.relay.timeout_ms, 300);
        match cfg.relay.provider {
            RelayProvider::Command(c) => assert_eq!(c.program, "node"),
            other => panic!("unexpected provider: {other:?}"),
        }

        let cfg: HooksConfig = toml::from_str(
            r#"
            [relay]
            program = "publish-events"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.relay.timeout_ms, 1_500);
        match cfg.relay.provider {
            RelayProvider::Command(c) => assert_eq!(c.program, "publish-events"),
            other => panic!("unexpected provider: {other:?}"),
        }
    }

    #[test]
    fn unknown_relay_provider_is_rejected() {
        let err = toml::from_str::<HooksConfig>(
            r#"
            [relay]
            provider = "carrier-pigeon"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid [relay] provider"), "{err}");
    }

    #[test]
    fn profile_parses_case_insensitively() {
        assert_eq!("SESSION".parse::<Profile>(), Ok(Profile::Session));
        assert!("weekly".parse::<Profile>().is_err());
    }
}
