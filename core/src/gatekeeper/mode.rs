use std::fmt;
use std::str::FromStr;

/// What happens to a gated call when the last search is not fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnforceMode {
    #[default]
    Block,
    Warn,
    Off,
}

impl EnforceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Warn => "warn",
            Self::Off => "off",
        }
    }

    /// Lenient parse used for config and environment values: anything unknown
    /// enforces.
    pub fn parse_or_block(s: &str) -> Self {
        s.parse().unwrap_or_else(|e: String| {
            tracing::warn!("{}; falling back to block", e);
            Self::Block
        })
    }
}

impl FromStr for EnforceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "warn" => Ok(Self::Warn),
            "off" => Ok(Self::Off),
            other => Err(format!("unknown enforce mode: {other:?}")),
        }
    }
}

impl fmt::Display for EnforceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
