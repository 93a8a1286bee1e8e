use crate::input::HookInput;
use crate::policy::{PolicyClassifier, ToolClass};
use crate::state::{SessionRecord, SessionStore};

use super::config::GatekeeperConfig;
use super::decision::{GateOutcome, LastSearch, Remediation};
use super::helpers::suggest_query;
use super::mode::EnforceMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The session never recorded a search.
    Unknown,
    Fresh { age_ms: i64 },
    Stale { age_ms: i64 },
}

impl Freshness {
    /// `age == ttl` is still fresh. A search stamped in the future (clock skew)
    /// counts as age zero. A timestamp whose age cannot be computed is `Unknown`.
    pub fn of(record: &SessionRecord, now_ms: i64, ttl_ms: u64) -> Self {
        let Some(age) = record.last_search_age_ms(now_ms) else {
            return Freshness::Unknown;
        };
        let age = age.max(0);
        if (age as u64) <= ttl_ms {
            Freshness::Fresh { age_ms: age }
        } else {
            Freshness::Stale { age_ms: age }
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, Freshness::Fresh { .. })
    }
}

pub struct Gatekeeper;

impl Gatekeeper {
    /// Pure decision for one hook input against an already loaded record.
    pub fn evaluate(
        cfg: &GatekeeperConfig,
        classifier: &PolicyClassifier,
        record: &SessionRecord,
        input: &HookInput,
        now_ms: i64,
    ) -> GateOutcome {
        if cfg.mode == EnforceMode::Off {
            return GateOutcome::Allow;
        }
        if classifier.classify(&input.tool_name, &input.tool_input) != ToolClass::Gated {
            return GateOutcome::Allow;
        }

        let freshness = Freshness::of(record, now_ms, cfg.ttl_ms);
        let last_search = match freshness {
            Freshness::Fresh { .. } => return GateOutcome::Allow,
            Freshness::Unknown => LastSearch::Never,
            Freshness::Stale { age_ms } => LastSearch::Ago {
                age_ms,
                query: record.last_search_query.clone(),
            },
        };

        let remediation = Remediation {
            tool_name: input.tool_name.clone(),
            suggested_query: suggest_query(&input.tool_name, &input.tool_input, &cfg.suggest),
            last_search,
            ttl_ms: cfg.ttl_ms,
        };

        match cfg.mode {
            EnforceMode::Warn => GateOutcome::Warn(remediation),
            _ => GateOutcome::Block(remediation),
        }
    }

    /// Loads the session record only when the call is actually gated, then
    /// evaluates.
    #[tracing::instrument(name = "gate.check", skip_all, fields(tool = %input.tool_name))]
    pub fn check(
        cfg: &GatekeeperConfig,
        classifier: &PolicyClassifier,
        store: &dyn SessionStore,
        input: &HookInput,
        now_ms: i64,
    ) -> GateOutcome {
        if cfg.mode == EnforceMode::Off {
            tracing::debug!("enforcement off");
            return GateOutcome::Allow;
        }
        if !classifier.requires_gate(&input.tool_name, &input.tool_input) {
            tracing::debug!("tool not gated");
            return GateOutcome::Allow;
        }

        let record = store.load(&input.session_id);
        let outcome = Self::evaluate(cfg, classifier, &record, input, now_ms);
        tracing::info!(
            session = %input.session_id,
            store = store.name(),
            mode = %cfg.mode,
            last_search_at = ?record.last_search_at,
            outcome = outcome.as_str(),
            "gate decision"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;
    use crate::state::InMemorySessionStore;
    use serde_json::json;

    const TTL: u64 = 300_000;
    const NOW: i64 = 1_700_000_000_000;

    fn cfg(mode: EnforceMode) -> GatekeeperConfig {
        GatekeeperConfig {
            mode,
            ttl_ms: TTL,
            ..GatekeeperConfig::default()
        }
    }

    fn classifier() -> PolicyClassifier {
        PolicyClassifier::new(&PolicyConfig::default())
    }

    fn input(tool: &str, params: serde_json::Value) -> HookInput {
        HookInput {
            tool_name: tool.into(),
            tool_input: params,
            session_id: "s1".into(),
            ..HookInput::default()
        }
    }

    fn searched_at(at: i64) -> SessionRecord {
        let mut r = SessionRecord::new("s1");
        r.record_search(at, Some("logging"));
        r
    }

    #[test]
    fn freshness_boundary() {
        let r = searched_at(1_000);
        assert_eq!(
            Freshness::of(&r, 1_000 + TTL as i64, TTL),
            Freshness::Fresh { age_ms: TTL as i64 }
        );
        assert_eq!(
            Freshness::of(&r, 1_000 + TTL as i64 + 1, TTL),
            Freshness::Stale { age_ms: TTL as i64 + 1 }
        );
        assert_eq!(Freshness::of(&SessionRecord::default(), 0, TTL), Freshness::Unknown);
    }

    #[test]
    fn future_search_counts_as_fresh() {
        let r = searched_at(10_000);
        assert_eq!(Freshness::of(&r, 5_000, TTL), Freshness::Fresh { age_ms: 0 });
    }

    #[test]
    fn overflowing_stored_timestamp_is_unknown() {
        let r: SessionRecord =
            serde_json::from_str(r#"{"sessionId":"s1","lastSearchAt":-9223372036854775808}"#)
                .unwrap();
        assert_eq!(r.last_search_at, Some(i64::MIN));
        assert_eq!(Freshness::of(&r, NOW, TTL), Freshness::Unknown);

        let i = input("Write", json!({"file_path": "a.rs"}));
        let out = Gatekeeper::evaluate(&cfg(EnforceMode::Block), &classifier(), &r, &i, NOW);
        assert!(out.is_block());
        assert_eq!(out.remediation().unwrap().last_search, LastSearch::Never);
    }

    #[test]
    fn unknown_blocks_warns_or_allows_by_mode() {
        let c = classifier();
        let r = SessionRecord::new("s1");
        let i = input("Write", json!({"file_path": "/a/b/config.yaml"}));

        assert!(Gatekeeper::evaluate(&cfg(EnforceMode::Block), &c, &r, &i, 0).is_block());
        assert!(matches!(
            Gatekeeper::evaluate(&cfg(EnforceMode::Warn), &c, &r, &i, 0),
            GateOutcome::Warn(_)
        ));
        assert_eq!(
            Gatekeeper::evaluate(&cfg(EnforceMode::Off), &c, &r, &i, 0),
            GateOutcome::Allow
        );
    }

    #[test]
    fn stale_remediation_carries_age_and_query() {
        let c = classifier();
        let r = searched_at(1_000);
        let i = input("Edit", json!({"file_path": "src/lib.rs"}));
        let out = Gatekeeper::evaluate(&cfg(EnforceMode::Block), &c, &r, &i, 401_000);
        let rem = out.remediation().unwrap();
        assert_eq!(
            rem.last_search,
            LastSearch::Ago {
                age_ms: 400_000,
                query: Some("logging".into())
            }
        );
        assert_eq!(rem.tool_name, "Edit");
        assert!(rem.suggested_query.starts_with("lib rs update"));
    }

    #[test]
    fn exempt_tools_allow_without_touching_store() {
        let store = InMemorySessionStore::new();
        let c = classifier();
        let out = Gatekeeper::check(
            &cfg(EnforceMode::Block),
            &c,
            &store,
            &input("Bash", json!({"command": "git status"})),
            0,
        );
        assert_eq!(out, GateOutcome::Allow);
        let read = input("Read", json!({}));
        let out = Gatekeeper::check(&cfg(EnforceMode::Block), &c, &store, &read, 0);
        assert_eq!(out, GateOutcome::Allow);
        assert!(store.is_empty());
    }

    #[test]
    fn check_reads_store() {
        let store = InMemorySessionStore::new();
        store.save("s1", &searched_at(1_000));
        let c = classifier();
        let i = input("Bash", json!({"command": "rm -rf build"}));
        assert_eq!(
            Gatekeeper::check(&cfg(EnforceMode::Block), &c, &store, &i, 121_000),
            GateOutcome::Allow
        );
        assert!(Gatekeeper::check(&cfg(EnforceMode::Block), &c, &store, &i, 401_000).is_block());
    }
}
