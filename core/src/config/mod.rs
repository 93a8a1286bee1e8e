mod load;
mod types;

pub use load::{
    apply_env_overrides, fill_data_dirs, get_recall_data_dir, load_default, load_file,
    load_file_default, load_from_path, log_rejected, ENV_ENFORCE_MODE, ENV_PROFILE,
    ENV_SEARCH_TTL, ENV_STATE_DIR,
};
pub use types::{
    CaptureConfig, CommandRelayConfig, EnforceConfig, HooksConfig, HttpRelayConfig,
    LoggingConfig, PolicyConfig, Profile, RelayConfig, RelayProvider, SessionConfig,
    SessionStoreKind, SuggestConfig, SESSION_TTL_MS, STRICT_TTL_MS,
};
