use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("invalid hook input: {0}")]
    Input(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("relay error: {0}")]
    Relay(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<serde_json::Value, HookError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[test]
    fn json_errors_convert_to_input() {
        let err = parse("{not json").unwrap_err();
        assert!(matches!(err, HookError::Input(_)));
        assert!(err.to_string().starts_with("invalid hook input: "));
    }

    #[test]
    fn service_errors_keep_their_message() {
        let err = HookError::Storage("state dir is read-only".into());
        assert_eq!(err.to_string(), "storage error: state dir is read-only");
        let err = HookError::Relay("unknown provider".into());
        assert_eq!(err.to_string(), "relay error: unknown provider");
    }
}
