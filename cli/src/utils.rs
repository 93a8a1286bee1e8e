use tokio::io::AsyncReadExt;

/// Reads the whole hook payload. An interactive terminal yields an empty payload
/// instead of waiting for input.
pub async fn read_stdin() -> std::io::Result<String> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(String::new());
    }
    let mut buf = String::new();
    tokio::io::stdin().read_to_string(&mut buf).await?;
    Ok(buf)
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
