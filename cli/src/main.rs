use std::io::Write;

use clap::Parser;
use recall_cli::commands::cli::{self, Commands};
use recall_cli::commands::hooks::{self, HookReply};
use recall_cli::utils::{now_ms, read_stdin};
use recall_core::api::{AppContext, HooksConfig, LoggingConfig};
use recall_core::config::{
    apply_env_overrides, fill_data_dirs, get_recall_data_dir, load_file, load_file_default,
    log_rejected,
};
use recall_plugins::services::PluginServicesFactory;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    let (mut cfg, load_err) = match &args.config {
        Some(path) => split_load(load_file(path)),
        None => split_load(load_file_default()),
    };

    let log_guard = match init_tracing(&cfg.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("recall-hooks: logging disabled: {e}");
            None
        }
    };
    if let Some(e) = load_err {
        tracing::warn!(target: "recall.hooks", "config load failed, using defaults: {}", e);
    }
    // Environment, then flags. Neither touches `logging`; applied once the
    // subscriber exists so rejected overrides reach the log.
    log_rejected(&apply_env_overrides(&mut cfg, |k| std::env::var(k).ok()));
    args.apply_overrides(&mut cfg);

    // 0: allow (also every internal failure)
    // 2: block, reason on stderr
    let exit = match real_main(args.command, cfg).await {
        Ok(reply) => emit(reply),
        Err(e) => {
            tracing::warn!(target: "recall.hooks", "hook failed, allowing: {:#}", e);
            0
        }
    };

    // Flush buffered file logs before exiting.
    drop(log_guard);
    std::process::exit(exit);
}

async fn real_main(cmd: Commands, cfg: HooksConfig) -> anyhow::Result<HookReply> {
    let ctx = AppContext::new(cfg, &PluginServicesFactory)?;
    dispatch(cmd, &ctx).await
}

/// A broken config file still yields a usable config: the defaults.
fn split_load(res: anyhow::Result<HooksConfig>) -> (HooksConfig, Option<String>) {
    match res {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            let mut cfg = HooksConfig::default();
            if let Ok(dir) = get_recall_data_dir() {
                fill_data_dirs(&mut cfg, &dir);
            }
            (cfg, Some(format!("{e:#}")))
        }
    }
}

async fn dispatch(cmd: Commands, ctx: &AppContext) -> anyhow::Result<HookReply> {
    let reply = match cmd {
        Commands::Track => hooks::track(ctx, &read_stdin().await?, now_ms()),
        Commands::Gate => hooks::gate(ctx, &read_stdin().await?, now_ms()),
        Commands::Enforce => hooks::enforce_hook(ctx, &read_stdin().await?, now_ms()),
        Commands::PromptReminder => hooks::prompt_reminder(&read_stdin().await?),
        Commands::CapturePrompt => hooks::capture_prompt(ctx, &read_stdin().await?).await,
        Commands::Publish(p) => hooks::publish(ctx, p.kind.into(), &read_stdin().await?).await,
        Commands::Inspect(i) => hooks::inspect(ctx, &i.session)?,
    };
    Ok(reply)
}

fn emit(reply: HookReply) -> i32 {
    if let Some(out) = reply.stdout {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{out}");
        let _ = stdout.flush();
    }
    if let Some(err) = reply.stderr {
        let _ = writeln!(std::io::stderr().lock(), "{err}");
    }
    reply.exit_code
}

fn init_tracing(logging: &LoggingConfig) -> Result<Option<WorkerGuard>, String> {
    if !logging.enabled {
        return Ok(None);
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;
    let mut guard = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("recall-hooks"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let appender = tracing_appender::rolling::daily(dir, "recall-hooks.log");
        let (non_blocking, g) = tracing_appender::non_blocking(appender);
        guard = Some(g);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Ok(None);
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok(guard)
}
