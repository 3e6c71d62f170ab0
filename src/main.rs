use clap::Parser;
use contextbuddy::config::{self, Config};
use contextbuddy::error::AppError;
use contextbuddy::matcher;
use contextbuddy::models::{ActiveContext, ContentRef};
use contextbuddy::sampler::Sampler;
use contextbuddy::watcher::{WatcherConfig, WatcherService};
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "contextbuddy")]
#[command(about = "Shows a cheat sheet for whatever app has focus")]
struct Args {
    /// Path to the config file (defaults to the per-user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the sampling interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Sample once, print the matching sheet, then exit
    #[arg(long)]
    once: bool,
}

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    Config::ensure(&config_path)?;
    let mut cfg = Config::load(&config_path)?;
    if let Some(interval_ms) = args.interval_ms {
        cfg.poll_interval_ms = interval_ms;
    }
    info!(
        "loaded {} rules from {}",
        cfg.rules.len(),
        config_path.display()
    );

    let rules = Arc::new(cfg.rule_set());
    let sampler = Sampler::new();

    if !sampler.is_supported() {
        warn!(
            "foreground-window detection is not available on this platform; \
             only the fallback sheet will be shown"
        );
    }

    if args.once {
        let context = sampler.sample();
        present(&context, matcher::select(&context, &rules));
        return Ok(());
    }

    let watcher = WatcherService::new(
        Arc::clone(&rules),
        WatcherConfig {
            poll_interval_ms: cfg.poll_interval_ms,
        },
    );
    let handle = watcher.start(sampler, present);

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))?;
    }

    // Reload poll: a touched config file swaps in a fresh rule set; a
    // broken one keeps the previous rules.
    let mut last_modified = config::modified_at(&config_path);
    while running.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(cfg.poll_interval_ms));

        let modified = config::modified_at(&config_path);
        if modified != last_modified {
            last_modified = modified;
            match Config::load(&config_path) {
                Ok(new_cfg) => {
                    watcher.replace_rules(Arc::new(new_cfg.rule_set()));
                    info!("config reloaded ({} rules)", new_cfg.rules.len());
                }
                Err(err) => error!("config reload failed, keeping previous rules: {err}"),
            }
        }
    }

    info!("shutting down");
    watcher.stop();
    if let Err(err) = handle.join() {
        error!("watcher thread panicked: {err:?}");
    }
    Ok(())
}

/// Console presentation: a "process — title" label line plus the opaque
/// sheet payload.
fn present(context: &ActiveContext, content: &ContentRef) {
    println!("\n── {} ──\n{content}", label(context));
}

fn label(context: &ActiveContext) -> String {
    if context.is_empty() {
        return "(no active window)".to_string();
    }

    let title: String = context.window_title.chars().take(48).collect();
    let ellipsis = if context.window_title.chars().count() > 48 {
        "…"
    } else {
        ""
    };
    format!(
        "{}  —  {title}{ellipsis}",
        context.process_name.to_lowercase()
    )
}
