use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Arg, ArgAction, Command, error::ErrorKind};
use locale_sync::config::{
    DEFAULT_CACHE_PATH, DEFAULT_MESSAGES_ROOT, DEFAULT_PROVIDER, DEFAULT_SOURCE_LOCALE,
};
use locale_sync::{SyncConfig, run_sync};
use locale_sync_mt::{PROVIDER_NAMES, create_provider};
use tracing_subscriber::EnvFilter;

fn command() -> Command {
    Command::new("locale-sync")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sync translated message files with the source locale")
        .arg(
            Arg::new("locales")
                .long("locales")
                .short('l')
                .help("Target locales to generate or update (comma separated)")
                .value_delimiter(',')
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("source")
                .long("source")
                .short('s')
                .help("Source locale")
                .default_value(DEFAULT_SOURCE_LOCALE),
        )
        .arg(
            Arg::new("messages-root")
                .long("messages-root")
                .short('r')
                .help("Directory searched for source-locale message files")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(DEFAULT_MESSAGES_ROOT),
        )
        .arg(
            Arg::new("provider")
                .long("provider")
                .short('p')
                .help(format!(
                    "Translation provider ({})",
                    PROVIDER_NAMES.join(", ")
                ))
                .default_value(DEFAULT_PROVIDER),
        )
        .arg(
            Arg::new("cache")
                .long("cache")
                .short('c')
                .help("Path of the translation cache file")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(DEFAULT_CACHE_PATH),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .short('n')
                .help("Merge and report without writing files or calling the provider")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("preserve-key")
                .long("preserve-key")
                .help("Additional key whose values are copied, never translated (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log per-string decisions")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let matches = match command().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_tracing(matches.get_flag("verbose"));

    let mut config = SyncConfig::default().with_locales(
        matches
            .get_many::<String>("locales")
            .into_iter()
            .flatten()
            .cloned(),
    );
    if let Some(source) = matches.get_one::<String>("source") {
        config.source_locale = source.clone();
    }
    if let Some(root) = matches.get_one::<PathBuf>("messages-root") {
        config.messages_root = root.clone();
    }
    if let Some(provider) = matches.get_one::<String>("provider") {
        config.provider = provider.clone();
    }
    if let Some(cache) = matches.get_one::<PathBuf>("cache") {
        config.cache_path = cache.clone();
    }
    config.dry_run = matches.get_flag("dry-run");
    config
        .preserved_keys
        .extend(matches.get_many::<String>("preserve-key").into_iter().flatten().cloned());

    // Fail on configuration before touching providers or files.
    if let Err(e) = config.target_locales() {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    let provider = create_provider(&config.provider);

    match run_sync(&config, provider.as_ref()).await {
        Ok(report) => {
            for locale in &report.locales {
                println!("{}: {}", locale.locale, locale.stats);
            }
            if config.dry_run {
                println!("dry run: no files or cache written");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
