use super::print::{print_assets, print_config, print_files, print_history, print_messages};
use crate::args::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use mediavar::api::{ConfigAction, MediaApi, MediaPaths};
use mediavar::config::MediaConfig;
use mediavar::disk::fs::FsDisk;
use mediavar::disk::DiskSet;
use mediavar::error::{MediaError, Result};
use mediavar::model::AssetKind;
use mediavar::store::fs::FileStore;
use std::path::PathBuf;
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "MEDIAVAR_HOME";
const LOG_ENV: &str = "MEDIAVAR_LOG";

struct AppContext {
    api: MediaApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context()?;

    match cli.command {
        Commands::Add { path, disk, kind } => handle_add(&mut ctx, path, disk, kind),
        Commands::List { disk } => handle_list(&ctx, disk),
        Commands::Move {
            asset,
            directory,
            name,
        } => handle_move(&mut ctx, asset, directory, name),
        Commands::Paths { asset, recipe } => handle_paths(&ctx, asset, recipe),
        Commands::History { asset } => handle_history(&ctx, asset),
        Commands::Record {
            asset,
            recipe,
            strict,
        } => handle_record(&ctx, asset, recipe, strict),
        Commands::Purge { asset } => handle_purge(&ctx, asset),
        Commands::Config {
            key,
            value,
            disk,
            root,
        } => handle_config(&ctx, key, value, disk, root),
    }
}

fn init_tracing(verbose: u8) {
    let level_filter = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    let proj_dirs = ProjectDirs::from("com", "mediavar", "mediavar").ok_or_else(|| {
        MediaError::Api(format!(
            "could not determine a data directory; set {}",
            HOME_ENV
        ))
    })?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn init_context() -> Result<AppContext> {
    let data_dir = data_dir()?;
    let config = MediaConfig::load(&data_dir)?;
    debug!(data_dir = %data_dir.display(), "loaded config");

    let mut disks = DiskSet::new();
    for (name, root) in config.disk_roots(&data_dir) {
        disks.insert(&name, FsDisk::new(root));
    }

    let store = FileStore::new(data_dir.clone());
    let paths = MediaPaths { data_dir };
    let api = MediaApi::new(store, disks, config, paths);

    Ok(AppContext { api })
}

fn handle_add(
    ctx: &mut AppContext,
    path: String,
    disk: Option<String>,
    kind: Option<AssetKind>,
) -> Result<()> {
    let result = ctx.api.add_asset(disk.as_deref(), &path, kind)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext, disk: Option<String>) -> Result<()> {
    let result = ctx.api.list_assets(disk.as_deref())?;
    print_assets(&result.listed_assets);
    print_messages(&result.messages);
    Ok(())
}

fn handle_move(
    ctx: &mut AppContext,
    asset: String,
    directory: String,
    name: Option<String>,
) -> Result<()> {
    let result = ctx.api.move_asset(&asset, &directory, name.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_paths(ctx: &AppContext, asset: String, recipe: Option<String>) -> Result<()> {
    let result = match recipe {
        Some(recipe) => ctx.api.variant_path(&asset, &recipe)?,
        None => ctx.api.asset_files(&asset)?,
    };
    print_files(&result.files);
    print_messages(&result.messages);
    Ok(())
}

fn handle_history(ctx: &AppContext, asset: String) -> Result<()> {
    let result = ctx.api.history(&asset)?;
    print_history(&result.history);
    print_messages(&result.messages);
    Ok(())
}

fn handle_record(ctx: &AppContext, asset: String, recipe: String, strict: bool) -> Result<()> {
    let result = ctx.api.record_variant(&asset, &recipe, strict)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_purge(ctx: &AppContext, asset: String) -> Result<()> {
    let result = ctx.api.purge_variants(&asset)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(
    ctx: &AppContext,
    key: Option<String>,
    value: Option<String>,
    disk: Option<String>,
    root: Option<PathBuf>,
) -> Result<()> {
    let action = match (disk, root, key, value) {
        (Some(name), Some(root), _, _) => ConfigAction::SetDisk(name, root),
        (_, _, Some(k), Some(v)) => ConfigAction::Set(k, v),
        (_, _, Some(k), None) => ConfigAction::ShowKey(k),
        _ => ConfigAction::ShowAll,
    };

    let result = ctx.api.config(action)?;
    if result.messages.is_empty() {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
