use super::logging;
use super::print::{
    print_config, print_diagnostics, print_explanations, print_messages, print_status,
    print_templates,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use gitattrs::api::{ConfigAction, FileState, GitattrsApi, GitattrsPaths, MessageLevel};
use gitattrs::config::GitattrsConfig;
use gitattrs::error::{GitattrsError, Result};
use gitattrs::lint::has_errors;
use gitattrs::store::fs::FileStore;
use gitattrs::store::AttributesStore;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overrides the platform config directory.
const CONFIG_DIR_ENV: &str = "GITATTRS_CONFIG_DIR";

struct AppContext {
    api: GitattrsApi<FileStore>,
    cwd: PathBuf,
}

/// Returns the process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut ctx = init_context(&cli.command)?;

    match cli.command {
        Commands::List { json } => handle_list(&ctx, json),
        Commands::Show { template, json } => handle_show(&ctx, template.as_deref(), json),
        Commands::Init {
            dir,
            template,
            force,
        } => handle_init(&mut ctx, dir, template.as_deref(), force),
        Commands::Check { path, json } => handle_check(&ctx, path, json),
        Commands::Status {
            dir,
            template,
            json,
        } => handle_status(&ctx, dir, template.as_deref(), json),
        Commands::Explain {
            paths,
            dir,
            template,
            json,
        } => handle_explain(&ctx, dir, template.as_deref(), &paths, json),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "gitattrs", "gitattrs")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| GitattrsError::Config("could not determine config directory".into()))
}

fn init_context(command: &Commands) -> Result<AppContext> {
    let cwd = std::env::current_dir()?;
    let config_dir = config_dir()?;
    debug!(config_dir = %config_dir.display(), "loading config");

    let config = match GitattrsConfig::load(&config_dir) {
        Ok(config) => config,
        // `config` reloads on its own and can rewrite a broken file
        Err(e) if matches!(command, Commands::Config { .. }) => {
            debug!(error = %e, "config unreadable, deferring to the config command");
            GitattrsConfig::default()
        }
        Err(e) => return Err(e),
    };
    let paths = GitattrsPaths { config_dir };
    let api = GitattrsApi::new(FileStore::new(), paths, config);

    Ok(AppContext { api, cwd })
}

fn resolve_dir(ctx: &AppContext, dir: Option<PathBuf>) -> PathBuf {
    match dir {
        Some(d) if d.is_absolute() => d,
        Some(d) => ctx.cwd.join(d),
        None => ctx.cwd.clone(),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_list(ctx: &AppContext, json: bool) -> Result<i32> {
    let result = ctx.api.list_templates()?;
    if json {
        print_json(&result.templates)?;
    } else {
        print_templates(&result.templates);
    }
    Ok(0)
}

fn handle_show(ctx: &AppContext, template: Option<&str>, json: bool) -> Result<i32> {
    let result = ctx.api.show_template(template)?;
    if json {
        print_json(&result.rules)?;
    } else if let Some(content) = &result.content {
        // Verbatim, so `gitattrs show > .gitattributes` is byte-exact
        print!("{}", content);
    }
    Ok(0)
}

fn handle_init(
    ctx: &mut AppContext,
    dir: Option<PathBuf>,
    template: Option<&str>,
    force: bool,
) -> Result<i32> {
    let dir = resolve_dir(ctx, dir);
    let result = ctx.api.init(&dir, template, force)?;
    print_messages(&result.messages);
    Ok(0)
}

fn handle_check(ctx: &AppContext, path: Option<PathBuf>, json: bool) -> Result<i32> {
    let (source, result) = match path {
        Some(p) if p == Path::new("-") => {
            let mut content = Vec::new();
            std::io::stdin().read_to_end(&mut content)?;
            ("<stdin>".to_string(), ctx.api.check_content("<stdin>", &content)?)
        }
        other => {
            let target = resolve_dir(ctx, other);
            if target.is_dir() {
                let source = ctx.api.store().path(&target).display().to_string();
                (source, ctx.api.check_dir(&target)?)
            } else {
                let content = std::fs::read(&target)?;
                let source = target.display().to_string();
                let result = ctx.api.check_content(&source, &content)?;
                (source, result)
            }
        }
    };

    if json {
        print_json(&result.diagnostics)?;
    } else {
        print_diagnostics(&source, &result.diagnostics);
        print_messages(&result.messages);
    }

    Ok(if has_errors(&result.diagnostics) { 1 } else { 0 })
}

fn handle_status(
    ctx: &AppContext,
    dir: Option<PathBuf>,
    template: Option<&str>,
    json: bool,
) -> Result<i32> {
    let dir = resolve_dir(ctx, dir);
    let result = ctx.api.status(&dir, template)?;

    let Some(report) = &result.status else {
        return Ok(0);
    };
    if json {
        print_json(report)?;
    } else {
        print_messages(&result.messages);
        print_status(report);
    }

    Ok(match report.state {
        FileState::UpToDate | FileState::Equivalent => 0,
        FileState::Missing | FileState::Differs => 1,
    })
}

fn handle_explain(
    ctx: &AppContext,
    dir: Option<PathBuf>,
    template: Option<&str>,
    paths: &[String],
    json: bool,
) -> Result<i32> {
    let dir = resolve_dir(ctx, dir);
    let result = ctx.api.explain(&dir, template, paths)?;
    if json {
        print_json(&result.explanations)?;
    } else {
        print_messages(&result.messages);
        print_explanations(&result.explanations);
    }
    Ok(0)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<i32> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        print_config(config);
    }
    print_messages(&result.messages);

    let failed = result
        .messages
        .iter()
        .any(|m| m.level == MessageLevel::Error);
    Ok(if failed { 1 } else { 0 })
}
