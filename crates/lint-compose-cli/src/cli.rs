use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::json;

use lint_compose::{
    config::load_fragments, project_overrides, ComposeError, ComposedConfig, Composer,
    ConfigFragment, JsonFileProvider, ProviderError, DEFAULT_BASE_CONFIG_FILENAME,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Files to print the effective configuration for.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Directory that `files` patterns are relative to. Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Base rule set (JSON). Defaults to <root>/lint.base.json when present.
    #[arg(long, value_name = "FILE")]
    pub base: Option<PathBuf>,

    /// Extra override fragments (JSON), applied after the project overrides.
    #[arg(long = "overrides", value_name = "FILE")]
    pub overrides: Vec<PathBuf>,

    /// Skip the built-in documentation overrides.
    #[arg(long)]
    pub no_project_overrides: bool,

    /// Print only this rule's setting.
    #[arg(long, value_name = "ID")]
    pub rule: Option<String>,
}

#[repr(i32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExitCode {
    Ok = 0,
    ConfigError = 1,
    OtherError = 2,
}

/// Run CLI processing and return `Ok(())` or an `ExitCode` on error.
pub fn run(cli: Cli) -> Result<(), ExitCode> {
    let root = match cli.root {
        Some(ref root) => root.clone(),
        None => env::current_dir().map_err(|err| {
            eprintln!("error: failed to get cwd: {err}");
            ExitCode::OtherError
        })?,
    };

    // 1) Base provider
    let provider = match cli.base {
        Some(ref path) => JsonFileProvider::new(path.clone()),
        None => JsonFileProvider::optional(root.join(DEFAULT_BASE_CONFIG_FILENAME)),
    };

    // 2) Overrides, in order
    let mut overrides: Vec<ConfigFragment> = Vec::new();
    if !cli.no_project_overrides {
        overrides.extend(project_overrides());
    }
    for path in &cli.overrides {
        let fragments = load_fragments(path).map_err(|err| {
            eprintln!("error: {err}");
            ExitCode::ConfigError
        })?;
        overrides.extend(fragments);
    }

    // 3) Compose
    let config = Composer::new()
        .root(root.clone())
        .extend(overrides)
        .build(&provider)
        .map_err(report_compose_error)?;
    tracing::info!(
        "composed {} fragment(s) rooted at {}",
        config.fragments().len(),
        root.display()
    );

    // 4) Output
    let mut stdout = io::stdout().lock();
    for path in &cli.paths {
        let target = if path.is_absolute() {
            path.clone()
        } else {
            root.join(path)
        };
        let line = render(&config, path, &target, cli.rule.as_deref());
        writeln!(stdout, "{line}").map_err(|_| ExitCode::OtherError)?;
    }
    stdout.flush().map_err(|_| ExitCode::OtherError)?;

    Ok(())
}

fn render(config: &ComposedConfig, display: &Path, target: &Path, rule: Option<&str>) -> String {
    if let Some(rule) = rule {
        let setting = match config.setting_for(target, rule) {
            Some(setting) => serde_json::to_string(&setting).unwrap_or_default(),
            None => "unset".to_string(),
        };
        return format!("{}: {}", display.display(), setting);
    }

    let resolved = config.resolve(target);
    json!({
        "path": display.display().to_string(),
        "ignored": config.is_ignored(target),
        "rules": resolved.rules,
    })
    .to_string()
}

fn report_compose_error(err: ComposeError) -> ExitCode {
    eprintln!("error: {err}");
    match err {
        ComposeError::Provider(ProviderError::Other(_)) => ExitCode::OtherError,
        ComposeError::Provider(ProviderError::Config(_)) | ComposeError::Glob { .. } => {
            ExitCode::ConfigError
        }
    }
}
