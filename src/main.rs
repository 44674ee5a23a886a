use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use mint_translator::{
    config::TranslatorConfig, interfaces::interface_table::InterfaceTable,
    interfaces::synthesizer::Observations, observe_source, printer::template::render_script_file, render_error,
    translate_source,
};

/// Translate Mint scripts to C# and synthesize host type interfaces
#[derive(Parser, Debug)]
#[command(name = "mint-translator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// translate every input script into a C# class file
    Translate(TranslateArgs),
    /// derive interface texts for host types from the inputs' call sites
    Interfaces(InterfaceArgs),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// one or more script paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// directory of `<Type>.mint` interface texts
    #[arg(long)]
    interfaces: Option<PathBuf>,

    /// base directory the output tree mirrors (current directory if omitted)
    #[arg(long)]
    root: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TranslateArgs {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output directory
    #[arg(short, long)]
    output: PathBuf,

    /// indentation depth of the printed body
    #[arg(long)]
    depth: Option<usize>,

    /// namespace of the generated classes
    #[arg(long)]
    namespace: Option<String>,
}

#[derive(Args, Debug)]
struct InterfaceArgs {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output directory
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Translate(args) => translate(args),
        Command::Interfaces(args) => synthesize(args),
    }
}

fn translate(args: TranslateArgs) -> anyhow::Result<()> {
    let settings = &args.input_settings;
    let files = resolve_file_path_patterns(&settings.input)?;
    let interfaces = load_interfaces(settings.interfaces.as_deref())?;
    let root = resolve_root(settings.root.as_deref())?;

    let mut config = TranslatorConfig::default();
    if let Some(depth) = args.depth {
        config.initial_depth = depth;
    }
    if let Some(namespace) = &args.namespace {
        config.namespace = namespace.clone();
    }

    let start = Instant::now();
    let results: Vec<(&PathBuf, anyhow::Result<Vec<String>>)> = files
        .par_iter()
        .map(|path| (path, translate_file(path, &root, &args.output, &interfaces, &config)))
        .collect();

    let mut failed = 0;
    for (path, result) in &results {
        match result {
            Ok(script_refs) if !script_refs.is_empty() => {
                debug!("{} references {}", path.display(), script_refs.join(", "));
            }
            Ok(_) => {}
            Err(error) => {
                failed += 1;
                error!("failed to translate {}:\n{:#}", path.display(), error);
            }
        }
    }

    info!("Translated {} files in {:?}", results.len() - failed, start.elapsed());

    if failed > 0 {
        bail!("{} of {} files failed to translate", failed, results.len());
    }
    Ok(())
}

fn translate_file(
    path: &Path,
    root: &Path,
    output: &Path,
    interfaces: &InterfaceTable,
    config: &TranslatorConfig,
) -> anyhow::Result<Vec<String>> {
    let source = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file = display_name(path);

    let translation =
        translate_source(&source, &file, interfaces, config).map_err(|error| anyhow!(render_error(&error, &source)))?;

    let stem = file_stem(path)?;
    let target = output.join(relative_dir(path, root)).join(format!("{}.cs", stem));
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }

    fs::write(&target, render_script_file(config, &stem, &translation.text))
        .with_context(|| format!("failed to write {}", target.display()))?;
    debug!("wrote {}", target.display());

    Ok(translation.script_refs)
}

fn synthesize(args: InterfaceArgs) -> anyhow::Result<()> {
    let settings = &args.input_settings;
    let files = resolve_file_path_patterns(&settings.input)?;
    let interfaces = load_interfaces(settings.interfaces.as_deref())?;

    let start = Instant::now();
    let observations = files
        .par_iter()
        .map(|path| {
            let source = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
            observe_source(&source, &display_name(path), &interfaces)
                .map_err(|error| anyhow!(render_error(&error, &source)))
        })
        .try_reduce(Observations::new, |mut left, right| {
            left.merge(right);
            Ok(left)
        })?;

    info!("Observed {} call sites in {:?}", observations.len(), start.elapsed());

    fs::create_dir_all(&args.output).with_context(|| format!("failed to create {}", args.output.display()))?;
    let rendered = observations.render();
    for (type_name, text) in &rendered {
        let target = args.output.join(format!("{}.mint", type_name));
        fs::write(&target, text).with_context(|| format!("failed to write {}", target.display()))?;
    }

    info!("Wrote {} interfaces to {}", rendered.len(), args.output.display());
    Ok(())
}

/// Reads every `*.mint` file under `directory`, keyed by file stem.
fn load_interfaces(directory: Option<&Path>) -> anyhow::Result<InterfaceTable> {
    let mut table = InterfaceTable::new();
    let Some(directory) = directory else {
        return Ok(table);
    };

    let pattern = directory.join("**").join("*.mint");
    let mut paths = glob::glob(&pattern.to_string_lossy())?.collect::<Result<Vec<_>, _>>()?;
    paths.sort();

    for path in paths {
        let text = fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let type_name = file_stem(&path)?;
        table
            .add_source(&type_name, &text)
            .map_err(|error| anyhow!(render_error(&error, &text)))?;
    }

    info!("Loaded {} interface methods from {}", table.len(), directory.display());
    Ok(table)
}

fn resolve_file_path_patterns(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for pattern in patterns {
        if has_glob_chars(pattern) {
            let matched = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
            if matched.is_empty() {
                bail!("glob pattern matched no files: {}", pattern);
            }
            out.extend(matched);
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    out.sort();
    out.dedup();
    Ok(out)
}

fn resolve_root(root: Option<&Path>) -> anyhow::Result<PathBuf> {
    match root {
        Some(root) => Ok(root.to_path_buf()),
        None => std::env::current_dir().context("failed to read the current directory"),
    }
}

/// Directory of `path` relative to `root`; empty when `path` lies outside it.
fn relative_dir(path: &Path, root: &Path) -> PathBuf {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let parent = std::path::absolute(parent).unwrap_or_else(|_| parent.to_path_buf());
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

    parent.strip_prefix(&root).map(Path::to_path_buf).unwrap_or_default()
}

fn file_stem(path: &Path) -> anyhow::Result<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("{} has no file name", path.display()))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
