use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "algoscene", version)]
struct Cli {
    /// Compiler config JSON (defaults are used for missing fields).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Narrative level: kids, beginner, intermediate or advanced.
    #[arg(long, global = true)]
    level: Option<algoscene::NarrativeLevel>,

    /// Log more (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile one algorithm into a scene.
    Scene(SceneArgs),
    /// Compile several algorithms and compose them into one scene.
    Course(CourseArgs),
    /// List the algorithm keys the compiler understands.
    List,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Algorithm key, e.g. `bubble_sort` or `bfs`.
    kind: algoscene::AlgorithmKind,

    /// Explicit input JSON, e.g. `{"input": "array", "values": [5, 3, 8]}`.
    #[arg(long)]
    input: Option<String>,

    /// Seed for sampled inputs.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct CourseArgs {
    /// Algorithm keys, composed in order.
    #[arg(required = true)]
    kinds: Vec<algoscene::AlgorithmKind>,

    /// Title card text; no intro when omitted.
    #[arg(long)]
    title: Option<String>,

    /// Seed for sampled inputs (scene `i` uses `seed + i`).
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.level)?;
    match cli.cmd {
        Command::Scene(args) => cmd_scene(config, args),
        Command::Course(args) => cmd_course(config, args),
        Command::List => cmd_list(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(
    path: Option<&Path>,
    level: Option<algoscene::NarrativeLevel>,
) -> anyhow::Result<algoscene::CompilerConfig> {
    let mut config = match path {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("open config '{}'", path.display()))?;
            algoscene::CompilerConfig::from_reader(BufReader::new(f))
                .with_context(|| format!("load config '{}'", path.display()))?
        }
        None => level
            .map(algoscene::CompilerConfig::for_level)
            .unwrap_or_default(),
    };
    if let Some(level) = level {
        config.level = level;
    }
    Ok(config)
}

fn cmd_scene(config: algoscene::CompilerConfig, args: SceneArgs) -> anyhow::Result<()> {
    let compiler = algoscene::Compiler::new(config)?;
    let mut request = algoscene::SceneRequest::new(args.kind).with_seed(args.seed);
    if let Some(raw) = &args.input {
        let input: algoscene::AlgorithmInput =
            serde_json::from_str(raw).with_context(|| "parse --input JSON")?;
        request = request.with_input(input);
    }
    let scene = compiler.compile(&request)?;
    write_scene(&scene, args.out.as_deref(), args.pretty)
}

fn cmd_course(config: algoscene::CompilerConfig, args: CourseArgs) -> anyhow::Result<()> {
    let compiler = algoscene::Compiler::new(config)?;
    let requests: Vec<algoscene::SceneRequest> = args
        .kinds
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            algoscene::SceneRequest::new(kind).with_seed(args.seed.wrapping_add(i as u64))
        })
        .collect();
    let scene = compiler.course(args.title.as_deref(), &requests)?;
    write_scene(&scene, args.out.as_deref(), args.pretty)
}

fn cmd_list() -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    for kind in algoscene::StepperRegistry::global().kinds() {
        writeln!(stdout, "{kind}")?;
    }
    Ok(())
}

fn write_scene(scene: &algoscene::Scene, out: Option<&Path>, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        scene.to_json_pretty()?
    } else {
        scene.to_json()?
    };
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!(
                "wrote {} ({})",
                path.display(),
                algoscene::fingerprint_scene(scene)
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
