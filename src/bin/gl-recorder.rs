use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gl-recorder", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a JSON-lines capture log into a replayable trace script.
    Compile(CompileArgs),
    /// List the resource kinds that get symbolic names.
    Kinds,
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Input capture log (one JSON call entry per line).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory the trace is saved into.
    #[arg(long)]
    out_dir: PathBuf,

    /// File name of the saved trace.
    #[arg(long, default_value = gl_recorder::DEFAULT_TRACE_FILENAME)]
    filename: String,

    /// Omit the header comment from the script.
    #[arg(long)]
    no_header: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Kinds => {
            for kind in gl_recorder::ResourceKind::ALL {
                println!("{kind}");
            }
            Ok(())
        }
    }
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read capture log '{}'", args.in_path.display()))?;
    let entries = gl_recorder::parse_log(&text)?;

    let mut opts = gl_recorder::RecorderOpts::default().with_download_filename(args.filename);
    if args.no_header {
        opts = opts.with_header_comment(None);
    }

    let gl = gl_recorder::replay_log(&entries, opts)?;
    let mut host = gl_recorder::DirectoryDownloadHost::new(&args.out_dir);
    gl.download_trace(&mut host);

    let Some(path) = host.saved().first() else {
        anyhow::bail!("trace was not written to '{}'", args.out_dir.display());
    };
    eprintln!(
        "wrote {} ({} statements, {} handles)",
        path.display(),
        gl.trace().len(),
        gl.registry().len()
    );
    Ok(())
}
