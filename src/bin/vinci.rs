use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vinci", version)]
struct Cli {
    /// Log at DEBUG level instead of WARN (logs go to stderr).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a program, score it against a target image and print the JSON verdict.
    Judge(JudgeArgs),
    /// Run a program and write the rendered canvas as a PNG.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct CanvasArgs {
    /// Program source file.
    #[arg(long)]
    program: PathBuf,

    /// Initial canvas configuration JSON.
    #[arg(long)]
    initial: Option<PathBuf>,

    /// Source image PNG for image-reference blocks; overrides the configuration's pixels.
    #[arg(long)]
    source: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct JudgeArgs {
    #[command(flatten)]
    canvas: CanvasArgs,

    /// Target image: a PNG, or a `.json` array of `[r, g, b, a]` quadruples.
    #[arg(long)]
    target: PathBuf,

    /// Problem id; ids below 36 use the legacy cost table.
    #[arg(long)]
    problem_id: u32,

    /// Also write the rendered canvas to this PNG.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Rasterize rows in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    canvas: CanvasArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Problem id used to price instructions.
    #[arg(long, default_value_t = 0)]
    problem_id: u32,

    /// Print the final canvas as JSON on stdout.
    #[arg(long)]
    dump_canvas: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Judge(args) => cmd_judge(args),
        Command::Render(args) => cmd_render(args),
    }
}

struct Inputs {
    source: String,
    initial: Option<vinci::InitialConfig>,
}

impl Inputs {
    /// Canvas dimensions the program will run on.
    fn dimensions(&self) -> (u32, u32) {
        match &self.initial {
            Some(cfg) => (cfg.width, cfg.height),
            None => {
                let meta = vinci::ProgramMeta::default();
                (meta.width, meta.height)
            }
        }
    }
}

fn read_inputs(args: &CanvasArgs) -> anyhow::Result<Inputs> {
    let source = std::fs::read_to_string(&args.program)
        .with_context(|| format!("read program '{}'", args.program.display()))?;
    let mut initial = match &args.initial {
        Some(path) => Some(vinci::InitialConfig::from_path(path)?),
        None => None,
    };

    if let Some(path) = &args.source {
        let image = vinci::Frame::from_png_path(path)?;
        let cfg = initial.get_or_insert_with(|| {
            let meta = vinci::ProgramMeta::default();
            vinci::InitialConfig {
                width: meta.width,
                height: meta.height,
                ..vinci::InitialConfig::default()
            }
        });
        if (image.width(), image.height()) != (cfg.width, cfg.height) {
            anyhow::bail!(
                "source image '{}' is {}x{}, canvas is {}x{}",
                path.display(),
                image.width(),
                image.height(),
                cfg.width,
                cfg.height
            );
        }
        cfg.source_png_json = Some(path.display().to_string());
        cfg.source_png_data = Some(image.pixels().to_vec());
    }

    Ok(Inputs { source, initial })
}

fn read_target(path: &Path, width: u32, height: u32) -> anyhow::Result<vinci::Frame> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let frame = if is_json {
        vinci::Frame::from_json_path(path, width, height)?
    } else {
        vinci::Frame::from_png_path(path)?
    };
    Ok(frame)
}

fn write_png(frame: &vinci::Frame, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame.save_png(out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_judge(args: JudgeArgs) -> anyhow::Result<()> {
    let inputs = read_inputs(&args.canvas)?;
    let (width, height) = inputs.dimensions();
    let target = read_target(&args.target, width, height)?;

    let opts = vinci::JudgeOpts {
        problem_id: args.problem_id,
        threading: vinci::RenderThreading {
            parallel: args.parallel,
            threads: args.threads,
        },
    };
    let res = vinci::judge(&inputs.source, inputs.initial.as_ref(), &target, &opts);
    if let Err(e) = &res {
        tracing::debug!(error = %e, "program rejected");
    }

    let report = vinci::JudgeReport::from_result(&res);
    println!("{}", report.to_json()?);

    if let (Ok(outcome), Some(out)) = (&res, &args.out) {
        write_png(&outcome.frame, out)?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let inputs = read_inputs(&args.canvas)?;
    let opts = vinci::InterpreterOpts {
        cost_table: vinci::CostTable::for_problem(args.problem_id),
    };
    let run = vinci::run_program(&inputs.source, inputs.initial.as_ref(), opts)?;
    let frame = vinci::draw(&run.canvas)?;

    write_png(&frame, &args.out)?;
    eprintln!("instruction cost: {}", run.cost);

    if args.dump_canvas {
        let json =
            serde_json::to_string_pretty(&run.canvas).context("serialize canvas as JSON")?;
        println!("{json}");
    }
    Ok(())
}
