use narwhal::parallax::ParallaxOptions;
use narwhal::svg::{SvgOptions, render_svg};
use narwhal::{LayoutRequest, Point, TiltSample, apply_parallax};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(narwhal::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<narwhal::Error> for CliError {
    fn from(value: narwhal::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Render,
    Parallax,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    index: Option<u64>,
    out: Option<String>,
    card_id: Option<String>,
    roll: f64,
    pitch: f64,
    inactive: bool,
}

#[derive(Serialize)]
struct TiltedBubble<'a> {
    image_id: &'a str,
    diameter: f64,
    center: Point,
    tilted: Point,
}

fn usage() -> &'static str {
    "narwhal-cli\n\
\n\
USAGE:\n\
  narwhal-cli [layout] [--pretty] [--index <n>] [<path>|-]\n\
  narwhal-cli render [--index <n>] [--id <card-id>] [--out <path>] [<path>|-]\n\
  narwhal-cli parallax --roll <r> --pitch <p> [--inactive] [--index <n>] [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the layout request JSON is read from stdin.\n\
  - --index overrides the request's card index.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - Set NARWHAL_LOG (e.g. NARWHAL_LOG=debug) to see placement fallbacks on stderr.\n\
"
}

fn parse_f64(value: Option<&String>) -> Result<f64, CliError> {
    let Some(value) = value else {
        return Err(CliError::Usage(usage()));
    };
    let v = value.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if !v.is_finite() {
        return Err(CliError::Usage(usage()));
    }
    Ok(v)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "parallax" => args.command = Command::Parallax,
            "--pretty" => args.pretty = true,
            "--inactive" => args.inactive = true,
            "--index" => {
                let Some(index) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.index = Some(index.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--roll" => args.roll = parse_f64(it.next())?,
            "--pitch" => args.pitch = parse_f64(it.next())?,
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.card_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut request = LayoutRequest::from_json(&text)?;
    if let Some(index) = args.index {
        request.index = index;
    }

    let result = narwhal::layout(&request)?;
    if !result.dropped.is_empty() {
        tracing::warn!(dropped = ?result.dropped, "some bubbles could not be placed");
    }

    match args.command {
        Command::Layout => write_json(&result, args.pretty),
        Command::Render => {
            let svg_options = SvgOptions {
                card_id: args.card_id.clone(),
                ..Default::default()
            };
            let svg = render_svg(&result, &svg_options);
            write_text(&svg, args.out.as_deref())
        }
        Command::Parallax => {
            let tilt = TiltSample::new(args.roll, args.pitch);
            let tilted = apply_parallax(
                &result.placed,
                tilt,
                result.container,
                !args.inactive,
                &ParallaxOptions::default(),
            );
            let out: Vec<TiltedBubble<'_>> = result
                .placed
                .iter()
                .zip(tilted)
                .map(|(b, p)| TiltedBubble {
                    image_id: &b.image_id,
                    diameter: b.diameter,
                    center: b.center,
                    tilted: p,
                })
                .collect();
            write_json(&out, args.pretty)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("NARWHAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
