// src/main.rs
//
// svgshade — wraps shade-glyph runs in SVG logo text
//
// - Only lines carrying a `<text x=...>` element are rewritten; every other line
//   is copied byte for byte, line terminators included.
// - Inside the text element, runs of the marker glyph (default '░') are wrapped in
//   `<tspan class="shade">`; other characters are copied unchanged.
// - Existing `<tspan>` wrappers are unwrapped first, so reruns are no-ops.
// - Malformed text lines are copied through, never reported.
// - The input file is never overwritten; the output goes to `<stem>-updated.<ext>`
//   unless an output path is given.
//
// CLI flags:
//   --marker <CHAR> : glyph to wrap (default '░')
//   --class <NAME>  : class attribute of the wrapper (default "shade")
//   -v, --verbose   : report rewritten lines

#[macro_use]
mod logger;
mod error;
mod shade;

use clap::{ArgAction, Parser};
use error::ShadeError;
use memchr::memchr2;
use shade::{process_line, ShadeStyle, DEFAULT_CLASS, DEFAULT_MARKER};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// CLI flags
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Glyph whose runs get wrapped
    #[arg(long, default_value_t = DEFAULT_MARKER)]
    marker: char,

    /// Class attribute of the wrapping tspan
    #[arg(long, default_value = DEFAULT_CLASS)]
    class: String,

    /// Report each rewritten line
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Input SVG file
    input: PathBuf,

    /// Output file (default: <input stem>-updated.<ext>)
    output: Option<PathBuf>,
}

/// Outcome of a successful run.
struct Report {
    output: PathBuf,
    lines: usize,
    rewritten: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            debug!("shade"; "{} of {} lines rewritten", report.rewritten, report.lines);
            logger::success(&format!("Successfully processed {}", cli.input.display()));
            logger::success(&format!("Output written to {}", report.output.display()));
            println!("\nTo replace the original file, run:");
            println!("  mv {} {}", report.output.display(), cli.input.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            logger::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Report, ShadeError> {
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input));

    let src = read_input(&cli.input)?;
    debug!("read"; "{} ({} bytes)", cli.input.display(), src.len());
    if same_file(&cli.input, &output) {
        return Err(ShadeError::SameFile(output));
    }

    let style = ShadeStyle::new(cli.marker, &cli.class);
    debug!("shade"; "wrapping '{}' runs in class \"{}\"", style.marker(), cli.class);
    let (out, lines, rewritten) = transform(&src, &style);

    fs::write(&output, out).map_err(|e| ShadeError::Write(output.clone(), e))?;
    debug!("write"; "{}", output.display());

    Ok(Report {
        output,
        lines,
        rewritten,
    })
}

/// `dir/logo.svg` → `dir/logo-updated.svg`
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}-updated.{}", ext.to_string_lossy()),
        None => format!("{stem}-updated"),
    };
    input.with_file_name(name)
}

/// True when both paths name the same existing file, however they are spelled.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn read_input(path: &Path) -> Result<String, ShadeError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ShadeError::NotFound(path.to_path_buf()),
        _ => ShadeError::Read(path.to_path_buf(), e),
    })?;
    String::from_utf8(bytes).map_err(|_| ShadeError::Decode(path.to_path_buf()))
}

/* ============================== Transform =============================== */

/// Rewrite every line of `src` in order. Returns the new text, the line count
/// and the number of lines that changed.
fn transform(src: &str, style: &ShadeStyle) -> (String, usize, usize) {
    let mut out = String::with_capacity(src.len() + src.len() / 4);
    let mut lines = 0usize;
    let mut rewritten = 0usize;

    for (n, line) in split_lines(src).enumerate() {
        lines += 1;
        match process_line(line, style) {
            Cow::Borrowed(same) => out.push_str(same),
            Cow::Owned(new) => {
                rewritten += 1;
                debug!("shade"; "line {}: {}", n + 1, new.trim_end());
                out.push_str(&new);
            }
        }
    }
    (out, lines, rewritten)
}

/// Split after each `\n`, `\r\n` or lone `\r`, keeping the terminators.
fn split_lines(src: &str) -> impl Iterator<Item = &str> + '_ {
    let bytes = src.as_bytes();
    let mut start = 0usize;
    std::iter::from_fn(move || {
        if start >= bytes.len() {
            return None;
        }
        let rest = &bytes[start..];
        let end = match memchr2(b'\n', b'\r', rest) {
            Some(i) if rest[i] == b'\r' && rest.get(i + 1) == Some(&b'\n') => start + i + 2,
            Some(i) => start + i + 1,
            None => bytes.len(),
        };
        let line = &src[start..end];
        start = end;
        Some(line)
    })
}
