//! Replays page events against the headless carousels and prints snapshots.
//!
//! Examples:
//!   echo "next galerie\nstate" | vitrine-sim
//!   vitrine-sim --config page.json --width 800 --slides 5 < script.txt
//!   vitrine-sim --print-config

use std::io::Read;
use std::process;

use tracing::Level;
use vitrine::config::PageConfig;
use vitrine::sim::{parse_script, Simulator};

struct Args {
    config: Option<String>,
    width: f64,
    slides: usize,
    verbose: bool,
    print_config: bool,
}

fn usage() -> ! {
    eprintln!("vitrine-sim (reads an event script on stdin)");
    eprintln!("Usage: vitrine-sim [options]\n");
    eprintln!("Options:");
    eprintln!("  --config <file>     Page configuration JSON (default: built-in page)");
    eprintln!("  --width <px>        Initial viewport width (default 1200)");
    eprintln!("  --slides <n>        Slides per carousel (default 7)");
    eprintln!("  --print-config      Print the effective configuration and exit");
    eprintln!("  -v                  Debug logging on stderr\n");
    eprintln!("Script commands:");
    eprintln!("  resize <px> | prev|next <group> | goto|dot|click <group> <i>");
    eprintln!("  key <name> | overlay | close | lb-prev | lb-next");
    eprintln!("  enter|leave|tick <group> | wait <ms> | state");
    process::exit(2);
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    process::exit(2);
}

fn parse_args() -> Args {
    let mut args = Args {
        config: None,
        width: 1200.0,
        slides: 7,
        verbose: false,
        print_config: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--config" => args.config = Some(it.next().unwrap_or_else(|| usage())),
            "--width" => {
                args.width = it
                    .next()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(|| fail("--width must be a number"));
            }
            "--slides" => {
                args.slides = it
                    .next()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(|| fail("--slides must be a non-negative integer"));
            }
            "--print-config" => args.print_config = true,
            "-v" | "--verbose" => args.verbose = true,
            "-h" | "--help" => usage(),
            _ => usage(),
        }
    }
    args
}

fn main() {
    let args = parse_args();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .unwrap_or_else(|e| fail(format!("read {path}: {e}")));
            PageConfig::from_json_str(&raw).unwrap_or_else(|e| fail(e))
        }
        None => PageConfig::default(),
    };

    if args.print_config {
        match config.to_json_pretty() {
            Ok(raw) => println!("{raw}"),
            Err(e) => fail(format!("encode config: {e}")),
        }
        return;
    }

    let mut src = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut src) {
        fail(format!("read stdin: {e}"));
    }
    let script = parse_script(&src).unwrap_or_else(|e| fail(e));

    let mut sim = Simulator::new(&config, args.width, args.slides);
    for snap in sim.run(&script) {
        match serde_json::to_string(&snap) {
            Ok(line) => println!("{line}"),
            Err(e) => fail(format!("encode snapshot: {e}")),
        }
    }
}
