use std::process::ExitCode;

use log::*;

use injector::DryRunInjector;
use sequence::Outcome;

mod contact;
mod error;
mod injector;
mod sequence;

cfg_if::cfg_if! {
    if #[cfg(target_os = "windows")] {
        mod win32;

        fn run_native(args: &Args) -> Outcome {
            let mut injector = win32::Win32Injector::new(args.dpi_aware);
            sequence::run(&mut injector)
        }
    } else {
        fn run_native(args: &Args) -> Outcome {
            if args.dpi_aware {
                debug!("--dpi-aware has no effect on this platform");
            }
            sequence::report(&error::SimulationError::Unsupported, &mut std::io::stderr()).ok();
            Outcome::InitializationFailed
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    dry_run: bool,
    /// Opt into per-monitor DPI awareness before initializing.
    dpi_aware: bool,
    ignored: Vec<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Args {
    let mut parsed = Args::default();
    for arg in args {
        match arg.as_str() {
            "--dry-run" => parsed.dry_run = true,
            "--dpi-aware" => parsed.dpi_aware = true,
            _ => parsed.ignored.push(arg),
        }
    }
    parsed
}

fn main() -> ExitCode {
    pretty_env_logger::init_timed();

    let args = parse_args(std::env::args().skip(1));
    for arg in &args.ignored {
        eprintln!("Ignoring unknown argument {arg}");
    }
    debug!("Running with {args:?}");

    let outcome = if args.dry_run {
        let mut injector = DryRunInjector::new();
        let outcome = sequence::run(&mut injector);
        info!("[dry run] {} contacts printed", injector.injected());
        outcome
    } else {
        run_native(&args)
    };

    if let Outcome::Aborted { step } = outcome {
        info!("Sequence stopped at step {}", step + 1);
    }

    ExitCode::from(outcome.exit_code())
}
