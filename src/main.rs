use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use efes::{DEFAULT_CONTAINER_PATH, FileSystem, Shell};

mod logger;

#[derive(Parser)]
#[command(about = "Browse an efes container from an interactive shell")]
struct Args {
    /// Container image to load
    #[arg(short, long, default_value = DEFAULT_CONTAINER_PATH)]
    image: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_logger(args.verbose);

    let fs = match FileSystem::load(&args.image) {
        Ok(fs) => fs,
        Err(e) => {
            eprintln!("error: could not load {}: {}", args.image.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    if let Err(e) = Shell::new(&fs).run(stdin.lock(), io::stdout()) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
