use bitbased::cli::{run, stderr_log_config, Settings};
use log::LevelFilter;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging();
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = Settings::from_env()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&args, &settings, &mut out) {
        eprintln!("{e}");
        std::process::exit(2);
    }
    Ok(())
}

/// Log config from `log4rs.yml`, or warnings to stderr when the file is missing.
fn init_logging() {
    if log4rs::init_file("log4rs.yml", Default::default()).is_ok() {
        return;
    }
    let fallback = stderr_log_config(LevelFilter::Warn)
        .and_then(|config| log4rs::init_config(config).map_err(|e| e.into()));
    if let Err(e) = fallback {
        eprintln!("Error initializing log4rs: {e}");
    }
}
