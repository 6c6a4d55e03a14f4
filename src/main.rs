// src/main.rs

use iniconf::errors::ConfigError;
use iniconf::{cli, logging, run};

fn main() {
    if let Err(err) = run_main() {
        eprintln!("iniconf error: {err:#}");
        let code = err
            .downcast_ref::<ConfigError>()
            .map(ConfigError::code)
            .filter(|code| *code != 0)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args)
}
