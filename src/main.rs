use async_compat::Compat;
use clap::Parser;
use ghibli_gallery::startup::{self, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    #[cfg(debug_assertions)]
    logger.filter_level(log::LevelFilter::Debug);
    logger.init();

    let cli = Cli::parse();

    // reqwest needs a tokio reactor; Compat provides one under async-std.
    // Errors are printed where they occur.
    match async_std::task::block_on(Compat::new(startup::run(cli))) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
