use std::io;

use color_eyre::Result;
use topsh::{process::launcher::ignore_interactive_signals, Config, OsFilesystem, State};
use tracing_subscriber::prelude::*;

#[macro_use]
extern crate tracing;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let (writer, _guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        config.log_dir(),
        "topsh.log",
    ));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_error::ErrorLayer::default())
        .init();

    color_eyre::install()?;

    trace!(?config, "starting shell");

    ignore_interactive_signals()?;

    let mut state = State::new(&config, OsFilesystem)?;

    state.run(io::stdin().lock(), io::stdout().lock())?;

    trace!("shell finished");

    Ok(())
}
