use clap::Parser;
use fil_codec::{command, setup_logger, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.log_level)?;

    // The oracle's output is read verbatim by the test harness: no newline.
    let raw = matches!(cli.command, command::Command::Oracle { .. });
    let out = command::handle_command(cli.command, cli.network.into())?;
    if raw {
        print!("{out}");
    } else {
        println!("{out}");
    }
    Ok(())
}
