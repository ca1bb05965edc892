use fileman::flags::Flags;
use fileman::logging;
use fileman::process::TerminalState;
use fileman::shell::Shell;
use std::env;

#[tokio::main]
async fn main() -> Result<(), fileman::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("fileman {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init(&flags);

    let terminal = TerminalState::capture();
    let result = async { Shell::new(&flags)?.run().await }.await;
    terminal.restore();
    result?;

    // the line editor thread may still be parked in readline
    std::process::exit(0)
}
