use anyhow::Result;

use roster_cli::cli::{Cli, Command};
use roster_db::Connection;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::init();

    let conn = Connection::open(&cli.members_db).await?;
    match cli.command {
        Command::Member(cmd) => cmd.run(&conn).await,
        Command::Transfer(cmd) => cmd.run(&conn).await,
    }?;

    Ok(())
}
