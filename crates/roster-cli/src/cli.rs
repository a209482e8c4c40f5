use clap::{Parser, Subcommand};

use crate::commands::{Members, Transfer};

#[derive(Parser, Debug)]
#[clap(name = "roster", version=env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(long, env = "ROSTER_DB", default_value = "members.sqlite3")]
    pub members_db: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage members
    #[clap(subcommand, name = "member")]
    Member(Members),

    /// Move members in and out as CSV
    #[clap(subcommand, name = "transfer")]
    Transfer(Transfer),
}
