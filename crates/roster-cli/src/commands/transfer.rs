use std::fs;

use anyhow::Result;
use clap::{Args, Subcommand};
use inquire::Confirm;

use roster_db::Connection;
use roster_transfer::{export_members, import_members, TransferError};

#[derive(Subcommand, Debug)]
pub enum Transfer {
    /// Write all members to a CSV file
    Export(ExportMembers),
    /// Merge members from a CSV file
    Import(ImportMembers),
}

impl Transfer {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Transfer::Export(cmd) => cmd.run(db).await,
            Transfer::Import(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExportMembers {
    #[clap(short, long)]
    pub file: String,
}

impl ExportMembers {
    /// Run the command and export all members
    pub async fn run(self, db: &Connection) -> Result<()> {
        let data = export_members(db).await?;
        fs::write(&self.file, &data)?;
        println!("Exported members to {}.", self.file);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ImportMembers {
    #[clap(short, long)]
    pub file: String,
}

impl ImportMembers {
    /// Run the command and merge members from a CSV file
    pub async fn run(self, db: &Connection) -> Result<()> {
        let data = fs::read_to_string(&self.file)?;

        let prompt_text = format!("Import members from {}?", self.file);
        let confirm = Confirm::new(&prompt_text).with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        match import_members(db, &data).await {
            Ok(report) => {
                println!("Imported {} members.", report.imported);
                if !report.skipped.is_empty() {
                    println!();
                    println!("Skipped numbers already in use:");
                    for number in report.skipped {
                        println!("  {}", number);
                    }
                }
                Ok(())
            }
            Err(TransferError::PartialImport {
                staged,
                committed,
                source,
            }) => {
                println!("Import aborted: {}", source);
                println!(
                    "Committed {} of {} staged members.",
                    committed, staged
                );
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
