//! Library lending CLI commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use schoolhub_core::result::AppResult;
use schoolhub_entity::library::{IssueBook, ReturnBook};

use super::Context;
use crate::output;

/// Arguments for library commands
#[derive(Debug, Args)]
pub struct LibraryArgs {
    /// Library subcommand
    #[command(subcommand)]
    pub command: LibraryCommand,
}

/// Library subcommands
#[derive(Debug, Subcommand)]
pub enum LibraryCommand {
    /// Lend a copy of a book to a student
    Issue {
        /// Book ID
        #[arg(long)]
        book: String,
        /// Student ID
        #[arg(long)]
        student: String,
        /// Return due date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,
    },
    /// Take a lent copy back
    Return {
        /// Book ID
        #[arg(long)]
        book: String,
        /// Student ID
        #[arg(long)]
        student: String,
    },
}

/// Execute library commands
pub async fn execute(args: &LibraryArgs, ctx: &Context) -> AppResult<()> {
    let api = ctx.http("Lending")?;

    match &args.command {
        LibraryCommand::Issue { book, student, due } => {
            let issue = IssueBook {
                book_id: book.clone(),
                student_id: student.clone(),
                due_date: *due,
            };
            let updated = api.issue_book(&issue).await?;
            output::print_success(&format!(
                "Issued '{}' to {student}; {} copies left",
                updated.title, updated.available_copies
            ));
        }
        LibraryCommand::Return { book, student } => {
            let ret = ReturnBook {
                book_id: book.clone(),
                student_id: student.clone(),
            };
            let updated = api.return_book(&ret).await?;
            output::print_success(&format!(
                "Returned '{}'; {} copies available",
                updated.title, updated.available_copies
            ));
        }
    }

    Ok(())
}
