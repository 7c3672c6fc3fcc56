//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Admin tool for blog author and post records.
#[derive(Parser, Debug)]
#[command(name = "blog_cli", version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, env = "BLOG_DB_PATH", default_value = blog_core::config::DEFAULT_DB_FILE_NAME)]
    pub db: PathBuf,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true, env = "BLOG_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. File logging is off when unset.
    #[arg(long, global = true, env = "BLOG_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a health-check reply
    Ping,
    /// Print the core crate version
    Version,
    /// Create or upgrade the database schema
    Migrate,
    /// Manage authors
    #[command(subcommand)]
    Author(AuthorCommand),
    /// Manage posts
    #[command(subcommand)]
    Post(PostCommand),
}

#[derive(Subcommand, Debug)]
pub enum AuthorCommand {
    /// Create an author
    Add {
        #[arg(long)]
        name: String,
        /// Exactly ten digits
        #[arg(long)]
        phone: Option<String>,
    },
    /// Change an author's name
    Rename {
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Set or clear an author's phone number
    Phone {
        id: i64,
        /// Omit to clear the phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Show one author
    Get { id: i64 },
    /// List authors
    List(PageArgs),
    /// Delete an author
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum PostCommand {
    /// Create a post
    Add {
        #[arg(long)]
        title: String,
        /// At least 250 characters
        #[arg(long)]
        content: String,
        /// Fiction or Non-Fiction
        #[arg(long)]
        category: String,
        #[arg(long)]
        summary: Option<String>,
    },
    /// Change a post's title
    Retitle {
        id: i64,
        /// Must contain a clickbait phrase
        #[arg(long)]
        title: String,
    },
    /// Replace a post's content
    Content {
        id: i64,
        #[arg(long)]
        content: String,
    },
    /// Move a post to another category
    Category {
        id: i64,
        #[arg(long)]
        category: String,
    },
    /// Set or clear a post's summary
    Summary {
        id: i64,
        /// Omit to clear the summary
        #[arg(long)]
        summary: Option<String>,
    },
    /// Show one post
    Get { id: i64 },
    /// List posts, newest first
    List {
        #[arg(long)]
        category: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Delete a post
    Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct PageArgs {
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn post_summary_without_value_clears() {
        let cli = Cli::try_parse_from(["blog_cli", "post", "summary", "4"]).unwrap();
        match cli.command {
            Command::Post(PostCommand::Summary { id, summary }) => {
                assert_eq!(id, 4);
                assert_eq!(summary, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn post_retitle_requires_title() {
        assert!(Cli::try_parse_from(["blog_cli", "post", "retitle", "4"]).is_err());
        let cli =
            Cli::try_parse_from(["blog_cli", "post", "retitle", "4", "--title", "Top Ten"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Command::Post(PostCommand::Retitle { id: 4, ref title }) if title == "Top Ten"
        ));
    }
}
