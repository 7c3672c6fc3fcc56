//! Command dispatch over the core services.

use crate::args::{AuthorCommand, Cli, Command, PostCommand};
use blog_core::{
    core_version, default_log_level, ping, AuthorListQuery, AuthorService, CoreConfig,
    DbLocation, PostListQuery, PostService, RepoError, SqliteAuthorRepository,
    SqlitePostRepository,
};
use log::info;
use rusqlite::Connection;

/// Builds the core configuration from parsed arguments.
pub fn core_config(cli: &Cli) -> CoreConfig {
    CoreConfig {
        db: DbLocation::File(cli.db.clone()),
        log_level: cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string()),
        log_dir: cli.log_dir.clone(),
    }
}

/// Runs one command. Returns a printable error message on failure.
pub fn run(cli: Cli) -> Result<(), String> {
    let config = core_config(&cli);
    config.init_logging()?;

    match cli.command {
        Command::Ping => println!("{}", ping()),
        Command::Version => println!("{}", core_version()),
        Command::Migrate => {
            open(&config)?;
            info!("event=cli_migrate module=cli status=ok");
            println!("schema up to date");
        }
        Command::Author(command) => {
            let conn = open(&config)?;
            run_author(&conn, command).map_err(describe)?;
        }
        Command::Post(command) => {
            let conn = open(&config)?;
            run_post(&conn, command).map_err(describe)?;
        }
    }
    Ok(())
}

fn open(config: &CoreConfig) -> Result<Connection, String> {
    config.open_db().map_err(|err| format!("failed to open database: {err}"))
}

fn run_author(conn: &Connection, command: AuthorCommand) -> Result<(), RepoError> {
    let service = AuthorService::new(SqliteAuthorRepository::try_new(conn)?);
    match command {
        AuthorCommand::Add { name, phone } => {
            println!("{}", service.create_author(name, phone)?);
        }
        AuthorCommand::Rename { id, name } => {
            println!("{}", service.rename_author(id, name)?);
        }
        AuthorCommand::Phone { id, phone } => {
            println!("{}", service.set_phone_number(id, phone)?);
        }
        AuthorCommand::Get { id } => {
            let author = service
                .get_author(id)?
                .ok_or(RepoError::AuthorNotFound(id))?;
            println!("{author}");
        }
        AuthorCommand::List(page) => {
            let query = AuthorListQuery {
                limit: page.limit,
                offset: page.offset,
            };
            for author in service.list_authors(&query)? {
                println!("{author}");
            }
        }
        AuthorCommand::Delete { id } => {
            service.delete_author(id)?;
            println!("deleted author {id}");
        }
    }
    Ok(())
}

fn run_post(conn: &Connection, command: PostCommand) -> Result<(), RepoError> {
    let service = PostService::new(SqlitePostRepository::try_new(conn)?);
    match command {
        PostCommand::Add {
            title,
            content,
            category,
            summary,
        } => {
            println!(
                "{}",
                service.create_post(title, content, category, summary)?
            );
        }
        PostCommand::Retitle { id, title } => {
            println!("{}", service.retitle_post(id, title)?);
        }
        PostCommand::Content { id, content } => {
            println!("{}", service.set_content(id, content)?);
        }
        PostCommand::Category { id, category } => {
            println!("{}", service.set_category(id, category)?);
        }
        PostCommand::Summary { id, summary } => {
            println!("{}", service.set_summary(id, summary)?);
        }
        PostCommand::Get { id } => {
            let post = service.get_post(id)?.ok_or(RepoError::PostNotFound(id))?;
            println!("{post}");
        }
        PostCommand::List { category, page } => {
            let query = PostListQuery {
                category,
                limit: page.limit,
                offset: page.offset,
            };
            for post in service.list_posts(&query)? {
                println!("{post}");
            }
        }
        PostCommand::Delete { id } => {
            service.delete_post(id)?;
            println!("deleted post {id}");
        }
    }
    Ok(())
}

fn describe(err: RepoError) -> String {
    match err.as_validation() {
        Some(rejection) => format!("invalid {}: {rejection}", rejection.field()),
        None => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::db::open_db_in_memory;
    use blog_core::ValidationError;

    fn seed_post(conn: &Connection) -> i64 {
        let service = PostService::new(SqlitePostRepository::try_new(conn).unwrap());
        service
            .create_post("Top Picks", "w".repeat(250), "Fiction", None)
            .unwrap()
            .id()
    }

    fn stored(conn: &Connection, id: i64) -> blog_core::Post {
        let service = PostService::new(SqlitePostRepository::try_new(conn).unwrap());
        service.get_post(id).unwrap().unwrap()
    }

    #[test]
    fn post_field_commands_persist_valid_values() {
        let conn = open_db_in_memory().unwrap();
        let id = seed_post(&conn);

        run_post(
            &conn,
            PostCommand::Retitle {
                id,
                title: "Guess Again".to_string(),
            },
        )
        .unwrap();
        run_post(
            &conn,
            PostCommand::Content {
                id,
                content: "c".repeat(300),
            },
        )
        .unwrap();
        run_post(
            &conn,
            PostCommand::Category {
                id,
                category: "Non-Fiction".to_string(),
            },
        )
        .unwrap();
        run_post(
            &conn,
            PostCommand::Summary {
                id,
                summary: Some("teaser".to_string()),
            },
        )
        .unwrap();

        let post = stored(&conn, id);
        assert_eq!(post.title(), "Guess Again");
        assert_eq!(post.content(), "c".repeat(300));
        assert_eq!(post.category(), "Non-Fiction");
        assert_eq!(post.summary(), Some("teaser"));

        run_post(&conn, PostCommand::Summary { id, summary: None }).unwrap();
        assert_eq!(stored(&conn, id).summary(), None);
    }

    #[test]
    fn post_field_commands_reject_invalid_values() {
        let conn = open_db_in_memory().unwrap();
        let id = seed_post(&conn);
        let before = stored(&conn, id);

        let err = run_post(
            &conn,
            PostCommand::Retitle {
                id,
                title: "A Normal Day".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::TitleMissingClickbait)
        );
        assert_eq!(
            describe(err),
            "invalid title: Title must contain one of the clickbait phrases: \
             [\"Won't Believe\", 'Secret', 'Top', 'Guess']."
        );

        let err = run_post(
            &conn,
            PostCommand::Category {
                id,
                category: "Sports".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.as_validation(), Some(&ValidationError::InvalidCategory));

        assert_eq!(stored(&conn, id), before);
    }

    #[test]
    fn post_field_command_on_missing_post_is_not_found() {
        let conn = open_db_in_memory().unwrap();
        let err = run_post(
            &conn,
            PostCommand::Content {
                id: 99,
                content: "c".repeat(300),
            },
        )
        .unwrap_err();
        assert!(matches!(err, RepoError::PostNotFound(99)));
    }
}
