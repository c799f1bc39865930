//! phoenix-sql CLI
//!
//! Command-line tool for adapting ORM-generated SQL to Apache Phoenix.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use phoenix_sql_core::{strip_comments, RewriteConfig, Statement, TargetDialect};
use phoenix_sql_dialect::{PhoenixDialect, SecondaryIndexHint, SortOrder, UniqueKey};

/// Rewrites ORM-generated SQL for Apache Phoenix.
#[derive(Parser)]
#[command(name = "phoenix-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target dialect (`phoenix` or `passthrough`), overriding the config.
    #[arg(short, long, env = "PHOENIX_SQL_DIALECT")]
    dialect: Option<TargetDialect>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite the statements of a JSON file, one output line per statement.
    Rewrite {
        /// File holding a statement or a list of statements.
        file: PathBuf,
    },

    /// Remove comments from SQL read from the argument or stdin.
    StripComments {
        /// SQL text (read from stdin if omitted).
        sql: Option<String>,
    },

    /// Place secondary index hints after the first SELECT of a query.
    Hint {
        /// Query text (read from stdin if omitted).
        sql: Option<String>,

        /// Hinted table; requires `--index`.
        #[arg(short, long, requires = "index")]
        table: Option<String>,

        /// Hinted index; requires `--table`.
        #[arg(short, long, requires = "table")]
        index: Option<String>,
    },

    /// Print the index DDL standing in for a unique key.
    Ddl {
        /// Unique key name.
        #[arg(short, long)]
        name: String,

        /// Table the key is declared on.
        #[arg(short, long)]
        table: String,

        /// Key columns, optionally suffixed with ` asc` or ` desc`.
        #[arg(short, long = "column", required = true)]
        columns: Vec<String>,

        /// Print the drop statement instead.
        #[arg(long)]
        drop: bool,
    },
}

/// Contents of a `rewrite` input file.
#[derive(Deserialize)]
#[serde(untagged)]
enum StatementFile {
    One(Statement),
    Many(Vec<Statement>),
}

impl StatementFile {
    fn into_statements(self) -> Vec<Statement> {
        match self {
            Self::One(statement) => vec![statement],
            Self::Many(statements) => statements,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(cli.config.as_deref(), cli.dialect)?;
    info!(dialect = %config.dialect, "configuration loaded");

    match cli.command {
        Commands::Rewrite { file } => {
            for sql in rewrite_file(&config, &file)? {
                println!("{sql}");
            }
        }

        Commands::StripComments { sql } => {
            println!("{}", strip_comments(&input(sql)?));
        }

        Commands::Hint { sql, table, index } => {
            let hints = hints(&config, table, index);
            println!("{}", hint_query(&config, &input(sql)?, &hints));
        }

        Commands::Ddl {
            name,
            table,
            columns,
            drop,
        } => {
            let key = unique_key(&name, &table, &columns)?;
            let dialect = PhoenixDialect::new();
            if drop {
                println!("{}", dialect.drop_unique_key(&key));
            } else {
                println!("{}", dialect.add_unique_key(&key));
            }
        }
    }

    Ok(())
}

/// Loads the config file, if any, then applies the dialect override.
fn load_config(path: Option<&Path>, dialect: Option<TargetDialect>) -> anyhow::Result<RewriteConfig> {
    let config = match path {
        Some(path) => RewriteConfig::from_path(path)?,
        None => RewriteConfig::default(),
    };
    Ok(match dialect {
        Some(dialect) => config.with_dialect(dialect),
        None => config,
    })
}

fn input(arg: Option<String>) -> anyhow::Result<String> {
    if let Some(sql) = arg {
        return Ok(sql);
    }
    let mut sql = String::new();
    std::io::stdin()
        .read_to_string(&mut sql)
        .context("failed to read SQL from stdin")?;
    Ok(sql)
}

fn rewrite_file(config: &RewriteConfig, path: &Path) -> anyhow::Result<Vec<String>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file: StatementFile = serde_json::from_str(&json)
        .with_context(|| format!("invalid statement file {}", path.display()))?;

    let rewriter = config.rewriter();
    let statements = file.into_statements();
    debug!(count = statements.len(), "rewriting statements");
    Ok(statements
        .into_iter()
        .map(|statement| rewriter.rewrite(&statement.with_rendered_sql()))
        .collect())
}

/// Uses the command-line hint when given, else the configured ones.
fn hints(
    config: &RewriteConfig,
    table: Option<String>,
    index: Option<String>,
) -> Vec<SecondaryIndexHint> {
    match (table, index) {
        (Some(table), Some(index)) => vec![SecondaryIndexHint::new(table, index)],
        _ => config.hints.iter().map(SecondaryIndexHint::from).collect(),
    }
}

fn hint_query(config: &RewriteConfig, sql: &str, hints: &[SecondaryIndexHint]) -> String {
    let fragments: Vec<String> = hints.iter().map(SecondaryIndexHint::build).collect();
    phoenix_sql_core::inject_hints(sql.trim_end(), &fragments, config.dialect)
}

fn unique_key(name: &str, table: &str, columns: &[String]) -> anyhow::Result<UniqueKey> {
    let mut key = UniqueKey::new(name, table);
    for column in columns {
        let mut parts = column.split_whitespace();
        let column_name = parts.next().context("empty column name")?;
        key = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None => key.column(column_name),
            Some("asc") => key.column_ordered(column_name, SortOrder::Asc),
            Some("desc") => key.column_ordered(column_name, SortOrder::Desc),
            Some(other) => anyhow::bail!("unknown sort order '{other}' for column {column_name}"),
        };
    }
    Ok(key)
}
