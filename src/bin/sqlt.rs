use std::io::{self, Write};
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::json;
use sql_template::prelude::*;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run one parameterized statement against a SQLite database")]
struct Args {
    /// Path (or `file:` URI) of the SQLite database
    #[arg(long)]
    db: String,
    /// Switch the database to WAL journal mode
    #[arg(long)]
    wal: bool,
    #[arg(long, default_value_t = 5000)]
    busy_timeout_ms: u64,
    #[arg(long)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a statement and print the affected row count
    Update { sql: String, params: Vec<String> },
    /// Execute a query and print its rows
    Query { sql: String, params: Vec<String> },
}

/// `null`, integers, finite floats and booleans are recognised; everything else is text.
fn parse_param(raw: &str) -> SqlValue {
    if raw.eq_ignore_ascii_case("null") {
        SqlValue::Null
    } else if let Ok(i) = raw.parse::<i64>() {
        SqlValue::Int(i)
    } else if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
        SqlValue::Float(f)
    } else if let Ok(b) = raw.parse::<bool>() {
        SqlValue::Bool(b)
    } else {
        SqlValue::Text(raw.to_owned())
    }
}

struct StdoutResponse {
    content_type: Option<String>,
    out: io::Stdout,
}

impl ResponseSink for StdoutResponse {
    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn set_content_type(&mut self, content_type: &str) {
        self.content_type = Some(content_type.to_owned());
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        self.out.write_all(body)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let provider = SqliteProvider::builder(args.db)
        .wal(args.wal)
        .busy_timeout(Some(Duration::from_millis(args.busy_timeout_ms)))
        .build()?;
    let template = SqlTemplate::new(provider);

    let model = match args.command {
        Command::Update { sql, params } => {
            let params: Vec<SqlValue> = params.iter().map(String::as_str).map(parse_param).collect();
            let updated = template.update(&sql, params)?;
            JsonView::model("result", &json!({ "updated": updated }))?
        }
        Command::Query { sql, params } => {
            let params: Vec<SqlValue> = params.iter().map(String::as_str).map(parse_param).collect();
            let rows = template.query_rows(&sql, params)?;
            tracing::info!(rows = rows.len(), "query finished");
            JsonView::model("rows", &rows.to_json())?
        }
    };

    let mut response = StdoutResponse {
        content_type: None,
        out: io::stdout(),
    };
    JsonView::new().render(&model, &mut response)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_max_level(level)
        .init();

    if let Err(err) = run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_parse_by_shape() {
        assert_eq!(parse_param("NULL"), SqlValue::Null);
        assert_eq!(parse_param("42"), SqlValue::Int(42));
        assert_eq!(parse_param("4.5"), SqlValue::Float(4.5));
        assert_eq!(parse_param("true"), SqlValue::Bool(true));
        assert_eq!(parse_param("alice"), SqlValue::Text("alice".into()));
    }

    #[test]
    fn non_finite_float_spellings_stay_text() {
        for raw in ["Nan", "inf", "-Infinity"] {
            assert_eq!(parse_param(raw), SqlValue::Text(raw.into()));
        }
        assert_eq!(parse_param("1e3"), SqlValue::Float(1000.0));
    }
}
