use std::process::ExitCode;

use clap::Parser;
use sql_rowmap::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run one SQL statement and print its rows as JSON text maps")]
struct Args {
    /// Driver identifier, e.g. `sqlite` or `postgres`
    #[arg(long, default_value = "sqlite")]
    driver: String,
    /// Driver-specific connection string
    #[arg(long)]
    dsn: String,
    /// Statement to run, with positional placeholders
    #[arg(long)]
    sql: String,
    /// Positional parameter, repeatable. `null`, `true`/`false`, integers, and floats are typed;
    /// prefix with `text:` to force a string.
    #[arg(long = "param")]
    params: Vec<String>,
    /// Print only the first row (`{}` when nothing matched)
    #[arg(long)]
    one: bool,
    /// Text printed for NULL cells
    #[arg(long, default_value = sql_rowmap::DEFAULT_NULL_TEXT)]
    null_text: String,
}

fn parse_param(raw: &str) -> ParamValue {
    if let Some(text) = raw.strip_prefix("text:") {
        return ParamValue::Text(text.to_string());
    }
    match raw {
        "null" | "NULL" => ParamValue::Null,
        "true" => ParamValue::Bool(true),
        "false" => ParamValue::Bool(false),
        _ => raw
            .parse::<i64>()
            .map(ParamValue::Int)
            .or_else(|_| raw.parse::<f64>().map(ParamValue::Float))
            .unwrap_or_else(|_| ParamValue::Text(raw.to_string())),
    }
}

async fn run(args: Args) -> Result<String, SqlRowMapError> {
    let options = ExecutorOptions::builder().null_text(args.null_text).finish();
    let logger = std::sync::Arc::new(TracingLogger);
    let mut exec = QueryExecutor::open_with(&args.driver, &args.dsn, options, logger).await?;

    let params: Vec<ParamValue> = args.params.iter().map(|p| parse_param(p)).collect();
    exec.fill(&args.sql, &params);

    let rendered = if args.one {
        exec.query().await.map(|row| serde_json::to_string_pretty(&row))
    } else {
        exec.query_as_list()
            .await
            .map(|rows| serde_json::to_string_pretty(&rows))
    };
    exec.close().await?;

    rendered?
        .map_err(|e| SqlRowMapError::ExecutionError(format!("cannot encode rows as JSON: {e}")))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_are_typed_from_text() {
        assert_eq!(parse_param("3"), ParamValue::Int(3));
        assert_eq!(parse_param("2.5"), ParamValue::Float(2.5));
        assert_eq!(parse_param("null"), ParamValue::Null);
        assert_eq!(parse_param("true"), ParamValue::Bool(true));
        assert_eq!(parse_param("alice"), ParamValue::Text("alice".into()));
        assert_eq!(parse_param("text:42"), ParamValue::Text("42".into()));
    }

    #[cfg(feature = "sqlite")]
    fn sqlite_args(sql: &str, one: bool) -> Args {
        Args {
            driver: "sqlite".to_string(),
            dsn: ":memory:".to_string(),
            sql: sql.to_string(),
            params: vec!["2".to_string()],
            one,
            null_text: sql_rowmap::DEFAULT_NULL_TEXT.to_string(),
        }
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn one_prints_empty_object_when_nothing_matches() {
        let json = run(sqlite_args("SELECT 1 AS one WHERE 1 = ?", true)).await.unwrap();
        assert_eq!(json, "{}");

        let json = run(sqlite_args("SELECT ? AS two", true)).await.unwrap();
        let row: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(row, serde_json::json!({"two": "2"}));
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn list_prints_array() {
        let json = run(sqlite_args("SELECT 1 AS one WHERE 1 = ?", false)).await.unwrap();
        assert_eq!(json, "[]");
    }
}
