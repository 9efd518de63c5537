//! Command implementations, kept free of terminal output.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{bail, Context};
use serde_json::Value;
use tracing::{debug, warn};

use atlas_sql_core::placeholder::{self, BoundQuery};
use atlas_sql_core::{parse_batch, Params, PlaceholderStyle, Query, SqlValue};

/// Reads the document source from `path`, or stdin for `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read documents from stdin")?;
        return Ok(source);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Parses one document or an array of documents.
pub fn parse_queries(source: &str) -> anyhow::Result<Vec<Query>> {
    let queries = parse_batch(source).context("invalid query document")?;
    if queries.is_empty() {
        bail!("no query documents found");
    }
    Ok(queries)
}

/// Loads variable values from a JSON object file.
pub fn load_params(path: &Path) -> anyhow::Result<Params> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let Value::Object(entries) =
        serde_json::from_str::<Value>(&source).context("parameters are not valid JSON")?
    else {
        bail!("parameters must be a JSON object keyed by variable name");
    };

    let mut params = Params::new();
    for (name, value) in &entries {
        let value = SqlValue::try_from(value)
            .with_context(|| format!("unsupported value for variable '{name}'"))?;
        params.insert(name.clone(), value);
    }
    debug!(count = params.len(), "Loaded parameters");
    Ok(params)
}

fn compile(position: usize, query: &Query) -> anyhow::Result<String> {
    query.compile().map_err(|err| {
        warn!(position, kind = %err.kind(), "Document failed to compile");
        anyhow::Error::new(err).context(format!("document {position}"))
    })
}

/// Compiles every query and binds its variables.
///
/// With [`PlaceholderStyle::Keep`] and no parameters the markers are left as
/// they are, so documents with variables still compile without values.
pub fn compile_all(
    queries: &[Query],
    params: &Params,
    style: PlaceholderStyle,
) -> anyhow::Result<Vec<BoundQuery>> {
    queries
        .iter()
        .enumerate()
        .map(|(position, query)| {
            let sql = compile(position, query)?;
            if style == PlaceholderStyle::Keep && params.is_empty() {
                return Ok(BoundQuery {
                    names: placeholder::markers(&sql),
                    sql,
                    values: Vec::new(),
                });
            }
            placeholder::bind(&sql, params, style)
                .with_context(|| format!("document {position}"))
        })
        .collect()
}

/// Compiles every query, returning how many succeeded.
pub fn check_all(queries: &[Query]) -> anyhow::Result<usize> {
    for (position, query) in queries.iter().enumerate() {
        compile(position, query)?;
    }
    Ok(queries.len())
}

/// Lists the variable names of each compiled query.
pub fn placeholders(queries: &[Query]) -> anyhow::Result<Vec<Vec<String>>> {
    queries
        .iter()
        .enumerate()
        .map(|(position, query)| Ok(placeholder::markers(&compile(position, query)?)))
        .collect()
}

/// Describes bound values as `name = value` pairs.
pub fn describe_values(bound: &BoundQuery) -> String {
    if bound.values.is_empty() {
        return String::from("no values");
    }
    bound
        .names
        .iter()
        .zip(&bound.values)
        .map(|(name, value)| format!("{name} = {}", value.to_sql_inline()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const DOCUMENTS: &str = r#"[
        {"query": "select", "from": "users", "where": {"type": "binary", "left": {"type": "column", "name": "id"}, "op": "=", "right": {"type": "variable", "name": "id"}}},
        {"query": "drop_table", "table": "sessions", "if_exists": true}
    ]"#;

    #[test]
    fn test_read_and_parse_file() {
        let input = file(DOCUMENTS);
        let source = read_input(input.path()).unwrap();
        let queries = parse_queries(&source).unwrap();
        assert_eq!(queries.len(), 2);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_input(Path::new("/nonexistent/atlas.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_empty_batch_rejected() {
        assert!(parse_queries("[]").is_err());
        assert!(parse_queries("{\"query\": \"nope\"}").is_err());
    }

    #[test]
    fn test_compile_keeps_markers_without_params() {
        let queries = parse_queries(DOCUMENTS).unwrap();
        let bound = compile_all(&queries, &Params::new(), PlaceholderStyle::Keep).unwrap();
        assert_eq!(bound[0].sql, "SELECT * FROM `users` WHERE (`id` = ??{id}??)");
        assert_eq!(bound[0].names, vec!["id"]);
        assert_eq!(bound[1].sql, "DROP TABLE IF EXISTS `sessions`");
    }

    #[test]
    fn test_compile_binds_params() {
        let params_file = file(r#"{"id": 42}"#);
        let params = load_params(params_file.path()).unwrap();
        let queries = parse_queries(DOCUMENTS).unwrap();

        let bound = compile_all(&queries, &params, PlaceholderStyle::Numbered).unwrap();
        assert_eq!(bound[0].sql, "SELECT * FROM `users` WHERE (`id` = $1)");
        assert_eq!(bound[0].values, vec![SqlValue::Int(42)]);
        assert_eq!(describe_values(&bound[0]), "id = 42");
        assert_eq!(describe_values(&bound[1]), "no values");
    }

    #[test]
    fn test_compile_unbound_variable() {
        let queries = parse_queries(DOCUMENTS).unwrap();
        assert!(compile_all(&queries, &Params::new(), PlaceholderStyle::Question).is_err());
    }

    #[test]
    fn test_params_must_be_object() {
        let params_file = file("[1, 2]");
        let err = load_params(params_file.path()).unwrap_err();
        assert!(err.to_string().contains("JSON object"));

        let params_file = file(r#"{"id": {"nested": 1}}"#);
        let err = load_params(params_file.path()).unwrap_err();
        assert!(err.to_string().contains("'id'"));
    }

    #[test]
    fn test_check_reports_failing_document() {
        let queries = parse_queries(
            r#"[{"query": "select", "from": "a"}, {"query": "update", "table": "t"}]"#,
        )
        .unwrap();
        let err = check_all(&queries).unwrap_err();
        assert_eq!(err.to_string(), "document 1");
        assert_eq!(check_all(&queries[..1]).unwrap(), 1);
    }

    #[test]
    fn test_placeholders() {
        let queries = parse_queries(DOCUMENTS).unwrap();
        let names = placeholders(&queries).unwrap();
        assert_eq!(names, vec![vec![String::from("id")], Vec::new()]);
    }
}
