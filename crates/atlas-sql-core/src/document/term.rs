//! Expression documents.

use serde::Deserialize;
use serde_json::Value;

use crate::error::TermError;
use crate::term::{
    BinaryOperator, Column, Expression, FunctionCall, Literal, RawSql, UnaryOperator,
};

/// An expression in a query document.
///
/// JSON scalars and arrays are literals; objects must be one of the
/// [`NodeDocument`] shapes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TermDocument {
    /// An expression node.
    Node(NodeDocument),
    /// A raw JSON value, converted by the term-creation rule.
    Value(Value),
}

/// An expression node, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeDocument {
    /// `{"type": "column", "name": "id", "table": "users"}`
    Column {
        /// Column name.
        name: String,
        /// Table qualifier.
        #[serde(default)]
        table: Option<String>,
        /// DISTINCT prefix.
        #[serde(default)]
        distinct: bool,
    },
    /// `{"type": "binary", "left": ..., "op": "=", "right": ...}`
    Binary {
        /// Left operand.
        left: Box<TermDocument>,
        /// Operator spelling.
        op: String,
        /// Right operand.
        right: Box<TermDocument>,
    },
    /// `{"type": "unary", "op": "NOT", "operand": ...}`
    Unary {
        /// Operator or function name.
        op: String,
        /// Operand.
        operand: Box<TermDocument>,
    },
    /// `{"type": "between", "expr": ..., "low": ..., "high": ...}`
    Between {
        /// Tested expression.
        expr: Box<TermDocument>,
        /// Lower bound.
        low: Box<TermDocument>,
        /// Upper bound.
        high: Box<TermDocument>,
        /// NOT BETWEEN.
        #[serde(default)]
        negated: bool,
    },
    /// `{"type": "function", "name": "COALESCE", "args": [...]}`
    Function {
        /// Function name.
        name: String,
        /// Arguments.
        #[serde(default)]
        args: Vec<TermDocument>,
    },
    /// `{"type": "variable", "name": "id"}`
    Variable {
        /// Variable name.
        name: String,
    },
    /// `{"type": "list", "items": [...]}`, a list whose items may be nodes.
    List {
        /// Items.
        items: Vec<TermDocument>,
    },
    /// `{"type": "raw", "sql": "CURRENT_TIMESTAMP"}`
    Raw {
        /// SQL emitted verbatim.
        sql: String,
    },
}

const NODE_TYPES: [&str; 8] = [
    "column", "binary", "unary", "between", "function", "variable", "list", "raw",
];

fn boxed(term: TermDocument) -> Result<Box<Expression>, TermError> {
    Expression::try_from(term).map(Box::new)
}

fn from_value(value: &Value) -> Result<Expression, TermError> {
    // An object with a known node type only ends up here when its fields
    // did not match the node shape.
    if let Some(kind) = value.get("type").and_then(Value::as_str) {
        if let Some(node) = NODE_TYPES.into_iter().find(|node| *node == kind) {
            return Err(TermError::MalformedNode {
                node,
                reason: format!("fields do not match: {value}"),
            });
        }
    }
    Expression::coerce(value)
}

impl TryFrom<TermDocument> for Expression {
    type Error = TermError;

    fn try_from(term: TermDocument) -> Result<Self, Self::Error> {
        let node = match term {
            TermDocument::Value(value) => return from_value(&value),
            TermDocument::Node(node) => node,
        };
        Ok(match node {
            NodeDocument::Column {
                name,
                table,
                distinct,
            } => {
                if name.trim().is_empty() {
                    return Err(TermError::MalformedNode {
                        node: "column",
                        reason: String::from("name is empty"),
                    });
                }
                Self::Column(Column {
                    table,
                    name,
                    distinct,
                })
            }
            NodeDocument::Binary { left, op, right } => Self::Binary {
                left: boxed(*left)?,
                operator: op.parse::<BinaryOperator>()?,
                right: boxed(*right)?,
            },
            NodeDocument::Unary { op, operand } => Self::Unary {
                operator: UnaryOperator::parse(&op)?,
                operand: boxed(*operand)?,
            },
            NodeDocument::Between {
                expr,
                low,
                high,
                negated,
            } => Self::Between {
                expr: boxed(*expr)?,
                low: boxed(*low)?,
                high: boxed(*high)?,
                negated,
            },
            NodeDocument::Function { name, args } => {
                if name.trim().is_empty() {
                    return Err(TermError::MalformedNode {
                        node: "function",
                        reason: String::from("name is empty"),
                    });
                }
                Self::Function(FunctionCall {
                    name,
                    args: args
                        .into_iter()
                        .map(Self::try_from)
                        .collect::<Result<_, _>>()?,
                })
            }
            NodeDocument::Variable { name } => Self::Variable(name),
            NodeDocument::List { items } => Self::Literal(Literal::List(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            )),
            NodeDocument::Raw { sql } => Self::Raw(RawSql::verbatim(sql)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn term(value: Value) -> Result<Expression, TermError> {
        let doc: TermDocument = serde_json::from_value(value).unwrap();
        Expression::try_from(doc)
    }

    #[test]
    fn test_scalars_are_literals() {
        assert_eq!(term(json!(1)).unwrap().render().unwrap(), "1");
        assert_eq!(term(json!("a")).unwrap().render().unwrap(), "'a'");
        assert_eq!(
            term(json!([true, null])).unwrap().render().unwrap(),
            "(TRUE, NULL)"
        );
    }

    #[test]
    fn test_nodes() {
        let expr = term(json!({
            "type": "binary",
            "left": {"type": "column", "name": "age", "table": "u"},
            "op": ">=",
            "right": {"type": "variable", "name": "min_age"}
        }))
        .unwrap();
        assert_eq!(expr.render().unwrap(), "(`u`.`age` >= ??{min_age}??)");

        let expr = term(json!({
            "type": "between",
            "expr": {"type": "column", "name": "n"},
            "low": 1,
            "high": {"type": "function", "name": "MAXVAL", "args": []},
            "negated": true
        }))
        .unwrap();
        assert_eq!(expr.render().unwrap(), "`n` NOT BETWEEN(1 AND MAXVAL())");

        let expr = term(json!({
            "type": "unary",
            "op": "sum",
            "operand": {"type": "column", "name": "total"}
        }))
        .unwrap();
        assert_eq!(expr.render().unwrap(), "sum(`total`)");

        let expr = term(json!({
            "type": "list",
            "items": [1, {"type": "column", "name": "x"}]
        }))
        .unwrap();
        assert_eq!(expr.render().unwrap(), "(1, `x`)");
    }

    #[test]
    fn test_unknown_operator() {
        let err = term(json!({
            "type": "binary",
            "left": 1,
            "op": "===",
            "right": 2
        }))
        .unwrap_err();
        assert_eq!(err, TermError::UnknownOperator(String::from("===")));
    }

    #[test]
    fn test_plain_object_fails_construction() {
        assert!(matches!(
            term(json!({"foo": "bar"})),
            Err(TermError::UnsupportedValue(_))
        ));
    }

    #[test]
    fn test_malformed_node() {
        assert!(matches!(
            term(json!({"type": "binary", "left": 1})),
            Err(TermError::MalformedNode { node: "binary", .. })
        ));
    }
}
