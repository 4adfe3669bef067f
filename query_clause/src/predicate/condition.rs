//! Simple conditions and their rendering rules

use crate::errors::QueryClauseError;
use crate::predicate::operator::{Operator, OperatorKind, Quantifier};
use crate::quoting::ValueQuoter;
use crate::BindParams;
use serde_json::Value;

/// Operator together with its operand, one variant per encoding rule.
///
/// Built through [`Comparison::new`], which rejects operand shapes and
/// quantifiers an operator cannot take.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// `sql IS NULL`, no placeholder
    Unary(Operator),
    /// `sql OP (:p)`
    Binary { operator: Operator, value: Value },
    /// `:p OP ANY (sql)`, the operand is bound as one array parameter
    Quantified {
        operator: Operator,
        quantifier: Quantifier,
        value: Value,
    },
    /// `sql BETWEEN :p_from AND :p_to`
    Range { from: Value, to: Value },
    /// `sql IN (v1,v2)`, values inlined through the quoter
    List { operator: Operator, values: Vec<Value> },
}

impl Comparison {
    pub fn new(
        field: &str,
        operator: Operator,
        value: Value,
        quantifier: Option<Quantifier>,
    ) -> Result<Self, QueryClauseError> {
        if let Some(quantifier) = quantifier {
            if !operator.supports_quantifier() {
                return Err(QueryClauseError::UnknownQuantifier(format!(
                    "{} {}",
                    operator, quantifier
                )));
            }
            return Ok(Comparison::Quantified {
                operator,
                quantifier,
                value,
            });
        }

        match operator.kind() {
            OperatorKind::Unary => Ok(Comparison::Unary(operator)),
            OperatorKind::Binary => Ok(Comparison::Binary { operator, value }),
            OperatorKind::Range => match value {
                Value::Array(mut bounds) if bounds.len() == 2 => {
                    let to = bounds.pop().unwrap_or(Value::Null);
                    let from = bounds.pop().unwrap_or(Value::Null);
                    Ok(Comparison::Range { from, to })
                }
                other => Err(QueryClauseError::invalid_value(
                    field,
                    format!(
                        "BETWEEN expects an array of two elements, got {}",
                        describe(&other)
                    ),
                )),
            },
            OperatorKind::List => match value {
                Value::Array(values) => Ok(Comparison::List { operator, values }),
                other => Err(QueryClauseError::invalid_value(
                    field,
                    format!("{} expects an array, got {}", operator, describe(&other)),
                )),
            },
        }
    }

    pub fn operator(&self) -> Operator {
        match self {
            Comparison::Unary(operator)
            | Comparison::Binary { operator, .. }
            | Comparison::Quantified { operator, .. }
            | Comparison::List { operator, .. } => *operator,
            Comparison::Range { .. } => Operator::Between,
        }
    }

    pub fn quantifier(&self) -> Option<Quantifier> {
        match self {
            Comparison::Quantified { quantifier, .. } => Some(*quantifier),
            _ => None,
        }
    }

    /// Render the boolean fragment for `sql_form` using `placeholder` as the base name
    pub(crate) fn to_sql(&self, sql_form: &str, placeholder: &str, quoter: &dyn ValueQuoter) -> String {
        match self {
            Comparison::Unary(operator) => format!("{} {}", sql_form, operator),
            Comparison::Binary { operator, .. } => {
                format!("{} {} (:{})", sql_form, operator, placeholder)
            }
            Comparison::Quantified {
                operator,
                quantifier,
                ..
            } => format!(":{} {} {} ({})", placeholder, operator, quantifier, sql_form),
            Comparison::Range { .. } => format!(
                "{} BETWEEN :{}_from AND :{}_to",
                sql_form, placeholder, placeholder
            ),
            Comparison::List { operator, values } => {
                // IN () is invalid SQL
                if values.is_empty() {
                    return match operator {
                        Operator::NotIn => "true".to_string(),
                        _ => "false".to_string(),
                    };
                }
                let literals: Vec<String> = values.iter().map(|v| quoter.quote(v)).collect();
                format!("{} {} ({})", sql_form, operator, literals.join(","))
            }
        }
    }

    /// Append the values this comparison binds under `placeholder`
    pub(crate) fn collect_params(&self, placeholder: &str, params: &mut BindParams) {
        match self {
            Comparison::Unary(_) | Comparison::List { .. } => {}
            Comparison::Binary { value, .. } | Comparison::Quantified { value, .. } => {
                params.insert(placeholder.to_string(), value.clone());
            }
            Comparison::Range { from, to } => {
                params.insert(format!("{}_from", placeholder), from.clone());
                params.insert(format!("{}_to", placeholder), to.clone());
            }
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("an array of {} elements", items.len()),
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

/// Condition on one registered field
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleCondition {
    pub field: String,
    /// SQL expression of `field` at the time the condition was added
    pub sql_form: String,
    pub comparison: Comparison,
}
