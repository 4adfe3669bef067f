//! Value quoting
//!
//! List-membership conditions (`IN` / `NOT IN`) inline their values as SQL
//! literals instead of binding them. The literal form comes from a
//! [`ValueQuoter`], which owns dialect-correct escaping.

use serde_json::Value;

/// Turns a value into a SQL literal
pub trait ValueQuoter: Send + Sync {
    fn quote(&self, value: &Value) -> String;
}

impl<F> ValueQuoter for F
where
    F: Fn(&Value) -> String + Send + Sync,
{
    fn quote(&self, value: &Value) -> String {
        self(value)
    }
}

/// PostgreSQL literal quoting
#[derive(Debug, Clone, Copy, Default)]
pub struct PgQuoter;

impl PgQuoter {
    /// Quote a string the way `quote_literal()` does
    pub fn quote_str(text: &str) -> String {
        let mut quoted = String::with_capacity(text.len() + 3);
        if text.contains('\\') {
            quoted.push('E');
        }
        quoted.push('\'');
        for c in text.chars() {
            match c {
                '\'' => quoted.push_str("''"),
                '\\' => quoted.push_str("\\\\"),
                c => quoted.push(c),
            }
        }
        quoted.push('\'');
        quoted
    }
}

impl ValueQuoter for PgQuoter {
    fn quote(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => Self::quote_str(s),
            Value::Array(items) => {
                let items: Vec<String> = items.iter().map(|item| self.quote(item)).collect();
                format!("ARRAY[{}]", items.join(","))
            }
            Value::Object(_) => Self::quote_str(&value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pg_quoter_scalars() {
        let quoter = PgQuoter;
        assert_eq!(quoter.quote(&json!(42)), "42");
        assert_eq!(quoter.quote(&json!(-1.5)), "-1.5");
        assert_eq!(quoter.quote(&json!(true)), "TRUE");
        assert_eq!(quoter.quote(&json!(null)), "NULL");
        assert_eq!(quoter.quote(&json!("active")), "'active'");
    }

    #[test]
    fn test_pg_quoter_escapes_quotes_and_backslashes() {
        let quoter = PgQuoter;
        assert_eq!(quoter.quote(&json!("O'Brien")), "'O''Brien'");
        assert_eq!(
            quoter.quote(&json!("'; DROP TABLE users; --")),
            "'''; DROP TABLE users; --'"
        );
        assert_eq!(quoter.quote(&json!("C:\\temp")), "E'C:\\\\temp'");
    }

    #[test]
    fn test_pg_quoter_nested_values() {
        let quoter = PgQuoter;
        assert_eq!(quoter.quote(&json!([1, "a"])), "ARRAY[1,'a']");
        assert_eq!(quoter.quote(&json!({"k": "v"})), "'{\"k\":\"v\"}'");
    }

    #[test]
    fn test_closure_quoter() {
        let quoter = |value: &Value| format!("<{}>", value);
        assert_eq!(ValueQuoter::quote(&quoter, &json!(7)), "<7>");
    }
}
