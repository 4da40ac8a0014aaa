use std::fmt;
use std::str::FromStr;

/// A field of a `Hash{ .. }` type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashField {
    /// The field name.
    pub name: String,
    /// The field type.
    pub shape: TypeExpr,
    /// Whether the field was prefixed with `!`.
    pub required: bool,
}

/// A parsed annotation type, e.g. `Array<Hash{ id: !Integer }>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `String`
    String,
    /// `Integer`
    Integer,
    /// `Float` or `Number`
    Number,
    /// `Boolean`
    Boolean,
    /// `Date`
    Date,
    /// `DateTime`
    DateTime,
    /// `Object` or `Hash` without fields
    Object,
    /// `Array<T>`, or `Array` of anything
    Array(Option<Box<TypeExpr>>),
    /// `Hash{ key: T, other: !T }`
    Hash(Vec<HashField>),
    /// A named model, e.g. `User`
    Named(String),
}

/// A type expression that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
#[display("cannot parse type '{expression}': {reason}")]
pub struct TypeExprError {
    expression: String,
    reason: String,
}

impl FromStr for TypeExpr {
    type Err = TypeExprError;

    fn from_str(expression: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser {
            input: expression,
            position: 0,
        };
        parser
            .parse_type()
            .and_then(|expr| {
                parser.skip_whitespace();
                if parser.rest().is_empty() {
                    Ok(expr)
                } else {
                    Err(format!("unexpected '{}'", parser.rest()))
                }
            })
            .map_err(|reason| TypeExprError {
                expression: expression.to_string(),
                reason,
            })
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("String"),
            Self::Integer => f.write_str("Integer"),
            Self::Number => f.write_str("Number"),
            Self::Boolean => f.write_str("Boolean"),
            Self::Date => f.write_str("Date"),
            Self::DateTime => f.write_str("DateTime"),
            Self::Object => f.write_str("Object"),
            Self::Array(None) => f.write_str("Array"),
            Self::Array(Some(inner)) => write!(f, "Array<{inner}>"),
            Self::Hash(fields) => {
                f.write_str("Hash{ ")?;
                for (index, field) in fields.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    let marker = if field.required { "!" } else { "" };
                    write!(f, "{}: {marker}{}", field.name, field.shape)?;
                }
                f.write_str(" }")
            }
            Self::Named(name) => f.write_str(name),
        }
    }
}

struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        self.input.get(self.position..).unwrap_or_default()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.position += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(format!("expected '{expected}' at position {}", self.position))
        }
    }

    fn identifier(&mut self) -> Result<&str, String> {
        self.skip_whitespace();
        let rest = self.rest();
        let mut length = 0;
        while let Some(tail) = rest.get(length..) {
            if tail.starts_with("::") {
                length += 2;
            } else if tail.starts_with(|ch: char| ch.is_ascii_alphanumeric() || ch == '_') {
                length += 1;
            } else {
                break;
            }
        }
        if length == 0 {
            return Err(format!("expected a type at position {}", self.position));
        }
        let start = self.position;
        self.position += length;
        Ok(self.input.get(start..self.position).unwrap_or_default())
    }

    fn parse_type(&mut self) -> Result<TypeExpr, String> {
        let name = self.identifier()?.to_string();
        let expr = match name.to_ascii_lowercase().as_str() {
            "string" | "symbol" => TypeExpr::String,
            "integer" | "int" => TypeExpr::Integer,
            "float" | "number" | "decimal" => TypeExpr::Number,
            "boolean" | "bool" => TypeExpr::Boolean,
            "date" => TypeExpr::Date,
            "datetime" | "time" => TypeExpr::DateTime,
            "array" => {
                if self.eat('<') {
                    let inner = self.parse_type()?;
                    self.expect('>')?;
                    TypeExpr::Array(Some(Box::new(inner)))
                } else {
                    TypeExpr::Array(None)
                }
            }
            "hash" | "object" => {
                if self.eat('{') {
                    TypeExpr::Hash(self.parse_fields()?)
                } else {
                    TypeExpr::Object
                }
            }
            _ => TypeExpr::Named(name),
        };
        Ok(expr)
    }

    fn parse_fields(&mut self) -> Result<Vec<HashField>, String> {
        let mut fields = Vec::new();
        loop {
            if self.eat('}') {
                return Ok(fields);
            }
            let name = self.identifier()?.to_string();
            self.expect(':')?;
            let required = self.eat('!');
            let shape = self.parse_type()?;
            fields.push(HashField {
                name,
                shape,
                required,
            });
            if !self.eat(',') {
                self.expect('}')?;
                return Ok(fields);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("String", TypeExpr::String)]
    #[case("integer", TypeExpr::Integer)]
    #[case("Float", TypeExpr::Number)]
    #[case("DateTime", TypeExpr::DateTime)]
    #[case("Hash", TypeExpr::Object)]
    #[case("Array", TypeExpr::Array(None))]
    #[case("User", TypeExpr::Named("User".to_string()))]
    #[case("Array<User>", TypeExpr::Array(Some(Box::new(TypeExpr::Named("User".to_string())))))]
    fn should_parse_simple_types(#[case] input: &str, #[case] expected: TypeExpr) {
        assert_eq!(input.parse::<TypeExpr>().ok(), Some(expected));
    }

    #[test]
    fn should_parse_nested_hash() {
        let expr = "Hash{ status: !Integer, errors: Array<Hash{ field: String }> }"
            .parse::<TypeExpr>();

        insta::assert_snapshot!(
            expr.map(|it| it.to_string()).unwrap_or_default(),
            @"Hash{ status: !Integer, errors: Array<Hash{ field: String }> }"
        );
    }

    #[rstest]
    #[case("")]
    #[case("Hash{ status: }")]
    #[case("Array<String")]
    #[case("String extra")]
    #[case("Hash{ a String }")]
    fn should_reject_malformed_types(#[case] input: &str) {
        assert!(input.parse::<TypeExpr>().is_err());
    }

    #[test]
    fn should_report_position() {
        let error = "Hash{ status: }".parse::<TypeExpr>().unwrap_err();

        insta::assert_snapshot!(
            error.to_string(),
            @"cannot parse type 'Hash{ status: }': expected a type at position 14"
        );
    }
}
