//! A `nom`-based parser for the filter expression language.
use super::ast::*;
use crate::error::FilterError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, multispace0, satisfy},
    combinator::{map, opt, recognize},
    error::{Error, ErrorKind},
    multi::{many0, separated_list0},
    number::complete::double,
    sequence::{delimited, pair, preceded},
};

// --- Main Public Parser ---

pub fn parse_expression(input: &str) -> Result<Expression, FilterError> {
    match expression(input.trim()) {
        Ok(("", expr)) => Ok(expr),
        Ok((rem, _)) => Err(FilterError::Parse(
            input.to_string(),
            format!("Parser did not consume all input. Remainder: '{}'", rem),
        )),
        Err(e) => Err(FilterError::Parse(input.to_string(), e.to_string())),
    }
}

// --- Combinators & Helpers ---

/// A combinator that takes a parser `inner` and produces a parser that consumes surrounding whitespace.
fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

fn build_binary_expr_parser<'a, F, G>(
    sub_expr_parser: F,
    op_parser: G,
) -> impl FnMut(&'a str) -> IResult<&'a str, Expression>
where
    F: Parser<&'a str, Output = Expression, Error = Error<&'a str>> + Clone,
    G: Parser<&'a str, Output = BinaryOperator, Error = Error<&'a str>> + Clone,
{
    move |input: &str| {
        let (input, mut left) = sub_expr_parser.clone().parse(input)?;
        let (input, remainder) =
            many0(pair(ws(op_parser.clone()), sub_expr_parser.clone())).parse(input)?;

        for (op, right) in remainder {
            left = Expression::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok((input, left))
    }
}

// --- Expression Parsers (in order of precedence) ---

fn expression(input: &str) -> IResult<&str, Expression> {
    or_expr(input)
}

fn or_op(input: &str) -> IResult<&str, BinaryOperator> {
    map(tag("||"), |_| BinaryOperator::Or).parse(input)
}

fn and_op(input: &str) -> IResult<&str, BinaryOperator> {
    map(tag("&&"), |_| BinaryOperator::And).parse(input)
}

fn equality_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        map(tag("==="), |_| BinaryOperator::StrictEquals),
        map(tag("!=="), |_| BinaryOperator::StrictNotEquals),
        map(tag("=="), |_| BinaryOperator::Equals),
        map(tag("!="), |_| BinaryOperator::NotEquals),
    ))
    .parse(input)
}

fn relational_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        map(tag("<="), |_| BinaryOperator::LessThanOrEqual),
        map(tag(">="), |_| BinaryOperator::GreaterThanOrEqual),
        map(tag("<"), |_| BinaryOperator::LessThan),
        map(tag(">"), |_| BinaryOperator::GreaterThan),
    ))
    .parse(input)
}

fn additive_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        map(char('+'), |_| BinaryOperator::Plus),
        map(char('-'), |_| BinaryOperator::Minus),
    ))
    .parse(input)
}

fn multiplicative_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        map(char('*'), |_| BinaryOperator::Multiply),
        map(char('/'), |_| BinaryOperator::Divide),
        map(char('%'), |_| BinaryOperator::Modulo),
    ))
    .parse(input)
}

fn or_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(and_expr, or_op)(input)
}

fn and_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(equality_expr, and_op)(input)
}

fn equality_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(relational_expr, equality_op)(input)
}

fn relational_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(additive_expr, relational_op)(input)
}

fn additive_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(multiplicative_expr, additive_op)(input)
}

fn multiplicative_expr(input: &str) -> IResult<&str, Expression> {
    build_binary_expr_parser(unary_expr, multiplicative_op)(input)
}

fn unary_expr(input: &str) -> IResult<&str, Expression> {
    alt((
        map(preceded(ws(char('!')), unary_expr), |expr| {
            Expression::UnaryOp {
                op: UnaryOperator::Not,
                expr: Box::new(expr),
            }
        }),
        map(preceded(ws(char('-')), unary_expr), |expr| {
            Expression::UnaryOp {
                op: UnaryOperator::Minus,
                expr: Box::new(expr),
            }
        }),
        postfix_expr,
    ))
    .parse(input)
}

// --- Member access, calls and indexing ---

enum Suffix {
    Member(String, Option<Vec<Expression>>),
    Index(Expression),
}

fn arguments(input: &str) -> IResult<&str, Vec<Expression>> {
    delimited(
        ws(char('(')),
        separated_list0(ws(char(',')), expression),
        ws(char(')')),
    )
    .parse(input)
}

fn suffix(input: &str) -> IResult<&str, Suffix> {
    alt((
        map(
            pair(preceded(ws(char('.')), identifier), opt(arguments)),
            |(name, args)| Suffix::Member(name.to_string(), args),
        ),
        map(
            delimited(ws(char('[')), expression, ws(char(']'))),
            Suffix::Index,
        ),
    ))
    .parse(input)
}

fn postfix_expr(input: &str) -> IResult<&str, Expression> {
    let (input, base) = primary_expr(input)?;
    let (input, suffixes) = many0(suffix).parse(input)?;

    let expr = suffixes
        .into_iter()
        .fold(base, |receiver, suffix| match suffix {
            Suffix::Member(name, args) => Expression::Member {
                receiver: Box::new(receiver),
                name,
                args,
            },
            Suffix::Index(index) => Expression::Index {
                receiver: Box::new(receiver),
                index: Box::new(index),
            },
        });
    Ok((input, expr))
}

fn primary_expr(input: &str) -> IResult<&str, Expression> {
    ws(alt((
        map(string_literal, |s| Expression::Literal(Literal::Text(s))),
        delimited(char('('), expression, ws(char(')'))),
        // Names come before numbers so that `inf`/`nan` are never read as floats.
        name_expr,
        map(double, |n| Expression::Literal(Literal::Number(n))),
    )))
    .parse(input)
}

// --- Names, keywords and calls ---

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    ))
    .parse(input)
}

fn name_expr(input: &str) -> IResult<&str, Expression> {
    let (rest, name) = identifier(input)?;
    match name {
        "true" => Ok((rest, Expression::Literal(Literal::Bool(true)))),
        "false" => Ok((rest, Expression::Literal(Literal::Bool(false)))),
        "null" | "undefined" => Ok((rest, Expression::Literal(Literal::Null))),
        _ => {
            let (rest, args) = opt(arguments).parse(rest)?;
            let expr = match args {
                Some(args) => Expression::FunctionCall {
                    name: name.to_string(),
                    args,
                },
                None => Expression::Variable(name.to_string()),
            };
            Ok((rest, expr))
        }
    }
}

// --- Literal Parsers ---

/// A single- or double-quoted string. A backslash escapes the next character;
/// `\n`, `\t` and `\r` map to their control characters.
fn string_literal(input: &str) -> IResult<&str, String> {
    let mut chars = input.char_indices();
    let quote = match chars.next() {
        Some((_, q @ ('\'' | '"'))) => q,
        _ => return Err(nom::Err::Error(Error::new(input, ErrorKind::Char))),
    };

    let mut out = String::new();
    let mut escaped = false;
    for (i, c) in chars {
        if escaped {
            out.push(match c {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                other => other,
            });
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Ok((&input[i + c.len_utf8()..], out));
        } else {
            out.push(c);
        }
    }
    Err(nom::Err::Error(Error::new(input, ErrorKind::Char)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Expression {
        Expression::Literal(Literal::Text(s.to_string()))
    }

    fn var(s: &str) -> Expression {
        Expression::Variable(s.to_string())
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(parse_expression("true").unwrap(), Expression::Literal(Literal::Bool(true)));
        assert_eq!(parse_expression("null").unwrap(), Expression::Literal(Literal::Null));
        assert_eq!(parse_expression("42").unwrap(), Expression::Literal(Literal::Number(42.0)));
        assert_eq!(parse_expression("'it\\'s'").unwrap(), text("it's"));
        assert_eq!(parse_expression("\"Active\"").unwrap(), text("Active"));
        assert_eq!(parse_expression("'\"Active\"'").unwrap(), text("\"Active\""));
    }

    #[test]
    fn test_parse_precedence() {
        let expr = parse_expression("1 + 2 * 3 == 7 && !false").unwrap();
        match expr {
            Expression::BinaryOp { op: BinaryOperator::And, left, right } => {
                assert!(matches!(*left, Expression::BinaryOp { op: BinaryOperator::Equals, .. }));
                assert!(matches!(*right, Expression::UnaryOp { op: UnaryOperator::Not, .. }));
            }
            other => panic!("Expected an && at the top, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_strict_operators_before_loose() {
        let expr = parse_expression("a === b").unwrap();
        assert_eq!(
            expr,
            Expression::BinaryOp {
                left: Box::new(var("a")),
                op: BinaryOperator::StrictEquals,
                right: Box::new(var("b")),
            }
        );
    }

    #[test]
    fn test_parse_method_chain_and_call() {
        let expr = parse_expression("!unDoubleQuote(value).endsWith('-03')").unwrap();
        let expected = Expression::UnaryOp {
            op: UnaryOperator::Not,
            expr: Box::new(Expression::Member {
                receiver: Box::new(Expression::FunctionCall {
                    name: "unDoubleQuote".to_string(),
                    args: vec![var("value")],
                }),
                name: "endsWith".to_string(),
                args: Some(vec![text("-03")]),
            }),
        };
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_property_and_index() {
        let expr = parse_expression("value.tags[0].length").unwrap();
        let expected = Expression::Member {
            receiver: Box::new(Expression::Index {
                receiver: Box::new(Expression::Member {
                    receiver: Box::new(var("value")),
                    name: "tags".to_string(),
                    args: None,
                }),
                index: Box::new(Expression::Literal(Literal::Number(0.0))),
            }),
            name: "length".to_string(),
            args: None,
        };
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_with_loose_whitespace() {
        assert!(parse_expression(" 'Active' !=  unDoubleQuote( value.get('status') ) ").is_ok());
        assert!(parse_expression("unDoubleQuote(value).matches('cld-('+ d+ '+)-'+ d+ '')").is_ok());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_expression("value ==").unwrap_err(), FilterError::Parse(..)));
        assert!(matches!(parse_expression("'unterminated").unwrap_err(), FilterError::Parse(..)));
        assert!(matches!(parse_expression("a = b").unwrap_err(), FilterError::Parse(..)));
        assert!(matches!(parse_expression("").unwrap_err(), FilterError::Parse(..)));
    }
}
