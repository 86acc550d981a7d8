//! A `nom` parser for XPath 1.0 expressions.
//!
//! Binary operators are handled by one precedence-driven routine; everything
//! at or below union level (unary minus, `|`, paths and primaries) has its own
//! function. Variable references are not accepted.

use super::ast::*;
use crate::error::XPathError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit0, digit1, multispace0},
    combinator::{map, map_res, opt, recognize, value, verify},
    error::{Error, ErrorKind},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, terminated},
};

type PResult<'a, T> = IResult<&'a str, T>;

/// Parses a complete expression; trailing input is an error.
pub fn parse_expression(input: &str) -> Result<Expression, XPathError> {
    match terminated(expr, multispace0).parse(input.trim()) {
        Ok(("", parsed)) => Ok(parsed),
        Ok((rest, _)) => Err(XPathError::XPathParse(
            input.to_string(),
            format!("unexpected input at '{}'", rest),
        )),
        Err(e) => Err(XPathError::XPathParse(input.to_string(), e.to_string())),
    }
}

/// A token surrounded by optional whitespace.
fn sym<'a>(token: &'static str) -> impl Parser<&'a str, Output = &'a str, Error = Error<&'a str>> {
    delimited(multispace0, tag(token), multispace0)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

// --- Operators ---

/// Binary operators grouped by binding strength, loosest first. Longer
/// tokens precede their prefixes.
const PRECEDENCE: &[&[(&str, BinaryOperator)]] = &[
    &[("or", BinaryOperator::Or)],
    &[("and", BinaryOperator::And)],
    &[("!=", BinaryOperator::NotEquals), ("=", BinaryOperator::Equals)],
    &[
        ("<=", BinaryOperator::LessThanOrEqual),
        (">=", BinaryOperator::GreaterThanOrEqual),
        ("<", BinaryOperator::LessThan),
        (">", BinaryOperator::GreaterThan),
    ],
    &[("+", BinaryOperator::Plus), ("-", BinaryOperator::Minus)],
    &[
        ("*", BinaryOperator::Multiply),
        ("div", BinaryOperator::Divide),
        ("mod", BinaryOperator::Modulo),
    ],
];

/// Matches one of `operators` at the start of `input`. Word operators must
/// not run into a following name character.
fn operator<'a>(input: &'a str, operators: &[(&str, BinaryOperator)]) -> PResult<'a, BinaryOperator> {
    for (token, op) in operators {
        let Some(rest) = input.strip_prefix(token) else {
            continue;
        };
        let is_word = token.starts_with(|c: char| c.is_ascii_alphabetic());
        if is_word && rest.starts_with(is_name_char) {
            continue;
        }
        return Ok((rest, *op));
    }
    Err(nom::Err::Error(Error::new(input, ErrorKind::Tag)))
}

// --- Expressions ---

fn expr(input: &str) -> PResult<'_, Expression> {
    binary_expr(input, 0)
}

/// Left-associative chain of the operators at `level`, over operands of the
/// next tighter level.
fn binary_expr(input: &str, level: usize) -> PResult<'_, Expression> {
    let Some(operators) = PRECEDENCE.get(level) else {
        return unary_expr(input);
    };
    let (mut rest, mut left) = binary_expr(input, level + 1)?;
    while let Ok((after_op, op)) = operator(rest.trim_start(), operators) {
        let (after, right) = binary_expr(after_op, level + 1)?;
        left = Expression::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        };
        rest = after;
    }
    Ok((rest, left))
}

fn unary_expr(input: &str) -> PResult<'_, Expression> {
    alt((
        map(preceded(sym("-"), unary_expr), |operand| Expression::UnaryOp {
            op: UnaryOperator::Minus,
            expr: Box::new(operand),
        }),
        union_expr,
    ))
    .parse(input)
}

fn union_expr(input: &str) -> PResult<'_, Expression> {
    let (mut rest, mut left) = path_expr(input)?;
    while let Ok((after_bar, _)) = sym("|").parse(rest) {
        let (after, right) = path_expr(after_bar)?;
        left = Expression::BinaryOp {
            left: Box::new(left),
            op: BinaryOperator::Union,
            right: Box::new(right),
        };
        rest = after;
    }
    Ok((rest, left))
}

/// A primary expression, optionally continued by `/step` segments, or a
/// plain location path.
fn path_expr(input: &str) -> PResult<'_, Expression> {
    let input = input.trim_start();
    if let Ok((rest, primary)) = primary_expr(input) {
        let (rest, steps) = trailing_steps(rest)?;
        if steps.is_empty() {
            return Ok((rest, primary));
        }
        let path = LocationPath {
            start_point: Some(Box::new(primary)),
            is_absolute: false,
            steps,
        };
        return Ok((rest, Expression::LocationPath(path)));
    }
    map(location_path, Expression::LocationPath).parse(input)
}

fn primary_expr(input: &str) -> PResult<'_, Expression> {
    alt((
        map(number, Expression::Number),
        map(literal, Expression::Literal),
        function_call,
        delimited(sym("("), expr, sym(")")),
    ))
    .parse(input)
}

fn function_call(input: &str) -> PResult<'_, Expression> {
    // `text()` and friends are node tests, not calls.
    let (rest, name) = verify(q_name, |name: &str| NodeTypeTest::from_name(name).is_none()).parse(input)?;
    let (rest, args) = delimited(sym("("), separated_list0(sym(","), expr), sym(")")).parse(rest)?;
    Ok((
        rest,
        Expression::FunctionCall {
            name: name.to_string(),
            args,
        },
    ))
}

// --- Literals and names ---

// Digits only, so names such as `nan` or `inf` stay names.
fn number(input: &str) -> PResult<'_, f64> {
    map_res(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        str::parse::<f64>,
    )
    .parse(input)
}

fn literal(input: &str) -> PResult<'_, String> {
    map(
        alt((
            delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
            delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
        )),
        str::to_string,
    )
    .parse(input)
}

fn nc_name(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_alphabetic() || c == '_'),
        take_while(is_name_char),
    ))
    .parse(input)
}

fn q_name(input: &str) -> PResult<'_, &str> {
    recognize(pair(nc_name, opt(pair(char(':'), nc_name)))).parse(input)
}

// --- Location paths ---

/// `/` or `//`; the flag is true for `//`.
fn separator(input: &str) -> PResult<'_, bool> {
    alt((value(true, sym("//")), value(false, sym("/")))).parse(input)
}

/// Zero or more `/step` or `//step` segments.
fn trailing_steps(mut input: &str) -> PResult<'_, Vec<Step>> {
    let mut steps = Vec::new();
    while let Ok((rest, descendant)) = separator(input) {
        let (rest, next) = step(rest)?;
        if descendant {
            steps.push(Step::descendant_or_self());
        }
        steps.push(next);
        input = rest;
    }
    Ok((input, steps))
}

fn location_path(input: &str) -> PResult<'_, LocationPath> {
    let Ok((rest, descendant)) = separator(input) else {
        let (rest, first) = step(input)?;
        let (rest, mut more) = trailing_steps(rest)?;
        more.insert(0, first);
        return Ok((rest, LocationPath::relative(more)));
    };

    let mut steps = Vec::new();
    if descendant {
        steps.push(Step::descendant_or_self());
    }
    let rest = match step(rest) {
        Ok((rest, first)) => {
            steps.push(first);
            rest
        }
        // A lone `/` selects the root.
        Err(_) if !descendant => return Ok((rest, LocationPath::absolute(steps))),
        Err(e) => return Err(e),
    };
    let (rest, more) = trailing_steps(rest)?;
    steps.extend(more);
    Ok((rest, LocationPath::absolute(steps)))
}

fn step(input: &str) -> PResult<'_, Step> {
    let any_node = NodeTest::NodeType(NodeTypeTest::Node);
    let (rest, (axis, node_test)) = alt((
        value((Axis::Parent, any_node.clone()), tag("..")),
        value((Axis::SelfAxis, any_node), char('.')),
        map(preceded(char('@'), node_test), |test| (Axis::Attribute, test)),
        map(pair(opt(axis_specifier), node_test), |(axis, test)| {
            (axis.unwrap_or(Axis::Child), test)
        }),
    ))
    .parse(input)?;
    let (rest, predicates) = many0(delimited(sym("["), expr, sym("]"))).parse(rest)?;
    Ok((
        rest,
        Step {
            axis,
            node_test,
            predicates,
        },
    ))
}

fn axis_specifier(input: &str) -> PResult<'_, Axis> {
    map_res(terminated(nc_name, sym("::")), |name| Axis::from_name(name).ok_or(())).parse(input)
}

fn node_test(input: &str) -> PResult<'_, NodeTest> {
    alt((
        map(
            terminated(
                map_res(nc_name, |name| NodeTypeTest::from_name(name).ok_or(())),
                pair(sym("("), char(')')),
            ),
            NodeTest::NodeType,
        ),
        map(recognize(pair(nc_name, tag(":*"))), |name: &str| {
            NodeTest::Name(name.to_string())
        }),
        value(NodeTest::Wildcard, char('*')),
        map(q_name, |name: &str| NodeTest::Name(name.to_string())),
    ))
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(name: &str) -> Step {
        Step {
            axis: Axis::Child,
            node_test: NodeTest::Name(name.into()),
            predicates: vec![],
        }
    }

    fn path(expr: Expression) -> LocationPath {
        match expr {
            Expression::LocationPath(lp) => lp,
            other => panic!("Expected location path, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_prefixed_path() {
        assert_eq!(
            parse_expression("csw:Record/dc:title").unwrap(),
            Expression::LocationPath(LocationPath::relative(vec![
                child("csw:Record"),
                child("dc:title")
            ]))
        );
    }

    #[test]
    fn test_parse_attribute_and_wildcards() {
        let lp = path(parse_expression("dc:identifier/@scheme").unwrap());
        assert_eq!(lp.steps[1].axis, Axis::Attribute);
        assert_eq!(lp.steps[1].node_test, NodeTest::Name("scheme".into()));

        let lp = path(parse_expression("gmd:*/@*").unwrap());
        assert_eq!(lp.steps[0].node_test, NodeTest::Name("gmd:*".into()));
        assert_eq!(lp.steps[1].node_test, NodeTest::Wildcard);
    }

    #[test]
    fn test_parse_abbreviated_steps() {
        let lp = path(parse_expression("./../dc:title").unwrap());
        assert_eq!(lp.steps.len(), 3);
        assert_eq!(lp.steps[0].axis, Axis::SelfAxis);
        assert_eq!(lp.steps[1].axis, Axis::Parent);
        assert_eq!(lp.steps[1].node_test, NodeTest::NodeType(NodeTypeTest::Node));
    }

    #[test]
    fn test_parse_absolute_paths() {
        assert_eq!(
            parse_expression("//dc:title").unwrap(),
            Expression::LocationPath(LocationPath::absolute(vec![
                Step::descendant_or_self(),
                child("dc:title"),
            ]))
        );
        assert_eq!(
            parse_expression("/").unwrap(),
            Expression::LocationPath(LocationPath::absolute(vec![]))
        );
        let lp = path(parse_expression("/csw:Record//dc:title/text()").unwrap());
        assert_eq!(lp.steps.len(), 4);
        assert_eq!(lp.steps[3].node_test, NodeTest::NodeType(NodeTypeTest::Text));
    }

    #[test]
    fn test_names_that_look_like_numbers_or_operators() {
        assert_eq!(
            parse_expression("info/nan").unwrap(),
            Expression::LocationPath(LocationPath::relative(vec![child("info"), child("nan")]))
        );
        assert_eq!(
            parse_expression("order/modified").unwrap(),
            Expression::LocationPath(LocationPath::relative(vec![
                child("order"),
                child("modified")
            ]))
        );
        assert_eq!(parse_expression("2.5").unwrap(), Expression::Number(2.5));
        assert_eq!(parse_expression(".5").unwrap(), Expression::Number(0.5));
    }

    #[test]
    fn test_parse_predicate() {
        let lp = path(parse_expression("dc:identifier[@scheme = 'urn']").unwrap());
        let attribute = Step {
            axis: Axis::Attribute,
            node_test: NodeTest::Name("scheme".into()),
            predicates: vec![],
        };
        assert_eq!(
            lp.steps[0].predicates,
            vec![Expression::BinaryOp {
                left: Box::new(Expression::LocationPath(LocationPath::relative(vec![attribute]))),
                op: BinaryOperator::Equals,
                right: Box::new(Expression::Literal("urn".into())),
            }]
        );
    }

    #[test]
    fn test_parse_function_calls() {
        let lp = path(parse_expression("dc:title[position() = 1]").unwrap());
        assert!(lp.steps[0].predicates[0].is_binary_op());

        assert_eq!(
            parse_expression("concat('a', \"b\")").unwrap(),
            Expression::FunctionCall {
                name: "concat".into(),
                args: vec![Expression::Literal("a".into()), Expression::Literal("b".into())],
            }
        );
    }

    #[test]
    fn test_parse_operator_precedence() {
        assert_eq!(
            parse_expression("1 + 2 * 3").unwrap(),
            Expression::BinaryOp {
                left: Box::new(Expression::Number(1.0)),
                op: BinaryOperator::Plus,
                right: Box::new(Expression::BinaryOp {
                    left: Box::new(Expression::Number(2.0)),
                    op: BinaryOperator::Multiply,
                    right: Box::new(Expression::Number(3.0)),
                }),
            }
        );
        assert_eq!(
            parse_expression("-1 - 2").unwrap(),
            Expression::BinaryOp {
                left: Box::new(Expression::UnaryOp {
                    op: UnaryOperator::Minus,
                    expr: Box::new(Expression::Number(1.0)),
                }),
                op: BinaryOperator::Minus,
                right: Box::new(Expression::Number(2.0)),
            }
        );
        let or = parse_expression("a = 1 or b and c").unwrap();
        assert!(matches!(or, Expression::BinaryOp { op: BinaryOperator::Or, .. }));
    }

    #[test]
    fn test_parse_axes() {
        let lp = path(parse_expression("ancestor-or-self::csw:Record").unwrap());
        assert_eq!(lp.steps[0].axis, Axis::AncestorOrSelf);
        let lp = path(parse_expression("preceding-sibling::*[1]").unwrap());
        assert_eq!(lp.steps[0].axis, Axis::PrecedingSibling);
        assert!(parse_expression("sideways::x").is_err());
    }

    #[test]
    fn test_name_tests_walk_predicates() {
        let expr = parse_expression("gmd:date[gco:Date = '2010']/@codeList | dc:title").unwrap();
        assert_eq!(
            expr.name_tests(),
            vec![
                (Axis::Child, "gmd:date"),
                (Axis::Child, "gco:Date"),
                (Axis::Attribute, "codeList"),
                (Axis::Child, "dc:title"),
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_expression("dc:title[@x='y'"),
            Err(XPathError::XPathParse(..))
        ));
        assert!(parse_expression("$var").is_err());
        assert!(parse_expression("dc:title]").is_err());
        assert!(parse_expression("dc:title/").is_err());
        assert!(parse_expression("1 +").is_err());
    }
}
