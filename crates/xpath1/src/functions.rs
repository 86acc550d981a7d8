//! Built-in implementations of the XPath 1.0 core function library.

use super::engine::{EvaluationContext, XPathValue};
use crate::datasource::DataSourceNode;
use crate::error::XPathError;

/// Dispatches a function call to the correct implementation.
pub fn evaluate_function<'a, 'd, N: DataSourceNode<'a>>(
    name: &str,
    args: Vec<XPathValue<N>>,
    e_ctx: &EvaluationContext<'a, 'd, N>,
) -> Result<XPathValue<N>, XPathError> {
    match name {
        // Node-set
        "count" => func_count(name, args),
        "position" => no_args(name, &args).map(|_| position(e_ctx.context_position)),
        "last" => no_args(name, &args).map(|_| position(e_ctx.context_size)),
        "local-name" | "name" | "namespace-uri" => func_name_parts(name, args, e_ctx),

        // String
        "string" => {
            let arg = optional_arg(name, args, e_ctx)?;
            Ok(XPathValue::String(arg.to_string()))
        }
        "concat" => func_concat(name, args),
        "contains" => string_pair(name, args, |a, b| XPathValue::Boolean(a.contains(b))),
        "starts-with" => string_pair(name, args, |a, b| XPathValue::Boolean(a.starts_with(b))),
        "substring-before" => string_pair(name, args, |a, b| {
            XPathValue::String(a.find(b).map(|i| a[..i].to_string()).unwrap_or_default())
        }),
        "substring-after" => string_pair(name, args, |a, b| {
            XPathValue::String(
                a.find(b)
                    .map(|i| a[i + b.len()..].to_string())
                    .unwrap_or_default(),
            )
        }),
        "substring" => func_substring(name, args),
        "string-length" => {
            let arg = optional_arg(name, args, e_ctx)?;
            Ok(XPathValue::Number(arg.to_string().chars().count() as f64))
        }
        "normalize-space" => {
            let arg = optional_arg(name, args, e_ctx)?;
            let normalized = arg.to_string().split_whitespace().collect::<Vec<_>>().join(" ");
            Ok(XPathValue::String(normalized))
        }
        "translate" => func_translate(name, args),

        // Boolean
        "not" => {
            let [arg] = exact::<N, 1>(name, args)?;
            Ok(XPathValue::Boolean(!arg.to_bool()))
        }
        "true" => no_args(name, &args).map(|_| XPathValue::Boolean(true)),
        "false" => no_args(name, &args).map(|_| XPathValue::Boolean(false)),

        // Number
        "number" => {
            let arg = optional_arg(name, args, e_ctx)?;
            Ok(XPathValue::Number(arg.to_number()))
        }
        "sum" => func_sum(name, args),
        "floor" => number_fn(name, args, f64::floor),
        "ceiling" => number_fn(name, args, f64::ceil),
        "round" => number_fn(name, args, round_half_up),

        _ => Err(XPathError::FunctionError {
            function: name.to_string(),
            message: "Unknown XPath function".to_string(),
        }),
    }
}

fn arity_error(function: &str, expected: &str, got: usize) -> XPathError {
    XPathError::FunctionError {
        function: function.to_string(),
        message: format!("Expected {} argument(s), got {}", expected, got),
    }
}

fn exact<N, const K: usize>(
    function: &str,
    args: Vec<XPathValue<N>>,
) -> Result<[XPathValue<N>; K], XPathError> {
    let got = args.len();
    args.try_into()
        .map_err(|_| arity_error(function, &K.to_string(), got))
}

fn no_args<N>(function: &str, args: &[XPathValue<N>]) -> Result<(), XPathError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(arity_error(function, "0", args.len()))
    }
}

/// A single optional argument, defaulting to the context node.
fn optional_arg<'a, N: DataSourceNode<'a>>(
    function: &str,
    mut args: Vec<XPathValue<N>>,
    e_ctx: &EvaluationContext<'a, '_, N>,
) -> Result<XPathValue<N>, XPathError> {
    match args.len() {
        0 => Ok(XPathValue::NodeSet(vec![e_ctx.context_node])),
        1 => Ok(args.remove(0)),
        n => Err(arity_error(function, "0 or 1", n)),
    }
}

fn position<N>(value: usize) -> XPathValue<N> {
    XPathValue::Number(value as f64)
}

fn func_count<'a, N: DataSourceNode<'a>>(
    function: &str,
    args: Vec<XPathValue<N>>,
) -> Result<XPathValue<N>, XPathError> {
    match exact::<N, 1>(function, args)? {
        [XPathValue::NodeSet(nodes)] => Ok(XPathValue::Number(nodes.len() as f64)),
        _ => Err(XPathError::TypeError(
            "count() argument must be a node-set".to_string(),
        )),
    }
}

/// `local-name`, `name` and `namespace-uri` of the first node of the
/// argument, or of the context node.
fn func_name_parts<'a, N: DataSourceNode<'a>>(
    function: &str,
    args: Vec<XPathValue<N>>,
    e_ctx: &EvaluationContext<'a, '_, N>,
) -> Result<XPathValue<N>, XPathError> {
    let node = match optional_arg(function, args, e_ctx)? {
        XPathValue::NodeSet(nodes) => nodes.first().copied(),
        _ => {
            return Err(XPathError::TypeError(format!(
                "{}() argument must be a node-set",
                function
            )));
        }
    };
    let value = node
        .and_then(|n| n.name())
        .map(|q| match function {
            "local-name" => q.local_part.to_string(),
            "namespace-uri" => q.namespace.unwrap_or_default().to_string(),
            _ => match q.prefix {
                Some(prefix) => format!("{}:{}", prefix, q.local_part),
                None => q.local_part.to_string(),
            },
        })
        .unwrap_or_default();
    Ok(XPathValue::String(value))
}

fn func_concat<'a, N: DataSourceNode<'a>>(
    function: &str,
    args: Vec<XPathValue<N>>,
) -> Result<XPathValue<N>, XPathError> {
    if args.len() < 2 {
        return Err(arity_error(function, "at least 2", args.len()));
    }
    Ok(XPathValue::String(
        args.iter().map(|a| a.to_string()).collect(),
    ))
}

fn string_pair<'a, N: DataSourceNode<'a>>(
    function: &str,
    args: Vec<XPathValue<N>>,
    f: impl Fn(&str, &str) -> XPathValue<N>,
) -> Result<XPathValue<N>, XPathError> {
    let [a, b] = exact::<N, 2>(function, args)?;
    Ok(f(&a.to_string(), &b.to_string()))
}

/// XPath `substring` counts characters from 1 and rounds its bounds.
fn func_substring<'a, N: DataSourceNode<'a>>(
    function: &str,
    args: Vec<XPathValue<N>>,
) -> Result<XPathValue<N>, XPathError> {
    if !(2..=3).contains(&args.len()) {
        return Err(arity_error(function, "2 or 3", args.len()));
    }
    let s = args[0].to_string();
    let start = round_half_up(args[1].to_number());
    let end = match args.get(2) {
        Some(len) => start + round_half_up(len.to_number()),
        None => f64::INFINITY,
    };
    let out = s
        .chars()
        .enumerate()
        .filter(|(i, _)| {
            let pos = (*i + 1) as f64;
            pos >= start && pos < end
        })
        .map(|(_, c)| c)
        .collect();
    Ok(XPathValue::String(out))
}

fn func_translate<'a, N: DataSourceNode<'a>>(
    function: &str,
    args: Vec<XPathValue<N>>,
) -> Result<XPathValue<N>, XPathError> {
    let [s, from, to] = exact::<N, 3>(function, args)?;
    let from: Vec<char> = from.to_string().chars().collect();
    let to: Vec<char> = to.to_string().chars().collect();
    let out = s
        .to_string()
        .chars()
        .filter_map(|c| match from.iter().position(|f| *f == c) {
            Some(idx) => to.get(idx).copied(),
            None => Some(c),
        })
        .collect();
    Ok(XPathValue::String(out))
}

fn func_sum<'a, N: DataSourceNode<'a>>(
    function: &str,
    args: Vec<XPathValue<N>>,
) -> Result<XPathValue<N>, XPathError> {
    match exact::<N, 1>(function, args)? {
        [XPathValue::NodeSet(nodes)] => Ok(XPathValue::Number(
            nodes
                .iter()
                .map(|n| n.string_value().trim().parse::<f64>().unwrap_or(f64::NAN))
                .sum(),
        )),
        _ => Err(XPathError::TypeError(
            "sum() argument must be a node-set".to_string(),
        )),
    }
}

fn number_fn<'a, N: DataSourceNode<'a>>(
    function: &str,
    args: Vec<XPathValue<N>>,
    f: fn(f64) -> f64,
) -> Result<XPathValue<N>, XPathError> {
    let [arg] = exact::<N, 1>(function, args)?;
    Ok(XPathValue::Number(f(arg.to_number())))
}

/// XPath rounds halves towards positive infinity.
fn round_half_up(n: f64) -> f64 {
    if n.is_nan() || n.is_infinite() {
        n
    } else {
        (n + 0.5).floor()
    }
}
