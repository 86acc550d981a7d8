//! Syntax tree produced by [`crate::parse_expression`].

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(String),
    Number(f64),
    LocationPath(LocationPath),
    FunctionCall {
        name: String,
        args: Vec<Expression>,
    },
    BinaryOp {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },
    UnaryOp {
        op: UnaryOperator,
        expr: Box<Expression>,
    },
}

impl Expression {
    pub fn is_binary_op(&self) -> bool {
        matches!(self, Expression::BinaryOp { .. })
    }

    /// Every name test in the expression, predicates and function arguments
    /// included, in source order and paired with the axis it is applied on.
    pub fn name_tests(&self) -> Vec<(Axis, &str)> {
        let mut out = Vec::new();
        self.visit_name_tests(&mut out);
        out
    }

    fn visit_name_tests<'e>(&'e self, out: &mut Vec<(Axis, &'e str)>) {
        match self {
            Expression::LocationPath(path) => {
                if let Some(start) = &path.start_point {
                    start.visit_name_tests(out);
                }
                for step in &path.steps {
                    if let NodeTest::Name(name) = &step.node_test {
                        out.push((step.axis, name.as_str()));
                    }
                    step.predicates.iter().for_each(|p| p.visit_name_tests(out));
                }
            }
            Expression::FunctionCall { args, .. } => args.iter().for_each(|a| a.visit_name_tests(out)),
            Expression::BinaryOp { left, right, .. } => {
                left.visit_name_tests(out);
                right.visit_name_tests(out);
            }
            Expression::UnaryOp { expr, .. } => expr.visit_name_tests(out),
            Expression::Literal(_) | Expression::Number(_) => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Or,
    And,
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Union,
}

/// A sequence of steps such as `/csw:Record/dc:title` or `gmd:date[1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationPath {
    /// Expression the steps continue from, as in `(a|b)/c`. When set,
    /// `is_absolute` is ignored.
    pub start_point: Option<Box<Expression>>,
    /// Starts at the document root rather than the context node.
    pub is_absolute: bool,
    pub steps: Vec<Step>,
}

impl LocationPath {
    pub fn relative(steps: Vec<Step>) -> Self {
        Self {
            start_point: None,
            is_absolute: false,
            steps,
        }
    }

    pub fn absolute(steps: Vec<Step>) -> Self {
        Self {
            start_point: None,
            is_absolute: true,
            steps,
        }
    }
}

/// One step, e.g. `child::dc:title[1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub axis: Axis,
    pub node_test: NodeTest,
    pub predicates: Vec<Expression>,
}

impl Step {
    /// The step `//` abbreviates.
    pub fn descendant_or_self() -> Self {
        Self {
            axis: Axis::DescendantOrSelf,
            node_test: NodeTest::NodeType(NodeTypeTest::Node),
            predicates: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Child,
    Descendant,
    DescendantOrSelf,
    Attribute,
    Parent,
    Ancestor,
    AncestorOrSelf,
    SelfAxis,
    FollowingSibling,
    PrecedingSibling,
    Following,
    Preceding,
}

impl Axis {
    const NAMES: [(&'static str, Axis); 12] = [
        ("child", Axis::Child),
        ("descendant", Axis::Descendant),
        ("descendant-or-self", Axis::DescendantOrSelf),
        ("attribute", Axis::Attribute),
        ("parent", Axis::Parent),
        ("ancestor", Axis::Ancestor),
        ("ancestor-or-self", Axis::AncestorOrSelf),
        ("self", Axis::SelfAxis),
        ("following-sibling", Axis::FollowingSibling),
        ("preceding-sibling", Axis::PrecedingSibling),
        ("following", Axis::Following),
        ("preceding", Axis::Preceding),
    ];

    /// Looks up an axis by its name in `axis::test` syntax.
    pub fn from_name(name: &str) -> Option<Axis> {
        Self::NAMES.iter().find(|(n, _)| *n == name).map(|(_, axis)| *axis)
    }

    pub fn name(&self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, axis)| axis == self)
            .map_or("child", |(n, _)| *n)
    }

    /// Reverse axes number their nodes in reverse document order for predicates.
    pub fn is_reverse(&self) -> bool {
        matches!(
            self,
            Axis::Parent | Axis::Ancestor | Axis::AncestorOrSelf | Axis::PrecedingSibling | Axis::Preceding
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTest {
    /// `title`, `dc:title` or `gmd:*`.
    Name(String),
    /// `*`
    Wildcard,
    NodeType(NodeTypeTest),
}

/// `text()`, `node()`, `comment()` or `processing-instruction()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTypeTest {
    Text,
    Node,
    Comment,
    ProcessingInstruction,
}

impl NodeTypeTest {
    pub fn from_name(name: &str) -> Option<NodeTypeTest> {
        match name {
            "text" => Some(NodeTypeTest::Text),
            "node" => Some(NodeTypeTest::Node),
            "comment" => Some(NodeTypeTest::Comment),
            "processing-instruction" => Some(NodeTypeTest::ProcessingInstruction),
            _ => None,
        }
    }
}
