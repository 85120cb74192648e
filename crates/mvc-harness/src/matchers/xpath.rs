//! XPath result matchers
//!
//! [`xpath`] renders an expression template, [`XpathExpectations::namespaces`]
//! binds prefixes, and each terminal operation yields an [`XpathMatcher`].
//! A matcher evaluates its expression once per invocation against the
//! response body:
//!
//! 1. compile the expression
//! 2. parse the body as XML
//! 3. install the namespace bindings
//! 4. evaluate against the document root, keeping nodes in document order
//!
//! Text coercions read the first matched node's string value. Scalar
//! results (`count(...)`, `string(...)`, comparisons) coerce directly, while
//! node operations on a scalar result are setup errors.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use predicates::{BoxPredicate, Predicate};
use sxd_document::parser;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value};

use crate::matchers::template::render;
use crate::matchers::{MatchError, ResultMatcher, assert_equals};
use crate::result::MvcResult;

/// Start an XPath expectation from a template and its arguments.
///
/// See [`render`] for the template syntax. Rendering problems surface as
/// setup errors when the matcher runs.
pub fn xpath(expression: &str, args: &[&dyn Display]) -> XpathExpectations {
    XpathExpectations {
        expression: render(expression, args),
        namespaces: BTreeMap::new(),
    }
}

/// Kind of a matched node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Element,
    Attribute,
    Text,
    Comment,
    Other,
}

/// Owned snapshot of a matched node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedNode {
    pub kind: NodeKind,
    /// Local name of an element or attribute
    pub name: Option<String>,
    pub namespace_uri: Option<String>,
    /// XPath string value
    pub value: String,
}

impl MatchedNode {
    fn from_node(node: Node<'_>) -> Self {
        let (kind, name, namespace_uri) = match node {
            Node::Root(_) => (NodeKind::Root, None, None),
            Node::Element(element) => {
                let name = element.name();
                (
                    NodeKind::Element,
                    Some(name.local_part().to_string()),
                    name.namespace_uri().map(str::to_string),
                )
            }
            Node::Attribute(attribute) => {
                let name = attribute.name();
                (
                    NodeKind::Attribute,
                    Some(name.local_part().to_string()),
                    name.namespace_uri().map(str::to_string),
                )
            }
            Node::Text(_) => (NodeKind::Text, None, None),
            Node::Comment(_) => (NodeKind::Comment, None, None),
            _ => (NodeKind::Other, None, None),
        };

        Self {
            kind,
            name,
            namespace_uri,
            value: node.string_value(),
        }
    }
}

impl Display for MatchedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.name) {
            (NodeKind::Element, Some(name)) => write!(f, "<{name}>{}</{name}>", self.value),
            (NodeKind::Attribute, Some(name)) => write!(f, "@{name}=\"{}\"", self.value),
            _ => f.write_str(&self.value),
        }
    }
}

/// An XPath expression plus namespace bindings, awaiting a terminal
/// operation.
#[derive(Debug, Clone)]
pub struct XpathExpectations {
    expression: Result<String, MatchError>,
    namespaces: BTreeMap<String, String>,
}

impl XpathExpectations {
    /// Bind namespace prefixes used by the expression.
    pub fn namespaces<I, K, V>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.namespaces
            .extend(namespaces.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The rendered expression, or the template error.
    pub fn expression(&self) -> Result<&str, &MatchError> {
        self.expression.as_deref()
    }

    /// At least one node matches.
    pub fn exists(self) -> XpathMatcher {
        self.matcher(Check::Exists)
    }

    /// No node matches.
    pub fn does_not_exist(self) -> XpathMatcher {
        self.matcher(Check::DoesNotExist)
    }

    /// The first matched node, or `None`, satisfies `predicate`.
    pub fn node<P>(self, predicate: P) -> XpathMatcher
    where
        P: Predicate<Option<MatchedNode>> + Send + Sync + 'static,
    {
        self.matcher(Check::Node(BoxPredicate::new(predicate)))
    }

    pub fn node_count(self, expected: usize) -> XpathMatcher {
        self.matcher(Check::NodeCount(expected))
    }

    pub fn node_count_matching<P>(self, predicate: P) -> XpathMatcher
    where
        P: Predicate<usize> + Send + Sync + 'static,
    {
        self.matcher(Check::NodeCountMatching(BoxPredicate::new(predicate)))
    }

    pub fn string(self, expected: impl Into<String>) -> XpathMatcher {
        self.matcher(Check::String(expected.into()))
    }

    pub fn string_matching<P>(self, predicate: P) -> XpathMatcher
    where
        P: Predicate<str> + Send + Sync + 'static,
    {
        self.matcher(Check::StringMatching(BoxPredicate::new(predicate)))
    }

    /// Numeric equality where `NaN` equals `NaN`.
    pub fn number(self, expected: f64) -> XpathMatcher {
        self.matcher(Check::Number(expected))
    }

    /// `|actual - expected| <= delta`; a `NaN` expectation only matches `NaN`.
    pub fn number_within(self, expected: f64, delta: f64) -> XpathMatcher {
        self.matcher(Check::NumberWithin(expected, delta))
    }

    pub fn number_matching<P>(self, predicate: P) -> XpathMatcher
    where
        P: Predicate<f64> + Send + Sync + 'static,
    {
        self.matcher(Check::NumberMatching(BoxPredicate::new(predicate)))
    }

    /// Text `true`/`false`, case-insensitive.
    pub fn boolean_value(self, expected: bool) -> XpathMatcher {
        self.matcher(Check::Boolean(expected))
    }

    fn matcher(self, check: Check) -> XpathMatcher {
        XpathMatcher {
            expression: self.expression,
            namespaces: self.namespaces,
            check,
        }
    }
}

enum Check {
    Exists,
    DoesNotExist,
    Node(BoxPredicate<Option<MatchedNode>>),
    NodeCount(usize),
    NodeCountMatching(BoxPredicate<usize>),
    String(String),
    StringMatching(BoxPredicate<str>),
    Number(f64),
    NumberWithin(f64, f64),
    NumberMatching(BoxPredicate<f64>),
    Boolean(bool),
}

/// A terminal XPath expectation.
pub struct XpathMatcher {
    expression: Result<String, MatchError>,
    namespaces: BTreeMap<String, String>,
    check: Check,
}

impl fmt::Debug for XpathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XpathMatcher")
            .field("expression", &self.expression)
            .field("namespaces", &self.namespaces)
            .finish_non_exhaustive()
    }
}

impl ResultMatcher for XpathMatcher {
    fn matches(&self, result: &MvcResult) -> Result<(), MatchError> {
        let expression = self.expression.as_deref().map_err(Clone::clone)?;
        let selection = evaluate(expression, &self.namespaces, &result.text())?;
        let description = format!("XPath {expression}");

        match &self.check {
            Check::Exists => {
                let nodes = selection.into_nodes(expression)?;
                if nodes.is_empty() {
                    return Err(MatchError::failure(description, "at least one node", "no node"));
                }
                Ok(())
            }
            Check::DoesNotExist => {
                let nodes = selection.into_nodes(expression)?;
                match nodes.first() {
                    Some(first) => Err(MatchError::failure(description, "no node", first)),
                    None => Ok(()),
                }
            }
            Check::Node(predicate) => {
                let first = selection.into_nodes(expression)?.into_iter().next();
                if predicate.eval(&first) {
                    return Ok(());
                }
                let actual = first.map_or_else(|| "no node".to_string(), |node| node.to_string());
                Err(MatchError::failure(description, predicate, actual))
            }
            Check::NodeCount(expected) => {
                let count = selection.into_nodes(expression)?.len();
                assert_equals(&description, *expected, count)
            }
            Check::NodeCountMatching(predicate) => {
                let count = selection.into_nodes(expression)?.len();
                if predicate.eval(&count) {
                    return Ok(());
                }
                Err(MatchError::failure(description, predicate, count))
            }
            Check::String(expected) => {
                let actual = selection
                    .into_text()
                    .ok_or_else(|| MatchError::failure(&description, expected, "no node"))?;
                assert_equals(&description, expected.as_str(), actual.as_str())
            }
            Check::StringMatching(predicate) => {
                let actual = selection
                    .into_text()
                    .ok_or_else(|| MatchError::failure(&description, predicate, "no node"))?;
                if predicate.eval(actual.as_str()) {
                    return Ok(());
                }
                Err(MatchError::failure(description, predicate, actual))
            }
            Check::Number(expected) => {
                let actual = selection
                    .into_number(expression)?
                    .ok_or_else(|| MatchError::failure(&description, expected, "no node"))?;
                if numbers_equal(*expected, actual) {
                    return Ok(());
                }
                Err(MatchError::failure(description, expected, actual))
            }
            Check::NumberWithin(expected, delta) => {
                let expectation = format!("{expected} ± {delta}");
                let actual = selection
                    .into_number(expression)?
                    .ok_or_else(|| MatchError::failure(&description, &expectation, "no node"))?;
                let within = if expected.is_nan() {
                    actual.is_nan()
                } else {
                    (actual - expected).abs() <= *delta
                };
                if within {
                    return Ok(());
                }
                Err(MatchError::failure(description, expectation, actual))
            }
            Check::NumberMatching(predicate) => {
                let actual = selection
                    .into_number(expression)?
                    .ok_or_else(|| MatchError::failure(&description, predicate, "no node"))?;
                if predicate.eval(&actual) {
                    return Ok(());
                }
                Err(MatchError::failure(description, predicate, actual))
            }
            Check::Boolean(expected) => {
                let actual = selection
                    .into_boolean(expression)?
                    .ok_or_else(|| MatchError::failure(&description, expected, "no node"))?;
                assert_equals(&description, *expected, actual)
            }
        }
    }
}

/// Outcome of evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
enum Selection {
    Nodes(Vec<MatchedNode>),
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Selection {
    fn into_nodes(self, expression: &str) -> Result<Vec<MatchedNode>, MatchError> {
        match self {
            Self::Nodes(nodes) => Ok(nodes),
            other => Err(MatchError::setup(
                expression,
                format!("expression does not select nodes, it evaluates to {}", other.kind()),
            )),
        }
    }

    /// String value of the first node, or the scalar as text.
    fn into_text(self) -> Option<String> {
        match self {
            Self::Nodes(nodes) => nodes.into_iter().next().map(|node| node.value),
            Self::Boolean(value) => Some(value.to_string()),
            Self::Number(value) => Some(format_number(value)),
            Self::String(value) => Some(value),
        }
    }

    fn into_number(self, expression: &str) -> Result<Option<f64>, MatchError> {
        match self {
            Self::Number(value) => Ok(Some(value)),
            Self::Boolean(value) => Ok(Some(if value { 1.0 } else { 0.0 })),
            other => match other.into_text() {
                Some(text) => parse_number(&text).map(Some).ok_or_else(|| {
                    MatchError::setup(expression, format!("cannot convert '{text}' to a number"))
                }),
                None => Ok(None),
            },
        }
    }

    fn into_boolean(self, expression: &str) -> Result<Option<bool>, MatchError> {
        match self {
            Self::Boolean(value) => Ok(Some(value)),
            Self::Number(value) => Ok(Some(value != 0.0 && !value.is_nan())),
            other => match other.into_text() {
                Some(text) => parse_boolean(&text).map(Some).ok_or_else(|| {
                    MatchError::setup(expression, format!("cannot convert '{text}' to a boolean"))
                }),
                None => Ok(None),
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Nodes(_) => "a node set",
            Self::Boolean(_) => "a boolean",
            Self::Number(_) => "a number",
            Self::String(_) => "a string",
        }
    }
}

fn evaluate(
    expression: &str,
    namespaces: &BTreeMap<String, String>,
    body: &str,
) -> Result<Selection, MatchError> {
    let compiled = Factory::new()
        .build(expression)
        .map_err(|e| MatchError::setup(expression, format!("malformed XPath expression: {e:?}")))?
        .ok_or_else(|| MatchError::setup(expression, "empty XPath expression"))?;

    if let Some(prefix) = unbound_prefix(expression, namespaces) {
        return Err(MatchError::setup(
            expression,
            format!("unbound namespace prefix '{prefix}'"),
        ));
    }

    let package = parser::parse(body).map_err(|e| {
        MatchError::setup(expression, format!("response body is not well-formed XML: {e:?}"))
    })?;
    let document = package.as_document();

    let mut context = Context::new();
    for (prefix, uri) in namespaces {
        context.set_namespace(prefix, uri);
    }

    let value = compiled
        .evaluate(&context, document.root())
        .map_err(|e| MatchError::setup(expression, format!("evaluation failed: {e:?}")))?;

    let selection = match value {
        Value::Nodeset(nodes) => Selection::Nodes(
            nodes
                .document_order()
                .into_iter()
                .map(MatchedNode::from_node)
                .collect(),
        ),
        Value::Boolean(value) => Selection::Boolean(value),
        Value::Number(value) => Selection::Number(value),
        Value::String(value) => Selection::String(value),
    };
    tracing::trace!(expression, ?selection, "Evaluated XPath expression");
    Ok(selection)
}

/// First `prefix:` in a qualified name whose prefix has no binding.
///
/// String literals and `::` axis separators are skipped.
fn unbound_prefix(expression: &str, namespaces: &BTreeMap<String, String>) -> Option<String> {
    let chars: Vec<char> = expression.chars().collect();
    let is_name_char = |c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.');

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\'' || c == '"' {
            i += 1;
            while i < chars.len() && chars[i] != c {
                i += 1;
            }
            i += 1;
            continue;
        }
        if !is_name_char(c) {
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && is_name_char(chars[i]) {
            i += 1;
        }
        let qualified = chars.get(i) == Some(&':') && chars.get(i + 1) != Some(&':');
        let starts_name = chars[start].is_alphabetic() || chars[start] == '_';
        if qualified && starts_name {
            let prefix: String = chars[start..i].iter().collect();
            if !namespaces.contains_key(&prefix) {
                return Some(prefix);
            }
        }
        while i < chars.len() && chars[i] == ':' {
            i += 1;
        }
    }
    None
}

fn numbers_equal(expected: f64, actual: f64) -> bool {
    expected == actual || (expected.is_nan() && actual.is_nan())
}

fn parse_number(text: &str) -> Option<f64> {
    match text.trim() {
        "NaN" => Some(f64::NAN),
        "INF" | "+INF" | "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-INF" | "-Infinity" => Some(f64::NEG_INFINITY),
        trimmed => trimmed.parse().ok(),
    }
}

fn parse_boolean(text: &str) -> Option<bool> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// XPath number-to-string: integral values print without a fraction.
fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvc_env::MockResponse;
    use mvc_env::request::get;
    use mvc_test_utils::music::{PEOPLE_NAMESPACE, people_xml};
    use predicates::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const COMPOSER: &str = "/ns:people/composers/composer[%s]";
    const PERFORMER: &str = "/ns:people/performers/performer[%s]";

    fn people() -> MvcResult {
        MvcResult::new(
            get("/music/people").accept("application/xml").build(),
            MockResponse::ok()
                .content_type("application/xml")
                .body(people_xml()),
        )
    }

    fn x(template: &str, args: &[&dyn Display]) -> XpathExpectations {
        xpath(template, args).namespaces([("ns", PEOPLE_NAMESPACE)])
    }

    fn check(matcher: XpathMatcher) -> Result<(), MatchError> {
        matcher.matches(&people())
    }

    #[rstest]
    #[case(COMPOSER, 1)]
    #[case(COMPOSER, 4)]
    #[case(PERFORMER, 1)]
    #[case(PERFORMER, 2)]
    fn exists_is_complement_of_does_not_exist(#[case] template: &str, #[case] index: usize) {
        assert!(check(x(template, &[&index]).exists()).is_ok());
        assert!(check(x(template, &[&index]).does_not_exist()).unwrap_err().is_failure());
    }

    #[rstest]
    #[case(COMPOSER, 0)]
    #[case(COMPOSER, 5)]
    #[case(PERFORMER, 3)]
    fn out_of_range_positions_do_not_exist(#[case] template: &str, #[case] index: usize) {
        assert!(check(x(template, &[&index]).does_not_exist()).is_ok());
        let err = check(x(template, &[&index]).exists()).unwrap_err();
        assert!(err.to_string().contains("expected <at least one node> but was <no node>"));
    }

    #[test]
    fn node_predicates_see_first_node_or_absence() {
        assert!(check(x(COMPOSER, &[&1]).node(predicate::function(Option::is_some))).is_ok());
        assert!(check(x(COMPOSER, &[&0]).node(predicate::function(Option::is_none))).is_ok());

        let element = predicate::function(|node: &Option<MatchedNode>| {
            node.as_ref()
                .is_some_and(|n| n.kind == NodeKind::Element && n.name.as_deref() == Some("composer"))
        });
        assert!(check(x(COMPOSER, &[&2]).node(element)).is_ok());
    }

    #[test]
    fn root_element_carries_its_namespace() {
        let namespaced = predicate::function(|node: &Option<MatchedNode>| {
            node.as_ref()
                .is_some_and(|n| n.namespace_uri.as_deref() == Some(PEOPLE_NAMESPACE))
        });
        assert!(check(x("/ns:people", &[]).node(namespaced)).is_ok());
    }

    #[test]
    fn node_counts() {
        assert!(check(x("/ns:people/composers/composer", &[]).node_count(4)).is_ok());
        assert!(check(x("/ns:people/performers/performer", &[]).node_count(2)).is_ok());
        assert!(
            check(x("/ns:people/composers/composer", &[]).node_count_matching(predicate::lt(5usize)))
                .is_ok()
        );
        assert!(
            check(x("/ns:people/performers/performer", &[]).node_count_matching(predicate::gt(0usize)))
                .is_ok()
        );

        let err = check(x("/ns:people/composers/composer", &[]).node_count(3)).unwrap_err();
        assert_eq!(
            err,
            MatchError::failure("XPath /ns:people/composers/composer", 3, 4)
        );
    }

    #[rstest]
    #[case(COMPOSER, 1, "Johann Sebastian Bach")]
    #[case(COMPOSER, 2, "Johannes Brahms")]
    #[case(COMPOSER, 3, "Edvard Grieg")]
    #[case(COMPOSER, 4, "Robert Schumann")]
    #[case(PERFORMER, 1, "Vladimir Ashkenazy")]
    #[case(PERFORMER, 2, "Yehudi Menuhin")]
    fn string_values(#[case] template: &str, #[case] index: usize, #[case] name: &str) {
        let template = format!("{template}/name");
        assert!(check(x(&template, &[&index]).string(name)).is_ok());
    }

    #[test]
    fn string_predicates() {
        let name = "/ns:people/composers/composer[%s]/name";
        assert!(check(x(name, &[&1]).string_matching(predicate::eq("Johann Sebastian Bach"))).is_ok());
        assert!(check(x(name, &[&1]).string_matching(predicate::str::starts_with("Johann"))).is_ok());
        assert!(check(x(name, &[&1]).string_matching(predicate::str::is_empty().not())).is_ok());
    }

    #[test]
    fn string_mismatch_names_query_expected_and_actual() {
        let err = check(x("/ns:people/composers/composer[%s]/name", &[&1]).string("Brahms")).unwrap_err();

        match err {
            MatchError::Failure(failure) => {
                assert_eq!(failure.description, "XPath /ns:people/composers/composer[1]/name");
                assert_eq!(failure.expected, "Brahms");
                assert_eq!(failure.actual, "Johann Sebastian Bach");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn string_on_absent_node_is_a_failure() {
        let err = check(x("/ns:people/composers/composer[%s]/name", &[&9]).string("")).unwrap_err();
        assert!(err.is_failure());
    }

    #[rstest]
    #[case(1, 21.0)]
    #[case(2, 0.0025)]
    #[case(3, 1.6035)]
    #[case(4, f64::NAN)]
    fn number_values(#[case] index: usize, #[case] expected: f64) {
        let double = "/ns:people/composers/composer[%s]/someDouble";
        assert!(check(x(double, &[&index]).number(expected)).is_ok());
    }

    #[test]
    fn number_tolerance_and_predicates() {
        let double = "/ns:people/composers/composer[%s]/someDouble";
        assert!(check(x(double, &[&1]).number_matching(predicate::eq(21.0))).is_ok());
        assert!(check(x(double, &[&3]).number_matching(predicate::float::is_close(1.6).epsilon(0.01))).is_ok());
        assert!(check(x(double, &[&3]).number_within(1.6, 0.01)).is_ok());
        assert!(check(x(double, &[&3]).number_within(1.6, 0.001)).unwrap_err().is_failure());
        assert!(check(x(double, &[&4]).number_within(f64::NAN, 1.0)).is_ok());
        assert!(check(x(double, &[&1]).number(f64::NAN)).unwrap_err().is_failure());
        assert!(check(x(double, &[&4]).number(21.0)).unwrap_err().is_failure());
    }

    #[test]
    fn number_on_text_is_a_setup_error() {
        let err = check(x("/ns:people/composers/composer[%s]/name", &[&1]).number(1.0)).unwrap_err();

        assert!(err.is_setup());
        assert!(err.to_string().contains("cannot convert 'Johann Sebastian Bach' to a number"));
    }

    #[rstest]
    #[case(1, false)]
    #[case(2, true)]
    fn boolean_values(#[case] index: usize, #[case] expected: bool) {
        let flag = "/ns:people/performers/performer[%s]/someBoolean";
        assert!(check(x(flag, &[&index]).boolean_value(expected)).is_ok());
        assert!(check(x(flag, &[&index]).boolean_value(!expected)).unwrap_err().is_failure());
    }

    #[test]
    fn boolean_on_text_is_a_setup_error() {
        let err = check(x("/ns:people/performers/performer[1]/name", &[]).boolean_value(true)).unwrap_err();
        assert!(err.is_setup());
    }

    #[test]
    fn scalar_results_coerce_directly() {
        assert!(check(x("count(/ns:people/composers/composer)", &[]).number(4.0)).is_ok());
        assert!(check(x("count(/ns:people/composers/composer)", &[]).string("4")).is_ok());
        assert!(check(x("count(/ns:people/performers/performer) = 2", &[]).boolean_value(true)).is_ok());
    }

    #[test]
    fn node_operations_on_scalars_are_setup_errors() {
        let err = check(x("count(/ns:people/composers/composer)", &[]).node_count(4)).unwrap_err();
        assert!(err.is_setup());
        assert!(err.to_string().contains("evaluates to a number"));
    }

    #[test]
    fn unbound_prefix_is_a_setup_error() {
        let err = check(xpath("/other:people", &[]).exists()).unwrap_err();
        assert!(err.is_setup());
    }

    #[test]
    fn prefix_missing_from_a_populated_table_is_a_setup_error() {
        let err = check(x("/x:people/composers", &[]).node_count(1)).unwrap_err();

        assert!(err.is_setup());
        assert!(err.to_string().contains("unbound namespace prefix 'x'"));
    }

    #[test]
    fn axes_and_literals_are_not_prefixes() {
        assert!(check(x("/child::ns:people/child::composers/composer", &[]).node_count(4)).is_ok());
        assert!(check(x("count(/ns:people[name() != 'other:people'])", &[]).number(1.0)).is_ok());
    }

    #[rstest]
    #[case("/ns:people/x:a", Some("x"))]
    #[case("/ns:people/ns:*", None)]
    #[case("descendant-or-self::node()", None)]
    #[case("//*[@key = \"a:b\"]", None)]
    #[case("/a:b/ns:c", Some("a"))]
    fn finds_unbound_prefixes(#[case] expression: &str, #[case] expected: Option<&str>) {
        let namespaces = BTreeMap::from([("ns".to_string(), PEOPLE_NAMESPACE.to_string())]);
        assert_eq!(unbound_prefix(expression, &namespaces).as_deref(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn empty_expression_is_a_setup_error(#[case] rendered: &str) {
        let err = check(x("%s", &[&rendered]).exists()).unwrap_err();

        assert!(err.is_setup());
    }

    #[test]
    fn malformed_expression_is_a_setup_error() {
        let err = check(x("/ns:people[", &[]).exists()).unwrap_err();
        assert!(err.is_setup());
    }

    #[test]
    fn unparsable_body_is_a_setup_error() {
        let result = MvcResult::new(get("/").build(), MockResponse::ok().body("<people>"));
        let err = xpath("/people", &[]).exists().matches(&result).unwrap_err();
        assert!(err.is_setup());
    }

    #[test]
    fn missing_template_argument_is_a_setup_error() {
        let err = check(x(COMPOSER, &[]).exists()).unwrap_err();
        assert!(err.is_setup());
    }

    #[rstest]
    #[case("NaN", Some(f64::NAN))]
    #[case(" 21.0 ", Some(21.0))]
    #[case("-INF", Some(f64::NEG_INFINITY))]
    #[case("Infinity", Some(f64::INFINITY))]
    #[case("abc", None)]
    fn parses_numbers(#[case] text: &str, #[case] expected: Option<f64>) {
        match (parse_number(text), expected) {
            (Some(actual), Some(expected)) => assert!(numbers_equal(expected, actual)),
            (actual, expected) => assert_eq!(actual, expected),
        }
    }

    #[rstest]
    #[case(4.0, "4")]
    #[case(0.0025, "0.0025")]
    #[case(f64::NAN, "NaN")]
    #[case(f64::NEG_INFINITY, "-Infinity")]
    fn formats_numbers(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_number(value), expected);
    }
}
