//! XPath expectations on an XML response body.

use std::fmt::Display;

use mvc_context::{Definition, HandlerDefinition};
use mvc_env::MockResponse;
use mvc_harness::request::get;
use mvc_harness::{Error, MatchError, MockMvc, Result, XpathExpectations, standalone_setup, xpath};
use mvc_test_utils::music::{PEOPLE_NAMESPACE, PEOPLE_PATH, people_xml};
use predicates::prelude::*;
use rstest::{fixture, rstest};

const COMPOSER: &str = "/ns:people/composers/composer[%s]";
const PERFORMER: &str = "/ns:people/performers/performer[%s]";

fn music_controller() -> Definition {
    Definition::handler(
        "musicController",
        HandlerDefinition::from_fn(None, PEOPLE_PATH, |_request, _context| {
            Ok(MockResponse::ok()
                .content_type("application/xml")
                .body(people_xml()))
        }),
    )
}

#[fixture]
fn mvc() -> MockMvc {
    standalone_setup([music_controller()]).build().unwrap()
}

fn ns(expression: &str, args: &[&dyn Display]) -> XpathExpectations {
    xpath(expression, args).namespaces([("ns", PEOPLE_NAMESPACE)])
}

fn people() -> mvc_env::MockRequest {
    get(PEOPLE_PATH).accept("application/xml").build()
}

#[rstest]
fn exists(mvc: MockMvc) -> Result<()> {
    mvc.perform(people())?
        .and_expect(ns(COMPOSER, &[&1]).exists())?
        .and_expect(ns(COMPOSER, &[&2]).exists())?
        .and_expect(ns(COMPOSER, &[&3]).exists())?
        .and_expect(ns(COMPOSER, &[&4]).exists())?
        .and_expect(ns(PERFORMER, &[&1]).exists())?
        .and_expect(ns(PERFORMER, &[&2]).exists())?;

    mvc.perform(people())?
        .and_expect(ns(COMPOSER, &[&1]).node(predicate::function(Option::is_some)))?;
    Ok(())
}

#[rstest]
fn does_not_exist(mvc: MockMvc) -> Result<()> {
    mvc.perform(people())?
        .and_expect(ns(COMPOSER, &[&0]).does_not_exist())?
        .and_expect(ns(COMPOSER, &[&5]).does_not_exist())?
        .and_expect(ns(PERFORMER, &[&0]).does_not_exist())?
        .and_expect(ns(PERFORMER, &[&3]).does_not_exist())?;

    mvc.perform(people())?
        .and_expect(ns(COMPOSER, &[&0]).node(predicate::function(Option::is_none)))?;
    Ok(())
}

#[rstest]
fn string(mvc: MockMvc) -> Result<()> {
    let composer_name = "/ns:people/composers/composer[%s]/name";
    let performer_name = "/ns:people/performers/performer[%s]/name";

    mvc.perform(people())?
        .and_expect(ns(composer_name, &[&1]).string("Johann Sebastian Bach"))?
        .and_expect(ns(composer_name, &[&2]).string("Johannes Brahms"))?
        .and_expect(ns(composer_name, &[&3]).string("Edvard Grieg"))?
        .and_expect(ns(composer_name, &[&4]).string("Robert Schumann"))?
        .and_expect(ns(performer_name, &[&1]).string("Vladimir Ashkenazy"))?
        .and_expect(ns(performer_name, &[&2]).string("Yehudi Menuhin"))?;

    mvc.perform(people())?
        .and_expect(ns(composer_name, &[&1]).string_matching(predicate::eq("Johann Sebastian Bach")))?
        .and_expect(ns(composer_name, &[&1]).string_matching(predicate::str::starts_with("Johann")))?
        .and_expect(ns(composer_name, &[&1]).string_matching(predicate::str::is_empty().not()))?;
    Ok(())
}

#[rstest]
fn number(mvc: MockMvc) -> Result<()> {
    let composer_double = "/ns:people/composers/composer[%s]/someDouble";

    mvc.perform(people())?
        .and_expect(ns(composer_double, &[&1]).number(21.0))?
        .and_expect(ns(composer_double, &[&2]).number(0.0025))?
        .and_expect(ns(composer_double, &[&3]).number(1.6035))?
        .and_expect(ns(composer_double, &[&4]).number(f64::NAN))?;

    mvc.perform(people())?
        .and_expect(ns(composer_double, &[&1]).number_matching(predicate::eq(21.0)))?
        .and_expect(ns(composer_double, &[&3]).number_within(1.6, 0.01))?
        .and_expect(
            ns(composer_double, &[&3]).number_matching(predicate::float::is_close(1.6).epsilon(0.01)),
        )?;
    Ok(())
}

#[rstest]
fn boolean_value(mvc: MockMvc) -> Result<()> {
    let performer_boolean = "/ns:people/performers/performer[%s]/someBoolean";

    mvc.perform(people())?
        .and_expect(ns(performer_boolean, &[&1]).boolean_value(false))?
        .and_expect(ns(performer_boolean, &[&2]).boolean_value(true))?;
    Ok(())
}

#[rstest]
fn node_count(mvc: MockMvc) -> Result<()> {
    mvc.perform(people())?
        .and_expect(ns("/ns:people/composers/composer", &[]).node_count(4))?
        .and_expect(ns("/ns:people/performers/performer", &[]).node_count(2))?;

    mvc.perform(people())?
        .and_expect(ns("/ns:people/composers/composer", &[]).node_count_matching(predicate::lt(5usize)))?
        .and_expect(ns("/ns:people/performers/performer", &[]).node_count_matching(predicate::gt(0usize)))?;
    Ok(())
}

#[rstest]
fn failure_names_the_query(mvc: MockMvc) {
    let actions = mvc.perform(people()).unwrap();
    let err = actions
        .and_expect(ns("/ns:people/composers/composer[%s]/name", &[&2]).string("Johann Sebastian Bach"))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "XPath /ns:people/composers/composer[2]/name: expected <Johann Sebastian Bach> but was <Johannes Brahms>"
    );
}

#[rstest]
fn missing_template_argument_is_a_setup_error(mvc: MockMvc) {
    let actions = mvc.perform(people()).unwrap();
    let err = actions.and_expect(ns(COMPOSER, &[]).exists()).unwrap_err();

    assert!(matches!(err, Error::Match(MatchError::Setup { .. })));
}

#[rstest]
fn non_numeric_text_is_a_setup_error(mvc: MockMvc) {
    let actions = mvc.perform(people()).unwrap();
    let err = actions
        .and_expect(ns("/ns:people/composers/composer[1]/name", &[]).number(21.0))
        .unwrap_err();

    assert!(matches!(err, Error::Match(MatchError::Setup { .. })));
}
