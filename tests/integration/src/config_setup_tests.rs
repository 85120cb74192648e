//! End-to-end context setup
//!
//! Configuration classes and definition documents are combined into one
//! context, refreshed, and exercised through `MockMvc`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use mvc_context::{ConfigClass, Definition, Error as ContextError, WebContext};
use mvc_harness::request::get;
use mvc_harness::{
    Error, annotation_config_setup, content, forwarded_url, handler, print, status,
    xml_config_setup,
};
use mvc_test_utils::fixtures::classpath_root;
use mvc_test_utils::resources::TestResources;
use pretty_assertions::assert_eq;

const CONFIG_SETUP: &str = "classpath:/org/example/context/config-setup-context.toml";
const ADDITIONAL: &str = "classpath:/org/example/context/additional-context.yaml";
const WEB_ROOT: &str = "META-INF/web-resources";

fn web_config() -> ConfigClass {
    ConfigClass::of(
        "WebConfig",
        vec![Definition::value("greeting", "hello from class")],
    )
}

#[test]
fn classes_and_locations() {
    let mvc = annotation_config_setup([web_config()])
        .unwrap()
        .locations([CONFIG_SETUP])
        .unwrap()
        .locations([ADDITIONAL])
        .unwrap()
        .classpath_roots([classpath_root()])
        .unwrap()
        .configure_web_app_root_dir(WEB_ROOT, true)
        .unwrap()
        .build()
        .unwrap();

    mvc.perform(get("/test"))
        .unwrap()
        .and_do(print())
        .unwrap()
        .and_expect(status().is_ok())
        .unwrap()
        .and_expect(content().string("success"))
        .unwrap()
        .and_expect(handler().name("testController"))
        .unwrap();

    let greeting = mvc.context().value("greeting").and_then(|v| v.as_str());
    assert_eq!(greeting, Some("hello from yaml"));
}

#[test]
fn apply_initializers() {
    let initialized = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&initialized);

    let mvc = annotation_config_setup([web_config()])
        .unwrap()
        .configure_web_app_root_dir(WEB_ROOT, true)
        .unwrap()
        .initializer(move |context: &mut WebContext| -> mvc_context::Result<()> {
            assert!(!context.is_active());
            flag.store(true, Ordering::SeqCst);
            Ok(())
        })
        .unwrap()
        .build()
        .unwrap();

    assert!(initialized.load(Ordering::SeqCst));
    assert!(mvc.context().is_active());
}

#[test]
fn unmatched_requests_forward_to_default_servlet() {
    let mvc = xml_config_setup([CONFIG_SETUP, ADDITIONAL])
        .unwrap()
        .classpath_roots([classpath_root()])
        .unwrap()
        .configure_web_app_root_dir(WEB_ROOT, true)
        .unwrap()
        .build()
        .unwrap();

    mvc.perform(get("/resources/app.css"))
        .unwrap()
        .and_expect(status().is_ok())
        .unwrap()
        .and_expect(forwarded_url("default"))
        .unwrap();

    let serving = mvc.context().serving_environment();
    assert!(serving.resource("/resources/app.css").exists());
    assert_eq!(serving.mime_type("/resources/app.css"), Some("text/css"));
}

#[test]
fn without_default_servlet_unmatched_requests_are_not_found() {
    let mvc = xml_config_setup([CONFIG_SETUP])
        .unwrap()
        .classpath_roots([classpath_root()])
        .unwrap()
        .build()
        .unwrap();

    mvc.perform(get("/resources/app.css"))
        .unwrap()
        .and_expect(status().is_not_found())
        .unwrap();
}

#[test]
fn profiles_select_components() {
    let build = |profiles: &[&str]| {
        xml_config_setup([ADDITIONAL])
            .unwrap()
            .classpath_roots([classpath_root()])
            .unwrap()
            .profiles(profiles.iter().copied())
            .unwrap()
            .build()
            .unwrap()
    };

    assert!(build(&["dev"]).context().contains_definition("devBanner"));
    assert!(!build(&[]).context().contains_definition("devBanner"));
}

#[test]
fn definitions_from_file_locations() {
    let resources = TestResources::new();
    resources.write(
        "context/hello.toml",
        r#"
[[routes]]
name = "hello"
method = "GET"
path = "/hello/{name}"
content_type = "text/plain"
body = "hello"
"#,
    );

    let mvc = xml_config_setup([resources.file_location("context/hello.toml")])
        .unwrap()
        .build()
        .unwrap();

    mvc.perform(get("/hello/bach"))
        .unwrap()
        .and_expect(status().is_ok())
        .unwrap()
        .and_expect(content().string("hello"))
        .unwrap()
        .and_expect(content().content_type("text/plain"))
        .unwrap();
}

#[test]
fn missing_location_fails_build() {
    let err = xml_config_setup(["classpath:/org/example/context/missing.toml"])
        .unwrap()
        .classpath_roots([classpath_root()])
        .unwrap()
        .build()
        .unwrap_err();

    assert!(matches!(err, Error::Context(ContextError::Resolution { .. })));
}
