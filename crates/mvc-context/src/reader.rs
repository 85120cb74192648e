//! Definition readers
//!
//! Two readers turn configuration sources into registered definitions, both
//! bound to the environment the context is being built with so profile
//! conditions are evaluated while reading:
//!
//! - [`ClassDefinitionReader`] runs [`ConfigClass`] units.
//! - [`LocationDefinitionReader`] loads declarative definition documents
//!   (TOML, JSON or YAML, by extension) through a [`ResourceLoader`].

use std::collections::BTreeMap;

use serde::Deserialize;

use mvc_env::{Method, ResourceLoader};

use crate::config::ConfigClass;
use crate::definition::{Definition, HandlerDefinition, Origin, StaticHandler, static_response};
use crate::environment::{Environment, validate_profile};
use crate::registry::DefinitionRegistry;
use crate::{Error, Result};

/// Runs configuration classes against an environment.
#[derive(Debug, Clone, Copy)]
pub struct ClassDefinitionReader<'a> {
    environment: &'a Environment,
}

impl<'a> ClassDefinitionReader<'a> {
    pub fn new(environment: &'a Environment) -> Self {
        Self { environment }
    }

    /// Register the definitions of every class, in order.
    ///
    /// Returns the number of definitions registered.
    pub fn read(&self, classes: &[ConfigClass], registry: &mut DefinitionRegistry) -> Result<usize> {
        let mut count = 0;
        for class in classes {
            if !self.environment.accepts_profiles(class.profiles()) {
                tracing::debug!(
                    class = class.name(),
                    profiles = ?class.profiles(),
                    "Skipping configuration class, profile condition not met"
                );
                continue;
            }

            let definitions = class.definitions(self.environment)?;
            tracing::debug!(
                class = class.name(),
                definitions = definitions.len(),
                "Reading configuration class"
            );
            for definition in definitions {
                let definition = match definition.origin() {
                    Origin::Programmatic => {
                        definition.with_origin(Origin::Class(class.name().to_string()))
                    }
                    _ => definition,
                };
                if register_if_accepted(self.environment, registry, definition)? {
                    count += 1;
                }
            }
        }
        Ok(count)
    }
}

/// Loads definition documents from locations.
#[derive(Debug, Clone, Copy)]
pub struct LocationDefinitionReader<'a> {
    environment: &'a Environment,
    loader: &'a ResourceLoader,
}

impl<'a> LocationDefinitionReader<'a> {
    pub fn new(environment: &'a Environment, loader: &'a ResourceLoader) -> Self {
        Self {
            environment,
            loader,
        }
    }

    /// Register the definitions of every document, in order.
    ///
    /// A missing or malformed document is a resolution error naming the
    /// location. Returns the number of definitions registered.
    pub fn read(&self, locations: &[String], registry: &mut DefinitionRegistry) -> Result<usize> {
        let mut count = 0;
        for location in locations {
            let resource = self.loader.resource(location);
            if !resource.exists() {
                return Err(Error::resolution(location, "location does not exist"));
            }
            let document: DefinitionDocument = resource
                .load()
                .map_err(|e| Error::resolution(location, e.to_string()))?;

            validate_condition(location, &document.profiles)?;
            if !self.environment.accepts_profiles(&document.profiles) {
                tracing::debug!(
                    location = %location,
                    profiles = ?document.profiles,
                    "Skipping definition document, profile condition not met"
                );
                continue;
            }

            let definitions = document.into_definitions(location)?;
            tracing::debug!(
                location = %location,
                definitions = definitions.len(),
                "Reading definition document"
            );
            for definition in definitions {
                if register_if_accepted(self.environment, registry, definition)? {
                    count += 1;
                }
            }
        }
        Ok(count)
    }
}

fn register_if_accepted(
    environment: &Environment,
    registry: &mut DefinitionRegistry,
    definition: Definition,
) -> Result<bool> {
    if !environment.accepts_profiles(definition.profiles()) {
        tracing::debug!(
            name = definition.name(),
            profiles = ?definition.profiles(),
            "Skipping definition, profile condition not met"
        );
        return Ok(false);
    }
    registry.register(definition)?;
    Ok(true)
}

/// Profile conditions read from a document use the same names the builder
/// accepts, each optionally negated with a single leading `!`.
fn validate_condition(location: &str, profiles: &[String]) -> Result<()> {
    for entry in profiles {
        let name = entry.strip_prefix('!').unwrap_or(entry);
        validate_profile(name).map_err(|e| Error::resolution(location, e.to_string()))?;
    }
    Ok(())
}

/// On-disk shape of a definition document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionDocument {
    /// Whole-document profile condition
    #[serde(default)]
    pub profiles: Vec<String>,

    /// Forward unmatched requests to the `"default"` dispatcher
    #[serde(default)]
    pub default_servlet_handler: bool,

    #[serde(default)]
    pub components: Vec<ComponentEntry>,

    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// A value component.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentEntry {
    pub name: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub profiles: Vec<String>,
}

/// A route answered with a fixed response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    /// Defaults to `"METHOD path"`, or `"* path"` without a method
    pub name: Option<String>,
    pub method: Option<String>,
    pub path: String,
    #[serde(default = "default_status")]
    pub status: u16,
    pub content_type: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub profiles: Vec<String>,
}

fn default_status() -> u16 {
    200
}

impl DefinitionDocument {
    fn into_definitions(self, location: &str) -> Result<Vec<Definition>> {
        let origin = Origin::Location(location.to_string());
        let mut definitions = Vec::new();

        if self.default_servlet_handler {
            definitions.push(Definition::default_servlet_handler().with_origin(origin.clone()));
        }

        for component in self.components {
            validate_condition(location, &component.profiles)?;
            definitions.push(
                Definition::value(component.name, component.value)
                    .with_profiles(component.profiles)
                    .with_origin(origin.clone()),
            );
        }

        for route in self.routes {
            validate_condition(location, &route.profiles)?;
            let method = route
                .method
                .as_deref()
                .map(|name| {
                    Method::parse(name).ok_or_else(|| {
                        Error::resolution(location, format!("unknown request method '{name}'"))
                    })
                })
                .transpose()?;
            let name = route.name.unwrap_or_else(|| {
                format!("{} {}", method.map_or("*", |m| m.as_str()), route.path)
            });
            let response = static_response(
                route.status,
                route.content_type.as_deref(),
                &route.headers,
                &route.body,
            );
            let handler = HandlerDefinition::new(method, route.path, StaticHandler::new(response));

            definitions.push(
                Definition::handler(name, handler)
                    .with_profiles(route.profiles)
                    .with_origin(origin.clone()),
            );
        }

        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn loader_for(dir: &TempDir) -> ResourceLoader {
        ResourceLoader::classpath().with_classpath_roots([dir.path()])
    }

    #[test]
    fn class_reader_tags_origin_and_filters_profiles() {
        let class = ConfigClass::of(
            "WebConfig",
            vec![
                Definition::value("greeting", "hello"),
                Definition::value("devOnly", true).with_profiles(["dev"]),
            ],
        );
        let env = Environment::new();
        let mut registry = DefinitionRegistry::new();

        let count = ClassDefinitionReader::new(&env)
            .read(&[class], &mut registry)
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(registry.names(), vec!["greeting"]);
        assert_eq!(
            registry.get("greeting").unwrap().origin(),
            &Origin::Class("WebConfig".into())
        );
    }

    #[test]
    fn class_level_profiles_skip_the_whole_unit() {
        let class = ConfigClass::of("ProdConfig", vec![Definition::value("db", "prod")])
            .with_profiles(["prod"]);
        let mut env = Environment::new();
        env.activate_profiles(["dev"]).unwrap();
        let mut registry = DefinitionRegistry::new();

        let count = ClassDefinitionReader::new(&env)
            .read(&[class], &mut registry)
            .unwrap();

        assert_eq!(count, 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn location_reader_loads_toml_documents() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("context.toml"),
            r#"
default_servlet_handler = true

[[components]]
name = "greeting"
value = "hello"

[[components]]
name = "prodOnly"
value = 1
profiles = ["prod"]

[[routes]]
name = "testController"
method = "GET"
path = "/test"
content_type = "text/plain"
body = "success"

[[routes]]
path = "/echo"
status = 202
"#,
        )
        .unwrap();

        let env = Environment::new();
        let loader = loader_for(&dir);
        let mut registry = DefinitionRegistry::new();
        let count = LocationDefinitionReader::new(&env, &loader)
            .read(&["classpath:context.toml".to_string()], &mut registry)
            .unwrap();

        assert_eq!(count, 4);
        assert_eq!(
            registry.names(),
            vec!["defaultServletHandler", "greeting", "testController", "* /echo"]
        );
        let handler = registry.get("testController").unwrap().as_handler().unwrap();
        assert_eq!(handler.method(), Some(Method::Get));
        assert_eq!(handler.path(), "/test");
    }

    #[test]
    fn location_reader_accepts_yaml_and_json() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.yaml"),
            "components:\n  - name: fromYaml\n    value: [1, 2]\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("b.json"),
            r#"{"components": [{"name": "fromJson", "value": {"k": "v"}}]}"#,
        )
        .unwrap();

        let env = Environment::new();
        let loader = loader_for(&dir);
        let mut registry = DefinitionRegistry::new();
        LocationDefinitionReader::new(&env, &loader)
            .read(&["a.yaml".to_string(), "b.json".to_string()], &mut registry)
            .unwrap();

        assert_eq!(
            registry.get("fromYaml").unwrap().as_value(),
            Some(&serde_json::json!([1, 2]))
        );
        assert_eq!(
            registry.get("fromJson").unwrap().as_value(),
            Some(&serde_json::json!({"k": "v"}))
        );
    }

    #[test]
    fn missing_location_is_a_resolution_error() {
        let dir = TempDir::new().unwrap();
        let env = Environment::new();
        let loader = loader_for(&dir);
        let mut registry = DefinitionRegistry::new();

        let err = LocationDefinitionReader::new(&env, &loader)
            .read(&["classpath:nope.toml".to_string()], &mut registry)
            .unwrap_err();

        assert!(matches!(err, Error::Resolution { ref source_name, .. } if source_name == "classpath:nope.toml"));
    }

    #[rstest]
    #[case("profiles = [\"\"]\n")]
    #[case("[[components]]\nname = \"x\"\nvalue = 1\nprofiles = [\"!\"]\n")]
    #[case("[[routes]]\npath = \"/a\"\nprofiles = [\"!!dev\"]\n")]
    #[case("[[routes]]\npath = \"/a\"\nprofiles = [\"  \"]\n")]
    fn malformed_profile_conditions_are_rejected(#[case] document: &str) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("profiles.toml"), document).unwrap();
        let env = Environment::new();
        let loader = loader_for(&dir);
        let mut registry = DefinitionRegistry::new();

        let err = LocationDefinitionReader::new(&env, &loader)
            .read(&["profiles.toml".to_string()], &mut registry)
            .unwrap_err();

        assert!(matches!(err, Error::Resolution { ref source_name, .. } if source_name == "profiles.toml"));
        assert!(registry.is_empty());
    }

    #[test]
    fn negated_profile_conditions_are_accepted() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("profiles.toml"),
            "[[components]]\nname = \"notProd\"\nvalue = 1\nprofiles = [\"!prod\"]\n",
        )
        .unwrap();
        let env = Environment::new();
        let loader = loader_for(&dir);
        let mut registry = DefinitionRegistry::new();

        let count = LocationDefinitionReader::new(&env, &loader)
            .read(&["profiles.toml".to_string()], &mut registry)
            .unwrap();

        assert_eq!(count, 1);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bad.toml"), "beans = []\n").unwrap();
        let env = Environment::new();
        let loader = loader_for(&dir);
        let mut registry = DefinitionRegistry::new();

        let err = LocationDefinitionReader::new(&env, &loader)
            .read(&["bad.toml".to_string()], &mut registry)
            .unwrap_err();

        assert!(matches!(err, Error::Resolution { .. }));
        assert!(err.to_string().contains("beans"));
    }

    #[test]
    fn unknown_route_method_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("bad.toml"),
            "[[routes]]\nmethod = \"BREW\"\npath = \"/coffee\"\n",
        )
        .unwrap();
        let env = Environment::new();
        let loader = loader_for(&dir);
        let mut registry = DefinitionRegistry::new();

        let err = LocationDefinitionReader::new(&env, &loader)
            .read(&["bad.toml".to_string()], &mut registry)
            .unwrap_err();
        assert!(err.to_string().contains("BREW"));
    }
}
