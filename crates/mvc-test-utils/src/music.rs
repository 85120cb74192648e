//! Music people fixture.
//!
//! Four composers and two performers under a `people` root element in the
//! `http://example.org/music/people` namespace. Only the root element is
//! qualified; the nested elements carry no namespace, so queries look like
//! `/ns:people/composers/composer[1]/name`.

/// Namespace of the `people` root element.
pub const PEOPLE_NAMESPACE: &str = "http://example.org/music/people";

/// Path the music controller is mapped to.
pub const PEOPLE_PATH: &str = "/music/people";

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub some_double: f64,
    pub some_boolean: bool,
}

impl Person {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            some_double: 0.0,
            some_boolean: false,
        }
    }

    pub fn with_double(mut self, value: f64) -> Self {
        self.some_double = value;
        self
    }

    pub fn with_boolean(mut self, value: bool) -> Self {
        self.some_boolean = value;
        self
    }

    fn to_xml(&self, element: &str) -> String {
        format!(
            "<{element}><name>{}</name><someDouble>{}</someDouble><someBoolean>{}</someBoolean></{element}>",
            self.name,
            format_double(self.some_double),
            self.some_boolean
        )
    }
}

pub fn composers() -> Vec<Person> {
    vec![
        Person::new("Johann Sebastian Bach").with_double(21.0),
        Person::new("Johannes Brahms").with_double(0.0025),
        Person::new("Edvard Grieg").with_double(1.6035),
        Person::new("Robert Schumann").with_double(f64::NAN),
    ]
}

pub fn performers() -> Vec<Person> {
    vec![
        Person::new("Vladimir Ashkenazy").with_boolean(false),
        Person::new("Yehudi Menuhin").with_boolean(true),
    ]
}

/// The people document, serialized the way an XML binding would.
pub fn people_xml() -> String {
    let composers: String = composers().iter().map(|p| p.to_xml("composer")).collect();
    let performers: String = performers().iter().map(|p| p.to_xml("performer")).collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><ns2:people xmlns:ns2="{PEOPLE_NAMESPACE}"><composers>{composers}</composers><performers>{performers}</performers></ns2:people>"#
    )
}

/// `21.0`, `0.0025`, `NaN`, `Infinity`.
fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
