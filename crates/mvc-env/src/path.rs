//! Normalized resource path handling

use std::path::{Path, PathBuf};

/// Location prefix that always resolves against the classpath roots.
pub const CLASSPATH_PREFIX: &str = "classpath:";

/// Location prefix that always resolves on the filesystem.
pub const FILE_PREFIX: &str = "file:";

/// A resource path normalized to forward slashes.
///
/// Backslashes become forward slashes, repeated separators collapse, `.`
/// segments are dropped and `..` segments pop the previous segment without
/// ever climbing above the start of the path. A leading `classpath:` or
/// `file:` prefix is kept verbatim in front of the normalized remainder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ResourcePath {
    prefix: &'static str,
    inner: String,
}

impl ResourcePath {
    /// Create a new normalized path from a location string.
    pub fn new(location: impl AsRef<str>) -> Self {
        let location = location.as_ref();
        let (prefix, rest) = split_prefix(location);
        Self {
            prefix,
            inner: normalize(rest),
        }
    }

    /// Full location including any prefix.
    pub fn as_location(&self) -> String {
        format!("{}{}", self.prefix, self.inner)
    }

    /// Path without its location prefix.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// The `classpath:` or `file:` prefix, or an empty string.
    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// True for an empty path (the "current" directory of whatever root applies).
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// True when the path starts at a root (`/a/b`).
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
    }

    /// Path with any leading slash removed, for resolution under a root.
    pub fn relative(&self) -> &str {
        self.inner.trim_start_matches('/')
    }

    /// Join a segment onto this path, keeping the prefix.
    ///
    /// The segment is always treated as relative to `self`, even when it
    /// starts with a slash, mirroring how servlet resource paths are
    /// appended to a base path.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let segment = segment.trim_start_matches('/');
        let joined = if self.inner.is_empty() {
            segment.to_string()
        } else if segment.is_empty() {
            self.inner.clone()
        } else {
            format!("{}/{}", self.inner.trim_end_matches('/'), segment)
        };
        Self {
            prefix: self.prefix,
            inner: normalize(&joined),
        }
    }

    /// File name component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Extension of the file name, if any.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Resolve under a native root directory.
    pub fn under(&self, root: &Path) -> PathBuf {
        if self.relative().is_empty() {
            root.to_path_buf()
        } else {
            root.join(self.relative())
        }
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.prefix, self.inner)
    }
}

impl From<&str> for ResourcePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ResourcePath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

fn split_prefix(location: &str) -> (&'static str, &str) {
    if let Some(rest) = location.strip_prefix(CLASSPATH_PREFIX) {
        (CLASSPATH_PREFIX, rest)
    } else if let Some(rest) = location.strip_prefix("file://") {
        (FILE_PREFIX, rest)
    } else if let Some(rest) = location.strip_prefix(FILE_PREFIX) {
        (FILE_PREFIX, rest)
    } else {
        ("", location)
    }
}

fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("src/main/webapp", "src/main/webapp")]
    #[case("src\\main\\webapp", "src/main/webapp")]
    #[case("a//b/./c/", "a/b/c")]
    #[case("a/../b", "b")]
    #[case("../../a", "a")]
    #[case("/a/b/../../c", "/c")]
    #[case("", "")]
    fn normalizes_segments(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(ResourcePath::new(input).as_str(), expected);
    }

    #[rstest]
    #[case("classpath:/org/app/context.toml", "classpath:", "/org/app/context.toml")]
    #[case("file:///tmp/webapp", "file:", "/tmp/webapp")]
    #[case("file:relative/dir", "file:", "relative/dir")]
    #[case("plain/dir", "", "plain/dir")]
    fn keeps_location_prefix(#[case] input: &str, #[case] prefix: &str, #[case] rest: &str) {
        let path = ResourcePath::new(input);
        assert_eq!(path.prefix(), prefix);
        assert_eq!(path.as_str(), rest);
    }

    #[test]
    fn join_treats_leading_slash_as_relative() {
        let base = ResourcePath::new("src/test/resources/META-INF/web-resources");
        assert_eq!(
            base.join("/resources/app.css").as_str(),
            "src/test/resources/META-INF/web-resources/resources/app.css"
        );

        let empty = ResourcePath::default();
        assert_eq!(empty.join("/index.html").as_str(), "index.html");
    }

    #[test]
    fn join_keeps_prefix() {
        let base = ResourcePath::new("classpath:web");
        assert_eq!(base.join("index.html").as_location(), "classpath:web/index.html");
    }

    #[test]
    fn extension_and_file_name() {
        let path = ResourcePath::new("config/context.yaml");
        assert_eq!(path.file_name(), Some("context.yaml"));
        assert_eq!(path.extension(), Some("yaml"));
        assert_eq!(ResourcePath::new(".hidden").extension(), None);
        assert_eq!(ResourcePath::new("dir/").file_name(), Some("dir"));
    }
}
