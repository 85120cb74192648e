//! Expression templates
//!
//! Renders `%s` (next argument), `%N$s` (argument `N`, 1-based) and `%%`
//! (a literal percent sign). Arguments beyond those referenced are ignored.

use std::fmt::Display;

use crate::matchers::MatchError;

/// Render `template` with `args`.
///
/// A specifier without a matching argument, or any other `%` sequence, is a
/// setup error naming the template.
pub fn render(template: &str, args: &[&dyn Display]) -> Result<String, MatchError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    let mut next = 0;

    while let Some((start, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut digits = String::new();
        while let Some(&(_, d)) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            digits.push(d);
            chars.next();
        }

        let index = match (digits.is_empty(), chars.next()) {
            (true, Some((_, '%'))) => {
                out.push('%');
                continue;
            }
            (true, Some((_, 's'))) => {
                next += 1;
                next - 1
            }
            (false, Some((_, '$'))) => {
                if !matches!(chars.next(), Some((_, 's'))) {
                    return Err(bad_specifier(template, start));
                }
                match digits.parse::<usize>() {
                    Ok(position) if position > 0 => position - 1,
                    _ => return Err(bad_specifier(template, start)),
                }
            }
            _ => return Err(bad_specifier(template, start)),
        };

        let arg = args.get(index).ok_or_else(|| {
            MatchError::setup(
                template,
                format!(
                    "missing format argument {} (got {} argument{})",
                    index + 1,
                    args.len(),
                    if args.len() == 1 { "" } else { "s" }
                ),
            )
        })?;
        out.push_str(&arg.to_string());
    }

    Ok(out)
}

fn bad_specifier(template: &str, at: usize) -> MatchError {
    MatchError::setup(
        template,
        format!("unsupported format specifier at offset {at}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn displayed<'a>(args: &'a [&'a str]) -> Vec<&'a dyn Display> {
        args.iter().map(|arg| arg as &dyn Display).collect()
    }

    #[rstest]
    #[case("/ns:people/composers/composer[%s]", &["1"], "/ns:people/composers/composer[1]")]
    #[case("/a[%s]/b[%s]", &["2", "x"], "/a[2]/b[x]")]
    #[case("/a[%2$s]/b[%1$s]", &["1", "2"], "/a[2]/b[1]")]
    #[case("/a[%1$s]/b[%1$s]", &["7"], "/a[7]/b[7]")]
    #[case("100%% of %s", &["composers"], "100% of composers")]
    #[case("/plain/path", &[], "/plain/path")]
    #[case("/extra[%s]", &["1", "2", "3"], "/extra[1]")]
    fn renders(#[case] template: &str, #[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(render(template, &displayed(args)).unwrap(), expected);
    }

    #[test]
    fn renders_mixed_argument_types() {
        assert_eq!(render("/a[%s]/b[%s]", &[&2, &"x"]).unwrap(), "/a[2]/b[x]");
    }

    #[rstest]
    #[case("/a[%s]", &[])]
    #[case("/a[%2$s]", &["1"])]
    #[case("/a[%0$s]", &["1"])]
    #[case("/a[%d]", &["1"])]
    #[case("/a[%", &["1"])]
    fn rejects(#[case] template: &str, #[case] args: &[&str]) {
        let err = render(template, &displayed(args)).unwrap_err();
        assert!(err.is_setup(), "expected setup error, got {err:?}");
    }

    #[test]
    fn missing_argument_is_reported() {
        let err = render("/a[%s]/b[%s]", &[&1]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Assertion setup failed for /a[%s]/b[%s]: missing format argument 2 (got 1 argument)"
        );
    }
}
