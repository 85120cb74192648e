//! Result handlers
//!
//! [`print`] renders the whole exchange through `tracing` at `info` level,
//! [`log`] does the same at `debug` level.

use std::fmt::Write;

use crate::result::MvcResult;
use crate::Result;

/// An action applied to a result, e.g. printing it.
pub trait ResultHandler {
    fn handle(&self, result: &MvcResult) -> Result<()>;
}

impl<F> ResultHandler for F
where
    F: Fn(&MvcResult) -> Result<()>,
{
    fn handle(&self, result: &MvcResult) -> Result<()> {
        self(result)
    }
}

/// Emit the rendered result at `info` level.
pub fn print() -> impl ResultHandler {
    |result: &MvcResult| -> Result<()> {
        tracing::info!("\n{}", render(result));
        Ok(())
    }
}

/// Emit the rendered result at `debug` level.
pub fn log() -> impl ResultHandler {
    |result: &MvcResult| -> Result<()> {
        tracing::debug!("\n{}", render(result));
        Ok(())
    }
}

/// Multi-line report of request, handler and response.
pub fn render(result: &MvcResult) -> String {
    let request = result.request();
    let response = result.response();
    let mut out = String::new();

    section(&mut out, "MockRequest");
    line(&mut out, "HTTP Method", request.method());
    line(&mut out, "Request URI", request.path());
    line(&mut out, "Parameters", format_args!("{:?}", request.params()));
    line(&mut out, "Headers", format_args!("{:?}", request.headers()));
    line(&mut out, "Body", request.text());

    section(&mut out, "Handler");
    line(&mut out, "Name", result.handler().unwrap_or("null"));
    line(
        &mut out,
        "Path variables",
        format_args!("{:?}", request.path_variables()),
    );

    section(&mut out, "Resolved Exception");
    line(
        &mut out,
        "Message",
        result.resolved_exception().map_or("null", |e| e.message()),
    );

    section(&mut out, "MockResponse");
    line(&mut out, "Status", response.status());
    line(&mut out, "Headers", format_args!("{:?}", response.headers()));
    line(
        &mut out,
        "Content type",
        response.content_type_value().unwrap_or("null"),
    );
    line(&mut out, "Body", response.text());
    line(
        &mut out,
        "Forwarded URL",
        response.forwarded_url().unwrap_or("null"),
    );
    line(
        &mut out,
        "Included URLs",
        format_args!("{:?}", response.included_urls()),
    );

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}:");
}

fn line(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "{label:>18} = {value}");
}
