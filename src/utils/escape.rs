//! Escaping of values for interpolation into SPARQL statements.
//!
//! Strings become long literals (`"""…"""`), IRIs are wrapped in angle
//! brackets and everything else is written as an `xsd:` typed literal using
//! full datatype IRIs, so statements never depend on a `PREFIX xsd:`.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

fn typed(lexical: &str, datatype: &str) -> String {
    format!("\"{}\"^^<{}{}>", lexical, XSD, datatype)
}

pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 6);
    escaped.push_str("\"\"\"");
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            c => escaped.push(c),
        }
    }
    escaped.push_str("\"\"\"");
    escaped
}

/// Wraps an IRI in `<…>`; characters IRIREF forbids are percent-encoded.
pub fn escape_uri(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('<');
    for ch in value.chars() {
        match ch {
            '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' | '\u{0}'..='\u{20}' => {
                let mut buf = [0u8; 4];
                for byte in ch.encode_utf8(&mut buf).bytes() {
                    escaped.push_str(&format!("%{:02X}", byte));
                }
            }
            c => escaped.push(c),
        }
    }
    escaped.push('>');
    escaped
}

pub fn escape_datetime(value: &DateTime<Utc>) -> String {
    typed(
        &value.to_rfc3339_opts(SecondsFormat::Millis, true),
        "dateTime",
    )
}

pub fn escape_date(value: &NaiveDate) -> String {
    typed(&value.format("%Y-%m-%d").to_string(), "date")
}

pub fn escape_time(value: &NaiveTime) -> String {
    typed(&value.format("%H:%M:%S").to_string(), "time")
}

pub fn escape_int(value: i64) -> String {
    typed(&value.to_string(), "integer")
}

pub fn escape_float(value: f64) -> String {
    let lexical = if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{}INF", sign)
    } else {
        value.to_string()
    };
    typed(&lexical, "float")
}

pub fn escape_bool(value: bool) -> String {
    typed(if value { "true" } else { "false" }, "boolean")
}

/// Values that know how to render themselves as a SPARQL term.
pub trait SparqlEscape {
    fn sparql_escape(&self) -> String;
}

impl SparqlEscape for str {
    fn sparql_escape(&self) -> String {
        escape_string(self)
    }
}

impl SparqlEscape for String {
    fn sparql_escape(&self) -> String {
        escape_string(self)
    }
}

impl SparqlEscape for bool {
    fn sparql_escape(&self) -> String {
        escape_bool(*self)
    }
}

impl SparqlEscape for DateTime<Utc> {
    fn sparql_escape(&self) -> String {
        escape_datetime(self)
    }
}

impl SparqlEscape for NaiveDate {
    fn sparql_escape(&self) -> String {
        escape_date(self)
    }
}

impl SparqlEscape for NaiveTime {
    fn sparql_escape(&self) -> String {
        escape_time(self)
    }
}

macro_rules! impl_escape_int {
    ($($t:ty),*) => {
        $(impl SparqlEscape for $t {
            fn sparql_escape(&self) -> String {
                escape_int(i64::from(*self))
            }
        })*
    };
}

impl_escape_int!(i8, i16, i32, i64, u8, u16, u32);

// No lossless conversion to i64, so these keep their own decimal form.
macro_rules! impl_escape_wide_int {
    ($($t:ty),*) => {
        $(impl SparqlEscape for $t {
            fn sparql_escape(&self) -> String {
                typed(&self.to_string(), "integer")
            }
        })*
    };
}

impl_escape_wide_int!(i128, isize, u64, u128, usize);

impl SparqlEscape for f32 {
    fn sparql_escape(&self) -> String {
        escape_float(f64::from(*self))
    }
}

impl SparqlEscape for f64 {
    fn sparql_escape(&self) -> String {
        escape_float(*self)
    }
}

impl<T: SparqlEscape + ?Sized> SparqlEscape for &T {
    fn sparql_escape(&self) -> String {
        (**self).sparql_escape()
    }
}

pub fn sparql_escape<T: SparqlEscape + ?Sized>(value: &T) -> String {
    value.sparql_escape()
}
