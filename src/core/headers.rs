use crate::domain::model::{
    MU_AUTH_ALLOWED_GROUPS, MU_AUTH_USED_GROUPS, MU_CALL_ID, MU_HEADERS, MU_SESSION_ID,
    X_REWRITE_URL,
};
use crate::utils::error::{MuError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::RequestBuilder;

/// Accessors for the mu headers of an incoming request.
///
/// Missing headers and values that are not valid UTF-8 read as `None`.
pub trait MuHeaderExt {
    fn mu_header(&self, name: &str) -> Option<&str>;

    fn session_id(&self) -> Option<&str> {
        self.mu_header(MU_SESSION_ID)
    }

    fn call_id(&self) -> Option<&str> {
        self.mu_header(MU_CALL_ID)
    }

    fn auth_allowed_groups(&self) -> Option<&str> {
        self.mu_header(MU_AUTH_ALLOWED_GROUPS)
    }

    fn auth_used_groups(&self) -> Option<&str> {
        self.mu_header(MU_AUTH_USED_GROUPS)
    }

    fn rewrite_url(&self) -> Option<&str> {
        self.mu_header(X_REWRITE_URL)
    }
}

impl MuHeaderExt for HeaderMap {
    fn mu_header(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
    }
}

pub fn session_id_header(headers: &HeaderMap) -> Option<&str> {
    headers.session_id()
}

pub fn rewrite_url_header(headers: &HeaderMap) -> Option<&str> {
    headers.rewrite_url()
}

/// Copies the forwarded mu headers present on `inbound`; nothing else.
pub fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::new();
    for name in MU_HEADERS {
        let header = HeaderName::from_static(name);
        for value in inbound.get_all(&header) {
            outbound.append(header.clone(), value.clone());
        }
    }
    outbound
}

pub fn apply_forwarded_headers(
    request: RequestBuilder,
    inbound: Option<&HeaderMap>,
) -> RequestBuilder {
    match inbound {
        Some(headers) => request.headers(forwarded_headers(headers)),
        None => request,
    }
}

/// Builds a header map from name/value pairs, e.g. values given on a
/// command line.
pub fn inbound_headers<'a, I>(pairs: I) -> Result<HeaderMap>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| MuError::InvalidHeader {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| MuError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}
