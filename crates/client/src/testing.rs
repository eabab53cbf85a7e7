//! Test doubles shared by the unit tests in this crate.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use url::Url;

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

pub(crate) type RequestLog = Rc<RefCell<Vec<HttpRequest>>>;

/// Scripted transport: responses are served in push order, requests are
/// recorded for inspection. Unscripted requests get a bare 200 so tests
/// only script the round trips they care about.
pub(crate) struct FakeTransport {
    script: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RequestLog,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self {
            script: RefCell::new(VecDeque::new()),
            requests: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.script.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub(crate) fn fail(self, message: &str) -> Self {
        self.script
            .borrow_mut()
            .push_back(Err(TransportError(message.to_string())));
        self
    }

    /// Handle onto the request log that survives moving the transport into
    /// a client.
    pub(crate) fn log(&self) -> RequestLog {
        self.requests.clone()
    }
}

impl HttpTransport for FakeTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.script.borrow_mut().pop_front().unwrap_or(Ok(HttpResponse {
            status: 200,
            body: String::new(),
        }))
    }
}

pub(crate) fn form_value<'a>(request: &'a HttpRequest, key: &str) -> Option<&'a str> {
    request
        .form
        .as_ref()?
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

pub(crate) fn header_value<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
    request
        .headers
        .iter()
        .find(|(header, _)| *header == name)
        .map(|(_, value)| value.as_str())
}

pub(crate) fn query_value(request: &HttpRequest, key: &str) -> Option<String> {
    let url = Url::parse(&request.url).expect("request url should parse");
    url.query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}
