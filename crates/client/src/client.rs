//! The configuration-exchange client.
//!
//! Every operation is one request/response cycle with no retries - the
//! service has its own consistency model, and callers that want retries can
//! layer them on. The client owns a [`Session`] and attaches its token to
//! each call according to the [`endpoints`](crate::endpoints) table.

use nacos_protocol::{ConfigEntry, ConfigPage, ConsoleEnvelope, LoginResponse, Namespace};
use tracing::debug;
use url::Url;

use crate::endpoints::{self, Endpoint, TokenPlacement};
use crate::error::{Error, Result};
use crate::session::{Session, now_ts};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};

/// Client over an injectable transport.
///
/// Single-threaded and blocking throughout; a batch of calls shares one
/// session and runs strictly sequentially.
pub struct Client<T = ReqwestTransport> {
    transport: T,
    session: Session,
}

impl Client<ReqwestTransport> {
    /// Builds a client over the production HTTP transport.
    pub fn connect(session: Session) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(session, transport))
    }
}

impl<T: HttpTransport> Client<T> {
    pub fn with_transport(session: Session, transport: T) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Exchanges the session's credentials for a bearer token.
    ///
    /// On success the token and its absolute expiry (`now + tokenTtl`) are
    /// stored on the session, where callers can read them back for external
    /// persistence.
    pub fn login(&mut self) -> Result<LoginResponse> {
        debug!(target: "nacos", user = self.session.username(), "login");
        let form = vec![
            ("username".to_string(), self.session.username().to_string()),
            ("password".to_string(), self.session.password().to_string()),
        ];
        let request = self.request(endpoints::LOGIN, &[], Some(form))?;
        let response = self.transport.send(request).map_err(Error::AuthTransport)?;

        if response.status != 200 {
            return Err(Error::AuthStatus {
                status: response.status,
                body: response.body,
            });
        }
        let parsed: LoginResponse =
            serde_json::from_str(&response.body).map_err(Error::AuthMalformed)?;
        if parsed.access_token.is_empty() {
            return Err(Error::AuthEmptyToken);
        }

        let expiry = now_ts() + parsed.token_ttl;
        self.session.adopt_token(parsed.access_token.clone(), expiry);
        Ok(parsed)
    }

    /// Fetches one entry. 404 is the distinct missing-entry outcome; the
    /// response body is the raw content, with the type left unset.
    pub fn get_config(&self, data_id: &str, group: &str) -> Result<ConfigEntry> {
        debug!(target: "nacos", data_id, group, "get config");
        let mut query = vec![("dataId", data_id), ("group", group)];
        let namespace = self.session.namespace();
        if !namespace.is_empty() {
            query.push(("tenant", namespace));
        }
        let request = self.request(endpoints::GET_CONFIG, &query, None)?;
        let response = self.transport.send(request)?;

        if response.status == 404 {
            return Err(Error::NotFound {
                data_id: data_id.to_string(),
                group: group.to_string(),
            });
        }
        if !response.is_success() {
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(ConfigEntry {
            data_id: data_id.to_string(),
            group: group.to_string(),
            content: response.body,
            config_type: None,
        })
    }

    /// Creates or overwrites one entry (the service has no separate create).
    pub fn publish_config(&self, entry: &ConfigEntry) -> Result<()> {
        debug!(target: "nacos", data_id = %entry.data_id, group = %entry.group, "publish config");
        let mut form = vec![
            ("dataId".to_string(), entry.data_id.clone()),
            ("group".to_string(), entry.group.clone()),
            ("content".to_string(), entry.content.clone()),
        ];
        if let Some(config_type) = entry.config_type {
            form.push(("type".to_string(), config_type.as_str().to_string()));
        }
        let namespace = self.session.namespace();
        if !namespace.is_empty() {
            form.push(("tenant".to_string(), namespace.to_string()));
        }
        let request = self.request(endpoints::PUBLISH_CONFIG, &[], Some(form))?;
        let response = self.transport.send(request)?;

        if !response.is_success() {
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(())
    }

    /// Deletes one entry. A 404 here is NOT special-cased: whether deleting
    /// an absent key succeeds is the service's call, and we report whatever
    /// it said.
    pub fn delete_config(&self, data_id: &str, group: &str) -> Result<()> {
        debug!(target: "nacos", data_id, group, "delete config");
        let mut query = vec![("dataId", data_id), ("group", group)];
        let namespace = self.session.namespace();
        if !namespace.is_empty() {
            query.push(("tenant", namespace));
        }
        let request = self.request(endpoints::DELETE_CONFIG, &query, None)?;
        let response = self.transport.send(request)?;

        if !response.is_success() {
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(())
    }

    /// Lists one page of entries with blank filters (match everything) and
    /// fuzzy search. Returns the page items only; callers page manually.
    pub fn list_configs(&self, page_no: u32, page_size: u32) -> Result<Vec<ConfigEntry>> {
        debug!(target: "nacos", page_no, page_size, "list configs");
        let page_no = page_no.to_string();
        let page_size = page_size.to_string();
        let mut query = vec![
            ("dataId", ""),
            ("group", ""),
            ("appName", ""),
            ("config_tags", ""),
            ("pageNo", page_no.as_str()),
            ("pageSize", page_size.as_str()),
            ("search", "blur"),
        ];
        let namespace = self.session.namespace();
        if !namespace.is_empty() {
            query.push(("tenant", namespace));
        }
        let username = self.session.username();
        if !username.is_empty() {
            query.push(("username", username));
        }
        let mut request = self.request(endpoints::LIST_CONFIGS, &query, None)?;
        request.headers.push(("Accept", "application/json".to_string()));
        let response = self.transport.send(request)?;

        if !response.is_success() {
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }
        let page: ConfigPage = serde_json::from_str(&response.body)?;
        Ok(page.page_items)
    }

    /// Lists all namespaces. The console envelope carries its own result
    /// code, checked independently of the HTTP status.
    pub fn list_namespaces(&self) -> Result<Vec<Namespace>> {
        debug!(target: "nacos", "list namespaces");
        let mut request = self.request(endpoints::LIST_NAMESPACES, &[], None)?;
        request.headers.push(("Accept", "application/json".to_string()));
        let response = self.transport.send(request)?;

        if !response.is_success() {
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }
        let envelope: ConsoleEnvelope<Vec<Namespace>> = serde_json::from_str(&response.body)?;
        if envelope.code != 200 {
            return Err(Error::Api {
                code: envelope.code,
                message: envelope.message.unwrap_or_default(),
            });
        }
        Ok(envelope.data)
    }

    pub fn create_namespace(&self, id: &str, name: &str, description: &str) -> Result<()> {
        debug!(target: "nacos", id, name, "create namespace");
        let form = vec![
            ("customNamespaceId".to_string(), id.to_string()),
            ("namespaceName".to_string(), name.to_string()),
            ("namespaceDesc".to_string(), description.to_string()),
        ];
        let request = self.request(endpoints::CREATE_NAMESPACE, &[], Some(form))?;
        let response = self.transport.send(request)?;

        if !response.is_success() {
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(())
    }

    pub fn delete_namespace(&self, id: &str) -> Result<()> {
        debug!(target: "nacos", id, "delete namespace");
        let request = self.request(endpoints::DELETE_NAMESPACE, &[("namespaceId", id)], None)?;
        let response = self.transport.send(request)?;

        if !response.is_success() {
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(())
    }

    /// Assembles one outbound request: URL, query, and the token in
    /// whichever position the endpoint table says this endpoint wants it.
    fn request(
        &self,
        endpoint: Endpoint,
        query: &[(&str, &str)],
        form: Option<Vec<(String, String)>>,
    ) -> Result<HttpRequest> {
        let raw = format!("{}{}", self.session.server_url(), endpoint.path);
        let mut url = Url::parse(&raw).map_err(|source| Error::ServerUrl { url: raw, source })?;

        let token = self.session.token();
        let token_in_query =
            endpoint.token == TokenPlacement::HeaderAndQuery && token.is_some();
        if !query.is_empty() || token_in_query {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            if token_in_query {
                if let Some(token) = token {
                    pairs.append_pair("accessToken", token);
                }
            }
        }

        let mut headers: Vec<(&'static str, String)> = Vec::new();
        if let Some(token) = token {
            match endpoint.token {
                TokenPlacement::None => {}
                TokenPlacement::Bearer => {
                    headers.push(("Authorization", format!("Bearer {token}")));
                }
                TokenPlacement::Header | TokenPlacement::HeaderAndQuery => {
                    headers.push(("accessToken", token.to_string()));
                }
            }
        }

        Ok(HttpRequest {
            method: endpoint.method,
            url: url.to_string(),
            headers,
            form,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeTransport, form_value, header_value, query_value};

    const LOGIN_OK: &str = r#"{"accessToken":"tok-1","tokenTtl":18000,"globalAdmin":true}"#;

    fn client(transport: FakeTransport) -> Client<FakeTransport> {
        let session = Session::new("http://localhost:8848", "nacos", "secret", "");
        Client::with_transport(session, transport)
    }

    fn scoped_client(transport: FakeTransport) -> Client<FakeTransport> {
        let session = Session::new("http://localhost:8848", "nacos", "secret", "dev");
        Client::with_transport(session, transport)
    }

    fn logged_in(mut client: Client<FakeTransport>) -> Client<FakeTransport> {
        client.session_mut().adopt_token("tok-1".into(), u64::MAX);
        client
    }

    #[test]
    fn login_posts_form_credentials_and_installs_token() {
        let transport = FakeTransport::new().respond(200, LOGIN_OK);
        let log = transport.log();
        let mut client = client(transport);

        let response = client.login().unwrap();
        assert_eq!(response.access_token, "tok-1");
        assert!(response.global_admin);
        assert!(client.session().is_token_valid());
        assert!(client.session().token_expiry() > now_ts());

        let requests = log.borrow();
        let request = &requests[0];
        assert_eq!(request.url, "http://localhost:8848/nacos/v1/auth/users/login");
        assert_eq!(form_value(request, "username"), Some("nacos"));
        assert_eq!(form_value(request, "password"), Some("secret"));
        assert!(request.headers.is_empty());
    }

    #[test]
    fn login_maps_bad_status() {
        let mut client = client(FakeTransport::new().respond(403, "unknown user!"));
        match client.login() {
            Err(Error::AuthStatus { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "unknown user!");
            }
            other => panic!("expected AuthStatus, got {other:?}"),
        }
        assert!(!client.session().is_token_valid());
    }

    #[test]
    fn login_maps_transport_failure() {
        let mut client = client(FakeTransport::new().fail("connection refused"));
        assert!(matches!(client.login(), Err(Error::AuthTransport(_))));
    }

    #[test]
    fn login_maps_unparseable_body() {
        let mut client = client(FakeTransport::new().respond(200, "<html>gateway</html>"));
        assert!(matches!(client.login(), Err(Error::AuthMalformed(_))));
    }

    #[test]
    fn login_rejects_empty_token() {
        let body = r#"{"accessToken":"","tokenTtl":18000}"#;
        let mut client = client(FakeTransport::new().respond(200, body));
        assert!(matches!(client.login(), Err(Error::AuthEmptyToken)));
    }

    #[test]
    fn get_config_returns_body_as_content() {
        let transport = FakeTransport::new().respond(200, "a: 1\nb: 2");
        let log = transport.log();
        let client = logged_in(client(transport));

        let entry = client.get_config("app.yaml", "DEFAULT_GROUP").unwrap();
        assert_eq!(entry.content, "a: 1\nb: 2");
        assert_eq!(entry.config_type, None);

        let requests = log.borrow();
        let request = &requests[0];
        assert_eq!(query_value(request, "dataId").as_deref(), Some("app.yaml"));
        assert_eq!(query_value(request, "group").as_deref(), Some("DEFAULT_GROUP"));
        assert_eq!(query_value(request, "tenant"), None);
        assert_eq!(header_value(request, "Authorization"), Some("Bearer tok-1"));
        assert_eq!(header_value(request, "accessToken"), None);
    }

    #[test]
    fn get_config_scopes_to_namespace() {
        let transport = FakeTransport::new().respond(200, "x");
        let log = transport.log();
        let client = logged_in(scoped_client(transport));

        client.get_config("a", "g").unwrap();
        let requests = log.borrow();
        assert_eq!(query_value(&requests[0], "tenant").as_deref(), Some("dev"));
    }

    #[test]
    fn get_config_distinguishes_404_from_other_failures() {
        let missing = logged_in(client(FakeTransport::new().respond(404, "")));
        let err = missing.get_config("a", "g").unwrap_err();
        assert!(err.is_not_found(), "got {err:?}");

        let failing = logged_in(client(FakeTransport::new().respond(500, "boom")));
        match failing.get_config("a", "g") {
            Err(Error::Status { status, .. }) => assert_eq!(status, 500),
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn publish_sends_type_only_when_declared() {
        use nacos_protocol::ConfigType;

        let transport = FakeTransport::new().respond(200, "true").respond(200, "true");
        let log = transport.log();
        let client = logged_in(scoped_client(transport));

        let mut entry = ConfigEntry {
            data_id: "app.yaml".into(),
            group: "DEFAULT_GROUP".into(),
            content: "a: 1".into(),
            config_type: None,
        };
        client.publish_config(&entry).unwrap();
        entry.config_type = Some(ConfigType::Yaml);
        client.publish_config(&entry).unwrap();

        let requests = log.borrow();
        assert_eq!(form_value(&requests[0], "type"), None);
        assert_eq!(form_value(&requests[0], "tenant"), Some("dev"));
        assert_eq!(form_value(&requests[1], "type"), Some("yaml"));
        assert_eq!(form_value(&requests[1], "content"), Some("a: 1"));
        assert_eq!(header_value(&requests[1], "Authorization"), Some("Bearer tok-1"));
    }

    #[test]
    fn delete_config_does_not_special_case_404() {
        let client = logged_in(client(FakeTransport::new().respond(404, "absent")));
        match client.delete_config("a", "g") {
            Err(Error::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn list_configs_sends_blur_search_and_dual_token() {
        let body = r#"{"totalCount":0,"pageNumber":1,"pagesAvailable":0,"pageItems":[]}"#;
        let transport = FakeTransport::new().respond(200, body);
        let log = transport.log();
        let client = logged_in(client(transport));

        let entries = client.list_configs(1, 20).unwrap();
        assert!(entries.is_empty());

        let requests = log.borrow();
        let request = &requests[0];
        assert_eq!(query_value(request, "search").as_deref(), Some("blur"));
        assert_eq!(query_value(request, "dataId").as_deref(), Some(""));
        assert_eq!(query_value(request, "pageNo").as_deref(), Some("1"));
        assert_eq!(query_value(request, "pageSize").as_deref(), Some("20"));
        assert_eq!(query_value(request, "username").as_deref(), Some("nacos"));
        // the one endpoint that wants the token twice
        assert_eq!(query_value(request, "accessToken").as_deref(), Some("tok-1"));
        assert_eq!(header_value(request, "accessToken"), Some("tok-1"));
        assert_eq!(header_value(request, "Authorization"), None);
    }

    #[test]
    fn list_configs_parses_page_items() {
        let body = r#"{
            "totalCount": 1,
            "pageNumber": 1,
            "pagesAvailable": 1,
            "pageItems": [{"dataId": "app.yaml", "group": "g", "content": "a: 1", "type": "yaml"}]
        }"#;
        let client = logged_in(client(FakeTransport::new().respond(200, body)));
        let entries = client.list_configs(1, 20).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].data_id, "app.yaml");
    }

    #[test]
    fn list_namespaces_checks_embedded_api_code() {
        let body = r#"{"code":403,"message":"forbidden","data":null}"#;
        let client = logged_in(client(FakeTransport::new().respond(200, body)));
        match client.list_namespaces() {
            Err(Error::Api { code, message }) => {
                assert_eq!(code, 403);
                assert_eq!(message, "forbidden");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn list_namespaces_uses_raw_token_header() {
        let body = r#"{"code":200,"message":null,"data":[
            {"namespace":"","namespaceShowName":"public","quota":200,"configCount":3,"type":0}
        ]}"#;
        let transport = FakeTransport::new().respond(200, body);
        let log = transport.log();
        let client = logged_in(client(transport));

        let namespaces = client.list_namespaces().unwrap();
        assert_eq!(namespaces.len(), 1);
        assert_eq!(namespaces[0].display_name, "public");

        let requests = log.borrow();
        assert_eq!(header_value(&requests[0], "accessToken"), Some("tok-1"));
        assert_eq!(header_value(&requests[0], "Authorization"), None);
        assert_eq!(query_value(&requests[0], "accessToken"), None);
    }

    #[test]
    fn namespace_mutations_encode_console_fields() {
        let transport = FakeTransport::new().respond(200, "true").respond(200, "true");
        let log = transport.log();
        let client = logged_in(client(transport));

        client.create_namespace("dev", "Development", "dev scope").unwrap();
        client.delete_namespace("dev").unwrap();

        let requests = log.borrow();
        assert_eq!(form_value(&requests[0], "customNamespaceId"), Some("dev"));
        assert_eq!(form_value(&requests[0], "namespaceName"), Some("Development"));
        assert_eq!(form_value(&requests[0], "namespaceDesc"), Some("dev scope"));
        assert_eq!(query_value(&requests[1], "namespaceId").as_deref(), Some("dev"));
    }

    #[test]
    fn no_token_means_no_auth_decoration() {
        let transport = FakeTransport::new().respond(200, "x");
        let log = transport.log();
        let client = client(transport);

        client.get_config("a", "g").unwrap();
        let requests = log.borrow();
        assert_eq!(header_value(&requests[0], "Authorization"), None);
        assert_eq!(query_value(&requests[0], "accessToken"), None);
    }
}
