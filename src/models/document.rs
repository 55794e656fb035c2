//! Gateway configuration documents.
//!
//! The document schema mirrors the dynamic configuration of an edge
//! gateway: four top-level sections (HTTP, TCP, UDP, TLS), each optional.
//! A section that arrives structurally empty is pruned to absent before
//! serialization so the mirrored file only carries meaningful sections.
//!
//! Epistemic mapping:
//! - K_i: Schema is closed at compile time; hidden bookkeeping is declared
//!   per field, not guessed from names
//! - B_i: Inbound documents come from an external producer and may be
//!   sparse; every field is defaultable

use crate::inspect::{is_empty, FieldView, Inspect, SelfEmpty, View};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One gateway configuration snapshot, as delivered by a discovery
/// producer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp: Option<TcpConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udp: Option<UdpConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
    /// Which producer delivered this snapshot. Bookkeeping only: never
    /// serialized, never consulted by the emptiness test.
    #[serde(skip)]
    pub(crate) origin: String,
}

impl GatewayConfig {
    /// Replace structurally empty sections with absent so they are omitted
    /// from the serialized document. Idempotent.
    pub fn prune(&mut self) {
        if is_empty(&self.http) {
            self.http = None;
        }
        if is_empty(&self.tcp) {
            self.tcp = None;
        }
        if is_empty(&self.udp) {
            self.udp = None;
        }
        if is_empty(&self.tls) {
            self.tls = None;
        }
    }
}

/// HTTP section: routers, middlewares and services keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpConfig {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub routers: BTreeMap<String, HttpRouter>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub middlewares: BTreeMap<String, Middleware>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub services: BTreeMap<String, HttpService>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpRouter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entry_points: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rule: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub priority: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub middlewares: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service: String,
    #[serde(skip_serializing_if = "is_false")]
    pub tls: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Middleware {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub strip_prefixes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpService {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<HttpServer>,
    #[serde(skip_serializing_if = "is_false")]
    pub pass_host_header: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServer {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// TCP section: routers and services keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TcpConfig {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub routers: BTreeMap<String, TcpRouter>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub services: BTreeMap<String, StreamService>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TcpRouter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entry_points: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rule: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service: String,
    #[serde(skip_serializing_if = "is_false")]
    pub pass_through: bool,
}

/// UDP section. UDP routers carry no matching rule, only a service
/// binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UdpConfig {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub routers: BTreeMap<String, UdpRouter>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub services: BTreeMap<String, StreamService>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UdpRouter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entry_points: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service: String,
}

/// Plain stream backend shared by the TCP and UDP sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamService {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<StreamServer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamServer {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
}

/// TLS section: served certificates plus connection options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TlsConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<Certificate>,
    #[serde(skip_serializing_if = "TlsOptions::is_default")]
    pub options: TlsOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certificate {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cert_file: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key_file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TlsOptions {
    #[serde(skip_serializing_if = "TlsVersion::is_unspecified")]
    pub min_version: TlsVersion,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cipher_suites: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub insecure_skip_verify: bool,
}

impl TlsOptions {
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Minimum accepted TLS protocol version.
///
/// Carries its own emptiness: only `Unspecified` is empty. A pinned
/// version must survive pruning even when every sibling field is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsVersion {
    #[default]
    Unspecified,
    V12,
    V13,
}

impl TlsVersion {
    pub fn is_unspecified(&self) -> bool {
        matches!(self, TlsVersion::Unspecified)
    }
}

impl SelfEmpty for TlsVersion {
    fn is_empty(&self) -> bool {
        self.is_unspecified()
    }
}

fn is_false(value: &bool) -> bool {
    !value
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

// Structural views. Only types the oracle actually reaches need one:
// recursion stops at sequence and mapping boundaries, so router, service
// and certificate types stay off the inspection surface entirely.

impl Inspect for GatewayConfig {
    fn view(&self) -> View<'_> {
        View::Record(vec![
            FieldView::visible("http", &self.http),
            FieldView::visible("tcp", &self.tcp),
            FieldView::visible("udp", &self.udp),
            FieldView::visible("tls", &self.tls),
            FieldView::hidden("origin", &self.origin),
        ])
    }
}

impl Inspect for HttpConfig {
    fn view(&self) -> View<'_> {
        View::Record(vec![
            FieldView::visible("routers", &self.routers),
            FieldView::visible("middlewares", &self.middlewares),
            FieldView::visible("services", &self.services),
        ])
    }
}

impl Inspect for TcpConfig {
    fn view(&self) -> View<'_> {
        View::Record(vec![
            FieldView::visible("routers", &self.routers),
            FieldView::visible("services", &self.services),
        ])
    }
}

impl Inspect for UdpConfig {
    fn view(&self) -> View<'_> {
        View::Record(vec![
            FieldView::visible("routers", &self.routers),
            FieldView::visible("services", &self.services),
        ])
    }
}

impl Inspect for TlsConfig {
    fn view(&self) -> View<'_> {
        View::Record(vec![
            FieldView::visible("certificates", &self.certificates),
            FieldView::visible("options", &self.options),
        ])
    }
}

impl Inspect for TlsOptions {
    fn view(&self) -> View<'_> {
        View::Record(vec![
            FieldView::visible("min_version", &self.min_version),
            FieldView::visible("cipher_suites", &self.cipher_suites),
            FieldView::visible("insecure_skip_verify", &self.insecure_skip_verify),
        ])
    }
}

impl Inspect for TlsVersion {
    fn view(&self) -> View<'_> {
        View::Custom(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_with_router() -> HttpConfig {
        let mut routers = BTreeMap::new();
        routers.insert(
            "dashboard".to_string(),
            HttpRouter {
                entry_points: vec!["web".to_string()],
                rule: "Host(`dashboard.example`)".to_string(),
                service: "dashboard".to_string(),
                ..Default::default()
            },
        );
        HttpConfig {
            routers,
            ..Default::default()
        }
    }

    #[test]
    fn prune_keeps_populated_sections_and_drops_default_ones() {
        let mut config = GatewayConfig {
            http: Some(http_with_router()),
            tcp: Some(TcpConfig::default()),
            udp: Some(UdpConfig::default()),
            tls: Some(TlsConfig::default()),
            ..Default::default()
        };

        config.prune();

        assert!(config.http.is_some());
        assert!(config.tcp.is_none());
        assert!(config.udp.is_none());
        assert!(config.tls.is_none());
    }

    #[test]
    fn prune_is_idempotent() {
        let mut once = GatewayConfig {
            http: Some(http_with_router()),
            tls: Some(TlsConfig::default()),
            ..Default::default()
        };
        once.prune();

        let mut twice = once.clone();
        twice.prune();

        assert_eq!(once, twice);
    }

    #[test]
    fn hidden_origin_neither_serializes_nor_blocks_pruning() {
        let tagged_only = GatewayConfig {
            origin: "docker".to_string(),
            ..Default::default()
        };
        assert!(is_empty(&tagged_only));

        let mut config = GatewayConfig {
            http: Some(http_with_router()),
            origin: "docker".to_string(),
            ..Default::default()
        };
        assert!(!is_empty(&config));

        config.prune();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("dashboard"));
        assert!(!yaml.contains("origin"));
        assert!(!yaml.contains("docker"));
    }

    #[test]
    fn tls_section_honors_the_declared_version_predicate() {
        assert!(is_empty(&TlsConfig::default()));

        let pinned = TlsConfig {
            options: TlsOptions {
                min_version: TlsVersion::V13,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!is_empty(&pinned));

        let relaxed = TlsConfig {
            options: TlsOptions {
                insecure_skip_verify: true,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!is_empty(&relaxed));
    }

    #[test]
    fn fully_pruned_document_serializes_to_an_empty_mapping() {
        let mut config = GatewayConfig {
            http: Some(HttpConfig::default()),
            tcp: Some(TcpConfig::default()),
            udp: Some(UdpConfig::default()),
            tls: Some(TlsConfig::default()),
            ..Default::default()
        };
        config.prune();

        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(yaml.trim(), "{}");
    }

    #[test]
    fn snapshots_parse_from_discovery_json() {
        let line = r#"{"http":{"routers":{"app":{"rule":"Host(`app.example`)","service":"app","entryPoints":["web"]}}},"tls":{"options":{"minVersion":"v13"}}}"#;
        let config: GatewayConfig = serde_json::from_str(line).unwrap();

        let http = config.http.as_ref().unwrap();
        assert_eq!(http.routers["app"].rule, "Host(`app.example`)");
        assert_eq!(http.routers["app"].entry_points, vec!["web"]);
        assert_eq!(
            config.tls.as_ref().unwrap().options.min_version,
            TlsVersion::V13
        );
    }
}
