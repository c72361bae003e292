// file: src/config/ecosystem.rs
// version: 1.1.0
// guid: eco5f6a7-b8c9-0123-4567-890123abcdef

//! Typed pm2 app descriptor for the authentication service
//!
//! The descriptor is rendered as a JavaScript module (`ecosystem.config.js`)
//! and uploaded to the target host. Every value is emitted as a JSON string
//! literal, so the output can never contain an unresolved placeholder, and a
//! rendered descriptor parses back into a field-equal record.

use crate::config::ProvisionConfig;
use crate::error::ProvisionError;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Environment block handed to the service process by pm2.
///
/// Aside from the base URL, every value is a static test-only placeholder:
/// local issuer URIs and self-signed certificate paths shipped inside the
/// service archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEnv {
    pub node_env: String,
    pub oidc_client_id: String,
    pub oidc_client_secret: String,
    pub oidc_issuer_uri: String,
    pub svc_base_uri: String,
    pub default_protocol: String,
    pub ca_cert_file: String,
    pub idp_cert_file: String,
    pub idp_key_file: String,
    pub saml_idp_sso_url: String,
    pub saml_idp_slo_url: String,
    pub saml_sp_issuer: String,
    pub sp_cert_file: String,
    pub sp_key_file: String,
}

/// pm2 app descriptor for the authentication service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcosystemConfig {
    pub name: String,
    pub script: String,
    pub env: ServiceEnv,
}

/// Upper-case env keys in the order they are rendered
const ENV_KEYS: [&str; 14] = [
    "NODE_ENV",
    "OIDC_CLIENT_ID",
    "OIDC_CLIENT_SECRET",
    "OIDC_ISSUER_URI",
    "SVC_BASE_URI",
    "DEFAULT_PROTOCOL",
    "CA_CERT_FILE",
    "IDP_CERT_FILE",
    "IDP_KEY_FILE",
    "SAML_IDP_SSO_URL",
    "SAML_IDP_SLO_URL",
    "SAML_SP_ISSUER",
    "SP_CERT_FILE",
    "SP_KEY_FILE",
];

impl EcosystemConfig {
    /// Build the standard test descriptor with the host address substituted
    /// into the service's externally reachable base URL.
    pub fn for_host(addr: &str, config: &ProvisionConfig) -> Self {
        Self {
            name: "auth-svc".to_string(),
            script: "./bin/www".to_string(),
            env: ServiceEnv {
                node_env: "development".to_string(),
                oidc_client_id: "client_id".to_string(),
                oidc_client_secret: "client_secret".to_string(),
                oidc_issuer_uri: "http://localhost:3001/".to_string(),
                svc_base_uri: config.service_base_url(addr),
                default_protocol: "oidc".to_string(),
                ca_cert_file: "certs/sp.crt".to_string(),
                idp_cert_file: "certs/sp.crt".to_string(),
                idp_key_file: "certs/sp.key".to_string(),
                saml_idp_sso_url: "http://localhost:7000/saml/sso".to_string(),
                saml_idp_slo_url: "http://localhost:7000/saml/slo".to_string(),
                saml_sp_issuer: "urn:example:sp".to_string(),
                sp_cert_file: "certs/sp.crt".to_string(),
                sp_key_file: "certs/sp.key".to_string(),
            },
        }
    }

    /// Render the descriptor as a JavaScript module for pm2
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        out.push_str("// auth-svc configuration for pm2\n");
        out.push_str("module.exports = {\n");
        out.push_str("  apps: [{\n");
        out.push_str(&format!("    name: {},\n", js_string(&self.name)?));
        out.push_str(&format!("    script: {},\n", js_string(&self.script)?));
        out.push_str("    env: {\n");

        let values = self.env_values();
        for (i, (key, value)) in ENV_KEYS.iter().zip(values.iter()).enumerate() {
            let sep = if i + 1 == ENV_KEYS.len() { "" } else { "," };
            out.push_str(&format!("      {}: {}{}\n", key, js_string(value)?, sep));
        }

        out.push_str("    }\n");
        out.push_str("  }]\n");
        out.push_str("}\n");
        Ok(out)
    }

    /// Parse a rendered descriptor back into a record.
    ///
    /// Only descriptors produced by [`render`](Self::render) are supported;
    /// this exists so tests can verify the render round-trip.
    pub fn parse(text: &str) -> Result<Self> {
        let mut name = None;
        let mut script = None;
        let mut env: Vec<Option<String>> = vec![None; ENV_KEYS.len()];

        for line in text.lines() {
            let line = line.trim().trim_end_matches(',');
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "name" => name = Some(parse_js_string(value)?),
                "script" => script = Some(parse_js_string(value)?),
                _ => {
                    if let Some(idx) = ENV_KEYS.iter().position(|k| *k == key) {
                        env[idx] = Some(parse_js_string(value)?);
                    }
                }
            }
        }

        let mut values = env.into_iter();
        let mut next = |key: &str| {
            values.next().flatten().ok_or_else(|| {
                ProvisionError::template(format!("descriptor is missing env key {}", key))
            })
        };

        Ok(Self {
            name: name.ok_or_else(|| ProvisionError::template("descriptor is missing name"))?,
            script: script
                .ok_or_else(|| ProvisionError::template("descriptor is missing script"))?,
            env: ServiceEnv {
                node_env: next("NODE_ENV")?,
                oidc_client_id: next("OIDC_CLIENT_ID")?,
                oidc_client_secret: next("OIDC_CLIENT_SECRET")?,
                oidc_issuer_uri: next("OIDC_ISSUER_URI")?,
                svc_base_uri: next("SVC_BASE_URI")?,
                default_protocol: next("DEFAULT_PROTOCOL")?,
                ca_cert_file: next("CA_CERT_FILE")?,
                idp_cert_file: next("IDP_CERT_FILE")?,
                idp_key_file: next("IDP_KEY_FILE")?,
                saml_idp_sso_url: next("SAML_IDP_SSO_URL")?,
                saml_idp_slo_url: next("SAML_IDP_SLO_URL")?,
                saml_sp_issuer: next("SAML_SP_ISSUER")?,
                sp_cert_file: next("SP_CERT_FILE")?,
                sp_key_file: next("SP_KEY_FILE")?,
            },
        })
    }

    fn env_values(&self) -> [&String; 14] {
        [
            &self.env.node_env,
            &self.env.oidc_client_id,
            &self.env.oidc_client_secret,
            &self.env.oidc_issuer_uri,
            &self.env.svc_base_uri,
            &self.env.default_protocol,
            &self.env.ca_cert_file,
            &self.env.idp_cert_file,
            &self.env.idp_key_file,
            &self.env.saml_idp_sso_url,
            &self.env.saml_idp_slo_url,
            &self.env.saml_sp_issuer,
            &self.env.sp_cert_file,
            &self.env.sp_key_file,
        ]
    }
}

/// Encode a value as a JavaScript string literal (JSON string syntax)
fn js_string(value: &str) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Decode a JavaScript string literal produced by [`js_string`]
fn parse_js_string(value: &str) -> Result<String> {
    serde_json::from_str(value)
        .map_err(|e| ProvisionError::template(format!("invalid string literal {}: {}", value, e)))
}
