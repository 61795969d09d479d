// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity provider (Auth0) parameters.
//!
//! The four values are handed verbatim to the authentication integration.
//! The derived endpoints below follow the Auth0 tenant layout: the issuer is
//! the tenant root, keys live under `/.well-known/jwks.json` and the hosted
//! login page is `/authorize`.

use serde::Serialize;
use url::Url;

/// Number of client ID characters kept when logging.
const CLIENT_ID_VISIBLE_CHARS: usize = 4;

/// Identity provider settings of a deployment record.
///
/// Not deserializable on its own: documents are read as a whole
/// [`Environment`](super::Environment), which validates this section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProvider {
    /// Tenant domain, e.g. `perpvirg.us.auth0.com`.
    domain: String,
    /// API audience registered with the provider.
    audience: String,
    /// Public client identifier of the front-end application.
    client_id: String,
    /// Where the provider redirects after login.
    callback_url: String,
}

impl IdentityProvider {
    /// Bundle identity provider settings.
    ///
    /// Values are checked when the bundle becomes part of an
    /// [`Environment`](super::Environment).
    pub fn new(
        domain: impl Into<String>,
        audience: impl Into<String>,
        client_id: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            audience: audience.into(),
            client_id: client_id.into(),
            callback_url: callback_url.into(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// Expected `iss` claim of tokens minted by this tenant.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    /// JWKS endpoint used to verify token signatures.
    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain)
    }

    /// Hosted login link for the implicit flow used by the browser client.
    pub fn authorize_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("https://{}/authorize", self.domain))?;
        url.query_pairs_mut()
            .append_pair("audience", &self.audience)
            .append_pair("response_type", "token")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.callback_url);
        Ok(url)
    }

    /// Client ID shortened for log output.
    pub fn masked_client_id(&self) -> String {
        let visible: String = self.client_id.chars().take(CLIENT_ID_VISIBLE_CHARS).collect();
        format!("{visible}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> IdentityProvider {
        IdentityProvider::new(
            "perpvirg.us.auth0.com",
            "menu",
            "E84bI9nZ9z7MeC1AM5ygaGxqpFCA5CFN",
            "http://localhost:8100",
        )
    }

    #[test]
    fn issuer_and_jwks_follow_tenant_domain() {
        let idp = provider();
        assert_eq!(idp.issuer(), "https://perpvirg.us.auth0.com/");
        assert_eq!(
            idp.jwks_url(),
            "https://perpvirg.us.auth0.com/.well-known/jwks.json"
        );
    }

    #[test]
    fn authorize_url_carries_login_parameters() {
        let url = provider().authorize_url().unwrap();
        assert_eq!(url.host_str(), Some("perpvirg.us.auth0.com"));
        assert_eq!(url.path(), "/authorize");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("audience".to_string(), "menu".to_string()),
                ("response_type".to_string(), "token".to_string()),
                (
                    "client_id".to_string(),
                    "E84bI9nZ9z7MeC1AM5ygaGxqpFCA5CFN".to_string()
                ),
                (
                    "redirect_uri".to_string(),
                    "http://localhost:8100".to_string()
                ),
            ]
        );
    }

    #[test]
    fn masked_client_id_keeps_prefix_only() {
        assert_eq!(provider().masked_client_id(), "E84b…");
    }
}
