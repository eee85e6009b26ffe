use std::sync::Arc;

use serde::Serialize;
use type_map::concurrent::TypeMap;

use crate::error;
use crate::{auth::Auth, repository::RepositoryObject};

pub struct ServiceState {
    pub repositories: TypeMap,
    pub service_name: String,
}

impl ServiceState {
    pub fn new(service_name: &str) -> Self {
        Self {
            repositories: TypeMap::new(),
            service_name: service_name.to_string(),
        }
    }

    pub fn insert<T: 'static>(&mut self, repository: RepositoryObject<T>) {
        self.repositories.insert(repository);
    }
}

#[derive(Clone)]
pub struct HandlerContext {
    pub user_auth: Auth,
}

#[derive(Clone)]
pub struct EffectfullContext(pub Arc<ServiceState>, pub HandlerContext);

/// Outgoing HTTP call. Authorization is either a token minted for `auth` or
/// a bearer token forwarded as is.
pub struct ServiceRequest<'a, 'b, T = ()> {
    client: &'a reqwest::Client,
    method: reqwest::Method,
    url: Option<String>,
    body: Option<&'b T>,
    query: Vec<(String, String)>,
    auth: Auth,
    token: Option<String>,
}

impl<'a, 'b, T: Serialize> ServiceRequest<'a, 'b, T> {
    pub fn new(client: &'a reqwest::Client, auth: Auth) -> Self {
        Self {
            client,
            auth,
            method: reqwest::Method::GET,
            url: None,
            body: None,
            query: Vec::new(),
            token: None,
        }
    }

    pub fn get(mut self, url: String) -> Self {
        self.url = Some(url);
        self
    }

    pub fn post(mut self, url: String) -> Self {
        self.url = Some(url);
        self.method = reqwest::Method::POST;
        self
    }

    pub fn put(mut self, url: String) -> Self {
        self.url = Some(url);
        self.method = reqwest::Method::PUT;
        self
    }

    pub fn delete(mut self, url: String) -> Self {
        self.url = Some(url);
        self.method = reqwest::Method::DELETE;
        self
    }

    pub fn json(mut self, body: &'b T) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub async fn send(self) -> error::Result<reqwest::Response> {
        let Some(url) = self.url else {
            return Err(anyhow::anyhow!("Request has no url").into());
        };

        let mut request = self.client.request(self.method, url);

        let token = match (self.token, &self.auth) {
            (Some(token), _) => Some(token),
            (None, Auth::None) => None,
            (None, auth) => Some(auth.to_token()?),
        };
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if !self.query.is_empty() {
            request = request.query(&self.query);
        }
        if let Some(body) = self.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Ok(response)
    }
}
