use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{
    decode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{AUTHORITY_ADMIN, AUTHORITY_SERVICE, AUTHORITY_USER, DURATION},
    error::{self, AddCode},
};

pub static ENCODING_KEY: Lazy<EncodingKey> = Lazy::new(|| {
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    EncodingKey::from_secret(secret.as_bytes())
});

pub static DECODING_KEY: Lazy<DecodingKey> = Lazy::new(|| {
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    DecodingKey::from_secret(secret.as_bytes())
});

#[derive(Debug, Clone, PartialEq)]
pub enum Auth {
    Service(String),
    Admin(String),
    User(String),
    None,
}

impl Auth {
    pub fn login(&self) -> Option<&str> {
        match self {
            Auth::Admin(login) | Auth::User(login) => Some(login),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Auth::None)
    }

    pub fn authorities(&self) -> Vec<&'static str> {
        match self {
            Auth::Service(_) => vec![AUTHORITY_SERVICE],
            Auth::Admin(_) => vec![AUTHORITY_ADMIN, AUTHORITY_USER],
            Auth::User(_) => vec![AUTHORITY_USER],
            Auth::None => vec![],
        }
    }

    pub fn has_any_authority(&self, authorities: &[&str]) -> bool {
        self.authorities()
            .iter()
            .any(|owned| authorities.contains(owned))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    auth: String,
    exp: i64,
}

impl Auth {
    /// `Ok(None)` means the token was well formed but has expired.
    pub fn from_token(token: &str) -> error::Result<Option<Self>> {
        let claims = match decode::<Claims>(token, &DECODING_KEY, &Validation::new(Algorithm::HS512))
        {
            Ok(c) => c.claims,
            Err(err) if matches!(err.kind(), ErrorKind::ExpiredSignature) => return Ok(None),
            Err(err) => return Err(anyhow!("Invalid token: {}", err).code(401)),
        };

        let authorities: Vec<&str> = claims.auth.split(',').map(str::trim).collect();

        if authorities.contains(&AUTHORITY_ADMIN) {
            Ok(Some(Auth::Admin(claims.sub)))
        } else if authorities.contains(&AUTHORITY_SERVICE) {
            Ok(Some(Auth::Service(claims.sub)))
        } else if authorities.contains(&AUTHORITY_USER) {
            Ok(Some(Auth::User(claims.sub)))
        } else {
            Err(anyhow!("Token grants no known authority").code(401))
        }
    }

    pub fn to_token(&self) -> error::Result<String> {
        let header = Header {
            alg: Algorithm::HS512,
            ..Default::default()
        };
        let exp = Utc::now().timestamp() + DURATION.num_seconds();
        let sub = match self {
            Auth::Service(name) => name.clone(),
            Auth::Admin(login) | Auth::User(login) => login.clone(),
            Auth::None => {
                return Err(anyhow!("Cannot create token for Auth::None").code(500))
            }
        };
        let claims = Claims {
            sub,
            auth: self.authorities().join(","),
            exp,
        };

        let token = match jsonwebtoken::encode(&header, &claims, &ENCODING_KEY) {
            Ok(t) => t,
            Err(_) => return Err(anyhow!("Failed to encode token").code(500)),
        };
        Ok(token)
    }
}
