use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub login: String,
    #[serde(default)]
    pub authorities: Vec<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub lang_key: Option<String>,
    #[serde(default)]
    pub activated: bool,
}

pub fn has_any_authority(account: Option<&Account>, authorities: &[&str]) -> bool {
    let Some(account) = account else {
        return false;
    };
    account
        .authorities
        .iter()
        .any(|owned| authorities.contains(&owned.as_str()))
}

/// Shows a piece of UI only to accounts holding one of `authorities`.
#[derive(Debug, Clone)]
pub struct HasAnyAuthority {
    authorities: Vec<String>,
}

impl HasAnyAuthority {
    pub fn new(authorities: &[&str]) -> Self {
        Self {
            authorities: authorities.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn is_visible(&self, account: Option<&Account>) -> bool {
        let authorities: Vec<&str> = self.authorities.iter().map(String::as_str).collect();
        has_any_authority(account, &authorities)
    }
}
