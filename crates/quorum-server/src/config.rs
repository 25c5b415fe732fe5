//! Runtime server configuration, deserialised from `config.toml`.

use std::{collections::HashMap, path::PathBuf};

use quorum_core::{identity::RoleDirectory, role::Role};
use serde::Deserialize;

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8700 }
fn default_store_path() -> PathBuf { PathBuf::from("quorum.db") }

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,

  /// Role → authorized emails. Absent means the society's reference
  /// allow-list.
  #[serde(default)]
  pub role_emails: Option<HashMap<Role, Vec<String>>>,

  /// Email → argon2 PHC string. Generate entries with `--hash-password`.
  #[serde(default)]
  pub credentials: HashMap<String, String>,
}

impl ServerConfig {
  pub fn directory(&self) -> RoleDirectory {
    match &self.role_emails {
      Some(map) => {
        RoleDirectory::new(map.iter().map(|(role, list)| (*role, list.clone())))
      }
      None => RoleDirectory::reference(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_fill_an_empty_config() {
    let cfg: ServerConfig = config::Config::builder()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8700);
    assert!(cfg.role_emails.is_none());
    assert!(cfg.credentials.is_empty());
  }

  #[test]
  fn configured_allow_list_overrides_the_reference() {
    let cfg: ServerConfig = config::Config::builder()
      .add_source(config::File::from_str(
        r#"
          [role_emails]
          EB = ["chair@club.example"]
        "#,
        config::FileFormat::Toml,
      ))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();

    let dir = cfg.directory();
    assert!(dir.authorizes(Role::Eb, "chair@club.example"));
    assert!(!dir.authorizes(Role::Eb, "eb@society.com"));
  }
}
