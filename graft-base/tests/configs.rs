use std::fs;

use graft_base::{Config, ConfigSection, config_section};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct ServerConfig {
    bind_addr: String,
    workers: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct DatabaseConfig {
    host: String,
    port: u16,
    ssl: bool,
}

#[config_section("database")]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct DatabaseSectionConfig {
    host: String,
    port: u16,
    ssl: bool,
}

#[test]
fn test_config_new() {
    let config = Config::new();
    assert!(config.is_empty());
    assert_eq!(config.len(), 0);
}

#[test]
fn test_config_set_and_get() {
    let mut config = Config::new();
    let server = ServerConfig {
        bind_addr: "127.0.0.1:8080".to_string(),
        workers: 4,
    };

    config.set("server", &server).unwrap();

    let retrieved: ServerConfig = config.get("server").unwrap();
    assert_eq!(retrieved, server);
}

#[test]
fn test_config_get_nonexistent() {
    let config = Config::new();

    let result: Option<String> = config.get("nonexistent").unwrap();
    assert_eq!(result, None);
}

#[test]
fn test_config_with() {
    let config = Config::new().with(
        "server",
        ServerConfig {
            bind_addr: "0.0.0.0:9090".to_string(),
            workers: 2,
        },
    );

    let retrieved: ServerConfig = config.get("server").unwrap();
    assert_eq!(retrieved.bind_addr, "0.0.0.0:9090");
    assert_eq!(retrieved.workers, 2);
}

#[test]
fn test_config_parse_from_string() {
    let config = Config::parse(
        r#"
    {
        "database": {
            "host": "localhost",
            "port": 5432,
            "ssl": true
        }
    }
    "#,
    )
    .unwrap();

    let database: DatabaseConfig = config.get("database").unwrap();
    assert_eq!(database.host, "localhost");
    assert_eq!(database.port, 5432);
    assert!(database.ssl);
}

#[test]
fn test_config_parse_invalid_json() {
    let result = Config::parse(r#"{ "invalid": json }"#);
    assert!(result.is_err());
}

#[test]
fn test_config_parse_file() {
    let json_content = r#"
    {
        "server": {
            "bind_addr": "127.0.0.1:8080",
            "workers": 4
        }
    }
    "#;

    let temp_file = NamedTempFile::new().unwrap();
    fs::write(temp_file.path(), json_content).unwrap();

    let config = Config::parse_file(temp_file.path()).unwrap();
    let server: ServerConfig = config.get("server").unwrap();
    assert_eq!(server.bind_addr, "127.0.0.1:8080");
    assert_eq!(server.workers, 4);
}

#[test]
fn test_config_parse_file_not_found() {
    let result = Config::parse_file("nonexistent_file.json");
    assert!(result.is_err());
}

#[test]
fn test_config_merge_objects() {
    let mut base = Config::parse(
        r#"
    {
        "server": {
            "bind_addr": "localhost:8080",
            "workers": 1
        },
        "database": {
            "host": "localhost"
        }
    }
    "#,
    )
    .unwrap();

    let overlay = Config::parse(
        r#"
    {
        "server": {
            "bind_addr": "0.0.0.0:8080",
            "workers": 4
        },
        "database": {
            "port": 5432,
            "ssl": true
        }
    }
    "#,
    )
    .unwrap();

    base.merge_from(overlay).unwrap();

    let server: ServerConfig = base.get("server").unwrap();
    let database: DatabaseConfig = base.get("database").unwrap();

    assert_eq!(server.bind_addr, "0.0.0.0:8080");
    assert_eq!(server.workers, 4);
    assert_eq!(database.host, "localhost");
    assert_eq!(database.port, 5432);
    assert!(database.ssl);
}

#[test]
fn test_config_merge_arrays() {
    let mut base = Config::parse(r#"{"tags": ["production", "web"]}"#).unwrap();
    let overlay = Config::parse(r#"{"tags": ["monitoring"]}"#).unwrap();

    base.merge_from(overlay).unwrap();

    let tags: Vec<String> = base.get("tags").unwrap();
    assert_eq!(tags, vec!["production", "web", "monitoring"]);
}

#[test]
fn test_config_merge_replace_primitives() {
    let mut base = Config::parse(r#"{"port": 8080, "name": "old"}"#).unwrap();
    let overlay = Config::parse(r#"{"port": 9090, "name": "new"}"#).unwrap();

    base.merge_from(overlay).unwrap();

    let port: u16 = base.get("port").unwrap();
    let name: String = base.get("name").unwrap();
    assert_eq!(port, 9090);
    assert_eq!(name, "new");
}

#[test]
fn test_config_type_conversion_error() {
    let mut config = Config::new();
    config.set("value", "not_a_number").unwrap();

    let result: Result<i32, _> = config.get("value");
    assert!(result.is_err());
}

#[test]
fn test_config_serialization_round_trip() {
    let mut config = Config::new();
    config.set("name", "app").unwrap();
    config.set("port", 8080u16).unwrap();

    let serialized = serde_json::to_string(&config).unwrap();
    let deserialized: Config = serde_json::from_str(&serialized).unwrap();

    let name: String = deserialized.get("name").unwrap();
    let port: u16 = deserialized.get("port").unwrap();
    assert_eq!(name, "app");
    assert_eq!(port, 8080);
}

#[test]
fn test_config_section_macro() {
    assert_eq!(DatabaseSectionConfig::key(), "database");

    let config = Config::parse(
        r#"
    {
        "database": {
            "host": "localhost",
            "port": 5432,
            "ssl": false
        }
    }
    "#,
    )
    .unwrap();

    let section: DatabaseSectionConfig = config.section().unwrap();
    assert_eq!(section.host, "localhost");
    assert_eq!(section.port, 5432);
    assert!(!section.ssl);
}
