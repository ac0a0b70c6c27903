//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use af_config::AcademyConfig;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_store_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[store]
url = "libsql://school.turso.io"
auth_token = "store-token"
max_attempts = 6
"#,
        )?;

        let config: AcademyConfig = Figment::from(Serialized::defaults(AcademyConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.store.url, "libsql://school.turso.io");
        assert_eq!(config.store.auth_token, "store-token");
        assert_eq!(config.store.max_attempts, 6);
        assert_eq!(config.store.local_path, ".academyflow/academyflow.db");
        assert!(config.store.is_remote());
        Ok(())
    });
}

#[test]
fn loads_session_from_project_dir() {
    Jail::expect_with(|jail| {
        jail.create_dir(".academyflow")?;
        jail.create_file(
            ".academyflow/config.toml",
            r#"
[session]
institute_id = "ins-0a1b2c3d"
user_id = "usr-9f8e7d6c"

[general]
default_limit = 50
"#,
        )?;

        let config = AcademyConfig::load().expect("config loads");
        assert_eq!(config.session.institute_id, "ins-0a1b2c3d");
        assert_eq!(config.session.user(), Some("usr-9f8e7d6c"));
        assert_eq!(config.general.default_limit, 50);
        assert!(!config.store.is_remote());
        Ok(())
    });
}

#[test]
fn explicit_project_root_is_honoured() {
    Jail::expect_with(|jail| {
        jail.create_dir("campus/.academyflow")?;
        jail.create_file(
            "campus/.academyflow/config.toml",
            "[store]\nlocal_path = \"campus.db\"\n",
        )?;

        let here = AcademyConfig::load().expect("config loads");
        assert_eq!(here.store.local_path, ".academyflow/academyflow.db");

        let there = AcademyConfig::load_in(std::path::Path::new("campus")).expect("config loads");
        assert_eq!(there.store.local_path, "campus.db");
        Ok(())
    });
}

#[test]
fn malformed_toml_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".academyflow")?;
        jail.create_file(".academyflow/config.toml", "[store\nurl = ")?;
        assert!(AcademyConfig::load().is_err());
        Ok(())
    });
}
