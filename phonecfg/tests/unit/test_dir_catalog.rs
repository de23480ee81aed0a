//! Directory catalog unit tests

use std::fs;

use catalog_api::models::{ConfigDocument, DssKey, SipAccount};
use phonecfg::catalog::dir::DirCatalog;
use phonecfg::catalog::Catalog;
use phonecfg::errors::CfgError;
use phonecfg::filesys::dir::Dir;
use phonecfg::provision::{format_dss_block, format_sip_block};

fn key(position: u32, key_type: u32, value: &str, label: &str, icon: &str) -> DssKey {
    DssKey {
        position,
        key_type,
        value: value.to_string(),
        label: label.to_string(),
        icon: icon.to_string(),
    }
}

fn sip(phone_number: &str, display_name: &str) -> SipAccount {
    SipAccount {
        phone_number: phone_number.to_string(),
        display_name: display_name.to_string(),
        register_addr: "srv".to_string(),
        register_port: "5060".to_string(),
        register_user: "user".to_string(),
        register_password: "pass".to_string(),
        register_ttl: "60".to_string(),
        enable_reg: "1".to_string(),
    }
}

fn catalog(dir: &tempfile::TempDir) -> DirCatalog {
    DirCatalog::new(Dir::new(dir.path()))
}

#[tokio::test]
async fn test_list_configs_sorted_and_filtered() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("b.cfg"), "").unwrap();
    fs::write(tmp.path().join("a.cfg"), "").unwrap();
    fs::write(tmp.path().join("notes.txt"), "").unwrap();
    fs::write(tmp.path().join(".a.cfg.tmp"), "").unwrap();
    fs::create_dir(tmp.path().join("dir.cfg")).unwrap();

    let ids = catalog(&tmp).list_configs().await.unwrap();
    assert_eq!(ids, vec!["a.cfg".to_string(), "b.cfg".to_string()]);
}

#[tokio::test]
async fn test_list_missing_dir_is_unavailable() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = DirCatalog::new(Dir::new(tmp.path().join("missing")));
    assert!(matches!(
        catalog.list_configs().await,
        Err(CfgError::CatalogUnavailable(_))
    ));
}

#[tokio::test]
async fn test_load_projects_blocks() {
    let tmp = tempfile::tempdir().unwrap();
    let keys = vec![key(1, 1, "100", "One", "Red"), key(2, 2, "200", "Two", "Green")];
    let raw = format!("{}\n{}", format_dss_block(&keys), format_sip_block(&sip("100", "Test")));
    fs::write(tmp.path().join("phone.cfg"), &raw).unwrap();

    let document = catalog(&tmp).load_config("phone.cfg").await.unwrap();
    assert_eq!(document.raw_config, raw);
    assert_eq!(document.dss_keys, keys);
    assert_eq!(document.sip_account, sip("100", "Test"));
}

#[tokio::test]
async fn test_load_unknown_or_unsafe_id() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = catalog(&tmp);

    assert!(matches!(
        catalog.load_config("missing.cfg").await,
        Err(CfgError::NotFound(_))
    ));
    assert!(matches!(
        catalog.load_config("../secret.cfg").await,
        Err(CfgError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_save_config_updates_file() {
    let tmp = tempfile::tempdir().unwrap();
    let old_keys = vec![key(1, 0, "old", "Old", "Green")];
    let original = format!(
        "{}\n{}",
        format_dss_block(&old_keys),
        format_sip_block(&sip("old", "Old"))
    );
    let path = tmp.path().join("phone.cfg");
    fs::write(&path, &original).unwrap();

    let new_keys = vec![key(1, 1, "100", "New", "Red")];
    let document = ConfigDocument {
        raw_config: original,
        sip_account: sip("100", "New"),
        dss_keys: new_keys.clone(),
    };
    let response = catalog(&tmp).save_config("phone.cfg", &document).await.unwrap();
    assert!(response.success);
    assert_eq!(response.message, "Config updated");

    let expected = format!(
        "{}\n{}",
        format_dss_block(&new_keys),
        format_sip_block(&sip("100", "New"))
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[tokio::test]
async fn test_load_then_save_unchanged_is_stable() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = format!(
        "<<VOIP CONFIG FILE>>Version:2.0002\n\n{}\n<NET CONFIG MODULE>\nWAN Type :0\n\n{}",
        format_dss_block(&[key(1, 1, "7001", "Ops", "Blue")]),
        format_sip_block(&sip("7000", "Ops desk"))
    );
    let path = tmp.path().join("ops.cfg");
    fs::write(&path, &raw).unwrap();

    let catalog = catalog(&tmp);
    let document = catalog.load_config("ops.cfg").await.unwrap();
    let response = catalog.save_config("ops.cfg", &document).await.unwrap();

    assert!(response.success);
    assert_eq!(fs::read_to_string(&path).unwrap(), raw);
}

#[tokio::test]
async fn test_rejected_save_leaves_file_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("phone.cfg");
    fs::write(&path, "keep me\n").unwrap();

    let document = ConfigDocument {
        raw_config: "keep me\n".to_string(),
        sip_account: sip("100", "Two\nLines"),
        dss_keys: vec![],
    };
    let response = catalog(&tmp).save_config("phone.cfg", &document).await.unwrap();

    assert!(!response.success);
    assert!(response.message.contains("display_name"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "keep me\n");
}

#[tokio::test]
async fn test_save_unsafe_id_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let document = ConfigDocument {
        raw_config: String::new(),
        sip_account: SipAccount::default(),
        dss_keys: vec![],
    };
    assert!(matches!(
        catalog(&tmp).save_config("../../etc/x.cfg", &document).await,
        Err(CfgError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_crlf_file_loads_and_saves() {
    let tmp = tempfile::tempdir().unwrap();
    let keys = vec![key(1, 1, "100", "One", "Red")];
    let raw = format!(
        "<<VOIP CONFIG FILE>>Version:2.0002\n\n{}\n{}",
        format_dss_block(&keys),
        format_sip_block(&sip("100", "Test"))
    );
    let path = tmp.path().join("windows.cfg");
    fs::write(&path, raw.replace('\n', "\r\n")).unwrap();

    let catalog = catalog(&tmp);
    let mut document = catalog.load_config("windows.cfg").await.unwrap();
    assert_eq!(document.dss_keys, keys);
    assert_eq!(document.sip_account, sip("100", "Test"));

    document.dss_keys[0].label = "Reception".to_string();
    let response = catalog.save_config("windows.cfg", &document).await.unwrap();
    assert!(response.success, "{}", response.message);

    let stored = fs::read_to_string(&path).unwrap();
    assert!(stored.starts_with("<<VOIP CONFIG FILE>>Version:2.0002\n\n"));
    assert!(stored.contains("Fkey1 Title   :Reception\n"));
}
