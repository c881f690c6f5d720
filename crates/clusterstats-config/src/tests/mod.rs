use std::io::Write;

use super::*;

fn write_settings(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn embedded_defaults_parse() {
    let settings = Settings::default();
    assert_eq!(settings.kubeconfig_path, PathBuf::from("kubeconfigs"));
    assert_eq!(settings.configmap_large_size, 262144);
    assert_eq!(settings.concurrency, 4);
}

#[test]
fn compact_keys_are_recognised() {
    let file = write_settings("kubeconfigpath: /etc/clusters\nconfigmaplargesize: 800\n");
    let settings = Settings::load_from(file.path()).unwrap();
    assert_eq!(settings.kubeconfig_path, PathBuf::from("/etc/clusters"));
    assert_eq!(settings.configmap_large_size, 800);
    // untouched keys keep their defaults
    assert_eq!(settings.concurrency, 4);
}

#[test]
fn kebab_and_snake_aliases_parse() {
    let kebab = write_settings("kubeconfig-path: /a\nconfigmap-large-size: 10\n");
    let snake = write_settings("kubeconfig_path: /b\nconfigmap_large_size: 20\nconcurrency: 1\n");

    let kebab = Settings::load_from(kebab.path()).unwrap();
    assert_eq!(kebab.kubeconfig_path, PathBuf::from("/a"));
    assert_eq!(kebab.configmap_large_size, 10);

    let snake = Settings::load_from(snake.path()).unwrap();
    assert_eq!(snake.kubeconfig_path, PathBuf::from("/b"));
    assert_eq!(snake.configmap_large_size, 20);
    assert_eq!(snake.concurrency, 1);
}

#[test]
fn empty_file_yields_defaults() {
    let file = write_settings("");
    assert_eq!(Settings::load_from(file.path()).unwrap(), Settings::default());
}

#[test]
fn malformed_file_is_an_error() {
    let file = write_settings("configmaplargesize: [not, a, number]\n");
    let err = Settings::load_from(file.path()).unwrap_err();
    assert!(err.to_string().contains("invalid settings"));
}

#[test]
fn missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");
    assert!(Settings::load(Some(&missing)).is_err());
}

#[test]
fn overrides_replace_only_given_values() {
    let settings = Settings::default().with_overrides(Some(PathBuf::from("/clusters")), None, Some(8));
    assert_eq!(settings.kubeconfig_path, PathBuf::from("/clusters"));
    assert_eq!(settings.configmap_large_size, 262144);
    assert_eq!(settings.concurrency, 8);
}

#[test]
fn validate_rejects_zero_concurrency() {
    let settings = Settings::default().with_overrides(None, None, Some(0));
    assert!(settings.validate().is_err());
}

#[test]
fn validate_rejects_empty_root() {
    let settings = Settings::default().with_overrides(Some(PathBuf::new()), None, None);
    assert!(settings.validate().is_err());
    assert!(Settings::default().validate().is_ok());
}
