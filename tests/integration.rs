// SPDX-License-Identifier: MPL-2.0
use iced_uploader::app::config::{self, Config};
use iced_uploader::app::i18n::I18n;
use iced_uploader::application::upload::Options;
use tempfile::tempdir;

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    // 1. Initial config: en-US
    let mut initial_config = Config::default();
    initial_config.general.language = Some("en-US".to_string());
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");

    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, &loaded_initial_config);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");
    assert_eq!(i18n_en.tr("dialog-confirm"), "Confirm");

    // 2. Change config to zh-CN
    let mut chinese_config = Config::default();
    chinese_config.general.language = Some("zh-CN".to_string());
    config::save_to_path(&chinese_config, &temp_config_file_path)
        .expect("Failed to write chinese config file");

    let loaded_chinese_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load chinese config from path");
    let i18n_zh = I18n::new(None, &loaded_chinese_config);
    assert_eq!(i18n_zh.current_locale().to_string(), "zh-CN");
    assert_eq!(i18n_zh.tr("dialog-delete-content"), "是否确认删除");

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn test_cli_language_wins_over_config() {
    let mut config = Config::default();
    config.general.language = Some("zh-CN".to_string());

    let i18n = I18n::new(Some("fr".to_string()), &config);
    assert_eq!(i18n.current_locale().to_string(), "fr");
}

#[test]
fn test_uploader_section_drives_options() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        "[uploader]\nmultiple = true\nmax_count = 3\ncolumns = 20\nshow_failed = false\n",
    )
    .expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    let options = Options::from(&loaded.uploader);

    assert!(options.multiple);
    assert_eq!(options.max_count, Some(3));
    assert_eq!(options.columns, config::MAX_COLUMNS);
    assert!(!options.show_failed);
    assert!(options.show_upload);
}

#[test]
fn test_all_locales_translate_uploader_keys() {
    let keys = [
        "uploader-add",
        "uploader-add-hint",
        "uploader-uploading",
        "uploader-failed",
        "dialog-delete-content",
        "dialog-confirm",
        "dialog-cancel",
        "error-upload-general",
    ];
    for locale in ["en-US", "fr", "zh-CN"] {
        let i18n = I18n::new(Some(locale.to_string()), &Config::default());
        for key in keys {
            assert!(
                !i18n.tr(key).starts_with("MISSING"),
                "{key} missing for {locale}"
            );
        }
    }
}
