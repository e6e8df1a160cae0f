use std::fs;

pub fn settings_export() {
    print!("{}", compose_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        compose_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: tracker.offset_unit={}, caret_sync.cursor_update_mode={:?}, buffer.max_length={}",
        s.tracker.offset_unit, s.caret_sync.cursor_update_mode, s.buffer.max_length
    );
}

/// Install a custom settings file before anything reads the global settings.
pub fn settings_load(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(compose_core::settings::init_custom(content), "Error: {}");
}
