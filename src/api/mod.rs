//! UniFFI export layer: the host implements [`HostSurface`], the input method
//! drives a [`ComposeSession`].

mod host;
mod session;
mod types;

pub use host::HostSurface;
pub use session::ComposeSession;
pub use types::{
    ComposeError, HostComposeState, HostCompletion, HostContent, HostCorrection,
    HostEditorAction, HostExtractedText, HostExtractedTextRequest, HostKeyEvent,
};

use std::path::Path;

// ---------------------------------------------------------------------------
// Top-level functions
// ---------------------------------------------------------------------------

#[uniffi::export]
fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[uniffi::export]
fn settings_load_config(path: String) -> Result<(), ComposeError> {
    let content = std::fs::read_to_string(&path).map_err(|e| ComposeError::Io {
        msg: format!("{path}: {e}"),
    })?;
    compose_core::settings::init_custom(content)
        .map_err(|e| ComposeError::InvalidData { msg: e.to_string() })?;
    Ok(())
}

#[uniffi::export]
fn settings_default_config() -> String {
    compose_core::settings::default_toml().to_string()
}

#[uniffi::export]
fn trace_init(log_dir: String) {
    crate::trace_init::init_tracing(Path::new(&log_dir));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let s = compose_core::settings::parse_settings_toml(&settings_default_config()).unwrap();
        assert_eq!(s.caret_sync.extract_max_chars, 10000);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = settings_load_config(path.to_string_lossy().into_owned()).unwrap_err();
        assert!(matches!(err, ComposeError::Io { .. }));
    }

    #[test]
    fn test_load_config_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[tracker]\noffset_unit = \"bytes\"\n").unwrap();
        let err = settings_load_config(path.to_string_lossy().into_owned()).unwrap_err();
        assert!(matches!(err, ComposeError::InvalidData { .. }));
    }
}
