//! Startup configuration: where the gazetteer comes from.
//!
//! Precedence: explicit path → `FORMOSA_GAZETTEER` → `~/.formosa/gazetteer.json`
//! if present → built-in data.

use std::path::{Path, PathBuf};

use crate::location::{Gazetteer, GazetteerError};

pub const GAZETTEER_ENV: &str = "FORMOSA_GAZETTEER";

/// Where the active gazetteer was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GazetteerSource {
    File(PathBuf),
    Builtin,
}

impl std::fmt::Display for GazetteerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Builtin => write!(f, "built-in"),
        }
    }
}

fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".formosa").join("gazetteer.json"))
}

/// Pick the gazetteer source without touching its contents.
///
/// An explicit path or environment value is used even if the file is
/// missing, so a typo surfaces as a load error instead of silently falling
/// back. The home-directory default is only used when it exists.
pub fn gazetteer_source(explicit: Option<&Path>, env_value: Option<&str>) -> GazetteerSource {
    if let Some(path) = explicit {
        return GazetteerSource::File(path.to_path_buf());
    }
    if let Some(value) = env_value.map(str::trim).filter(|v| !v.is_empty()) {
        return GazetteerSource::File(PathBuf::from(value));
    }
    match default_path() {
        Some(path) if path.is_file() => GazetteerSource::File(path),
        _ => GazetteerSource::Builtin,
    }
}

/// Resolve the source from the flag and the process environment, then load.
pub fn load_gazetteer(explicit: Option<&Path>) -> Result<(Gazetteer, GazetteerSource), GazetteerError> {
    let env_value = std::env::var(GAZETTEER_ENV).ok();
    let source = gazetteer_source(explicit, env_value.as_deref());
    let gazetteer = match &source {
        GazetteerSource::File(path) => Gazetteer::load(path)?,
        GazetteerSource::Builtin => Gazetteer::builtin()?,
    };
    tracing::info!(source = %source, cities = gazetteer.entries().len(), "gazetteer loaded");
    Ok((gazetteer, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_path_wins() {
        let source = gazetteer_source(Some(Path::new("/tmp/a.json")), Some("/tmp/b.json"));
        assert_eq!(source, GazetteerSource::File(PathBuf::from("/tmp/a.json")));
    }

    #[test]
    fn test_env_value_used_when_no_flag() {
        let source = gazetteer_source(None, Some("/tmp/b.json"));
        assert_eq!(source, GazetteerSource::File(PathBuf::from("/tmp/b.json")));
    }

    #[test]
    fn test_blank_env_value_ignored() {
        let source = gazetteer_source(None, Some("  "));
        assert_ne!(source, GazetteerSource::File(PathBuf::from("  ")));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("g.json");
        fs::write(
            &path,
            r#"{ "cities": [ { "name": "澎湖縣", "id": "F-D0047-045", "districts": { "馬公市": "澎湖縣馬公市" } } ] }"#,
        )
        .unwrap();

        let (g, source) = load_gazetteer(Some(&path)).unwrap();
        assert_eq!(source, GazetteerSource::File(path));
        assert_eq!(g.entries().len(), 1);
        assert_eq!(g.owner_of("馬公市").unwrap().name, "澎湖縣");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        assert!(matches!(load_gazetteer(Some(&path)), Err(GazetteerError::Io(_))));
    }

    #[test]
    fn test_source_display() {
        assert_eq!(GazetteerSource::Builtin.to_string(), "built-in");
    }
}
