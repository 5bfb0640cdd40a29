use std::path::{Path, PathBuf};

use super::file::ConfigFormat;

/// Which half of the global/local pair a file belongs to.
///
/// `Local` files are loaded after `Global` ones for the same prefix, so
/// their values win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Global,
    Local,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Global => "global",
            Tier::Local => "local",
        }
    }
}

/// One candidate override file and the key prefix its contents land under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideFile {
    pub path: PathBuf,
    /// Dotted prefix ending in `.`, e.g. `db.`.
    pub prefix: String,
    pub tier: Tier,
}

/// Lists the files that may define `key`, in load order.
///
/// For `a.b` this is `a.global`, `a.local`, `a.b.global`, `a.b.local`
/// (plus the format's extension). Later files override earlier ones.
pub fn override_files(directory: &Path, key: &str, format: ConfigFormat) -> Vec<OverrideFile> {
    let mut files = Vec::new();
    let mut prefix = String::new();

    for part in key.split('.') {
        prefix.push_str(part);
        prefix.push('.');

        for tier in [Tier::Global, Tier::Local] {
            let name = format!("{prefix}{}.{}", tier.as_str(), format.extension());
            files.push(OverrideFile {
                path: directory.join(name),
                prefix: prefix.clone(),
                tier,
            });
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_files_order() {
        let files = override_files(Path::new("conf"), "db.pool.size", ConfigFormat::Toml);

        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "db.global.toml",
                "db.local.toml",
                "db.pool.global.toml",
                "db.pool.local.toml",
                "db.pool.size.global.toml",
                "db.pool.size.local.toml",
            ]
        );
        assert_eq!(files[2].prefix, "db.pool.");
        assert_eq!(files[3].tier, Tier::Local);
        assert!(files.iter().all(|f| f.path.starts_with("conf")));
    }

    #[test]
    fn test_override_files_json_extension() {
        let files = override_files(Path::new("."), "app", ConfigFormat::Json);
        assert_eq!(files.len(), 2);
        assert!(files[0].path.ends_with("app.global.json"));
        assert!(files[1].path.ends_with("app.local.json"));
    }
}
