use serde::Serialize;
use std::fmt;

/// A display name split into the part rules may edit and the extension they may not.
///
/// Only assets carry an extension. Names of in-memory objects (scene nodes and the
/// like) are kept whole in `base_name`, dots included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameParts {
    pub base_name: String,
    extension: String,
    is_asset: bool,
}

impl NameParts {
    /// Split a raw item name.
    ///
    /// A blank name yields empty parts. For assets, everything after the last dot is
    /// the extension and the remaining dot-segments are joined with `_`, so
    /// `model.lod0.fbx` becomes `model_lod0` + `fbx`.
    pub fn new(raw_name: &str, is_asset: bool) -> Self {
        if raw_name.trim().is_empty() {
            return Self {
                base_name: String::new(),
                extension: String::new(),
                is_asset,
            };
        }

        if !is_asset {
            return Self {
                base_name: raw_name.to_string(),
                extension: String::new(),
                is_asset,
            };
        }

        match raw_name.rsplit_once('.') {
            Some((stem, extension)) => Self {
                base_name: stem.replace('.', "_"),
                extension: extension.to_string(),
                is_asset,
            },
            None => Self {
                base_name: raw_name.to_string(),
                extension: String::new(),
                is_asset,
            },
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn is_asset(&self) -> bool {
        self.is_asset
    }

    /// Base name and extension joined back together.
    pub fn full_name(&self) -> String {
        if self.extension.is_empty() {
            self.base_name.clone()
        } else {
            format!("{}.{}", self.base_name, self.extension)
        }
    }

    /// Length of the base name in characters, the unit insert offsets count in.
    pub fn base_len(&self) -> usize {
        self.base_name.chars().count()
    }
}

impl fmt::Display for NameParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_name)?;
        if !self.extension.is_empty() {
            write!(f, ".{}", self.extension)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_with_extension() {
        let parts = NameParts::new("rock.png", true);
        assert_eq!(parts.base_name, "rock");
        assert_eq!(parts.extension(), "png");
        assert_eq!(parts.full_name(), "rock.png");
    }

    #[test]
    fn test_asset_multi_dot_is_flattened() {
        let parts = NameParts::new("model.lod0.final.fbx", true);
        assert_eq!(parts.base_name, "model_lod0_final");
        assert_eq!(parts.extension(), "fbx");
        assert_eq!(parts.full_name(), "model_lod0_final.fbx");
    }

    #[test]
    fn test_asset_without_dot() {
        let parts = NameParts::new("Materials", true);
        assert_eq!(parts.base_name, "Materials");
        assert_eq!(parts.extension(), "");
        assert_eq!(parts.full_name(), "Materials");
    }

    #[test]
    fn test_non_asset_keeps_dots() {
        let parts = NameParts::new("Enemy.Spawner.01", false);
        assert_eq!(parts.base_name, "Enemy.Spawner.01");
        assert_eq!(parts.extension(), "");
        assert!(!parts.is_asset());
    }

    #[test]
    fn test_blank_name() {
        for raw in ["", "   ", "\t"] {
            let parts = NameParts::new(raw, true);
            assert_eq!(parts.base_name, "");
            assert_eq!(parts.extension(), "");
            assert_eq!(parts.full_name(), "");
        }
    }

    #[test]
    fn test_leading_and_trailing_dots() {
        // Leading dot: everything is extension
        let parts = NameParts::new(".gitignore", true);
        assert_eq!(parts.base_name, "");
        assert_eq!(parts.extension(), "gitignore");
        assert_eq!(parts.full_name(), ".gitignore");

        // Trailing dot: empty extension, the dot is dropped on recombination
        let parts = NameParts::new("notes.", true);
        assert_eq!(parts.base_name, "notes");
        assert_eq!(parts.extension(), "");
        assert_eq!(parts.full_name(), "notes");
    }

    #[test]
    fn test_full_name_tracks_base_name() {
        let mut parts = NameParts::new("rock.png", true);
        parts.base_name = "stone_01".to_string();
        assert_eq!(parts.full_name(), "stone_01.png");
        assert_eq!(parts.to_string(), "stone_01.png");
    }

    #[test]
    fn test_base_len_counts_chars() {
        let parts = NameParts::new("héllo.txt", true);
        assert_eq!(parts.base_len(), 5);
    }
}
