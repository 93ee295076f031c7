use std::path::{Path, PathBuf};

/// Files the tutorial loads at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub vertex_shader: PathBuf,
    pub pixel_shader: PathBuf,
    pub texture: PathBuf,
}

impl AssetPaths {
    pub const DEFAULT_DIR: &'static str = "assets";

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            vertex_shader: dir.join("cube.vsh.wgsl"),
            pixel_shader: dir.join("cube.psh.wgsl"),
            texture: dir.join("logo.png"),
        }
    }

    /// First directory among `candidates` that holds every asset.
    pub fn discover<I, P>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        candidates
            .into_iter()
            .map(Self::in_dir)
            .find(|paths| paths.missing().is_empty())
    }

    pub fn missing(&self) -> Vec<&Path> {
        [&self.vertex_shader, &self.pixel_shader, &self.texture]
            .into_iter()
            .map(PathBuf::as_path)
            .filter(|p| !p.is_file())
            .collect()
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::in_dir(Self::DEFAULT_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populate(dir: &Path) {
        for name in ["cube.vsh.wgsl", "cube.psh.wgsl", "logo.png"] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }
    }

    #[test]
    fn default_is_relative_assets_dir() {
        let paths = AssetPaths::default();
        assert_eq!(paths.texture, Path::new("assets").join("logo.png"));
        assert_eq!(paths.vertex_shader, Path::new("assets").join("cube.vsh.wgsl"));
        assert_eq!(paths.pixel_shader, Path::new("assets").join("cube.psh.wgsl"));
    }

    #[test]
    fn reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AssetPaths::in_dir(dir.path());
        assert_eq!(paths.missing().len(), 3);

        std::fs::write(&paths.texture, b"x").unwrap();
        assert_eq!(paths.missing(), vec![paths.vertex_shader.as_path(), paths.pixel_shader.as_path()]);
    }

    #[test]
    fn discover_picks_first_complete_dir() {
        let empty = tempfile::tempdir().unwrap();
        let full = tempfile::tempdir().unwrap();
        populate(full.path());

        let found = AssetPaths::discover([empty.path(), full.path()]).unwrap();
        assert_eq!(found, AssetPaths::in_dir(full.path()));
        assert!(AssetPaths::discover([empty.path()]).is_none());
    }
}
