use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use texcube_engine::assets::AssetPaths;
use texcube_engine::device::{Backend, GpuInit};
use texcube_engine::frame::CameraConfig;
use texcube_engine::logging::{init_logging, LoggingConfig};
use texcube_engine::window::{Runtime, RuntimeConfig, SceneConfig};

/// Renders a textured, rotating cube.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Graphics API: d3d11, d3d12, vk or gl.
    #[arg(long, default_value = "d3d11")]
    mode: Backend,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig::default());

    let assets = resolve_assets()?;
    log::info!(
        "Tutorial03: Texturing, backend {}, assets in {}",
        args.mode.api_name(),
        assets.texture.parent().map_or_else(|| ".".into(), |p| p.display().to_string())
    );

    Runtime::run(
        RuntimeConfig::for_backend(args.mode),
        SceneConfig {
            backend: args.mode,
            gpu_init: GpuInit::default(),
            assets,
            camera: CameraConfig::default(),
        },
    )
}

/// `./assets` first, then the copy shipped with this crate.
fn resolve_assets() -> Result<AssetPaths> {
    let shipped = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(AssetPaths::DEFAULT_DIR);
    let candidates = [PathBuf::from(AssetPaths::DEFAULT_DIR), shipped];

    match AssetPaths::discover(&candidates) {
        Some(paths) => Ok(paths),
        None => {
            let missing: Vec<_> = AssetPaths::default()
                .missing()
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            bail!("assets not found (missing: {})", missing.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_to_d3d11() {
        let args = Args::try_parse_from(["texcube-tutorial"]).unwrap();
        assert_eq!(args.mode, Backend::D3D11);
    }

    #[test]
    fn mode_parses_every_backend() {
        for (name, backend) in [("d3d12", Backend::D3D12), ("vk", Backend::VK), ("GL", Backend::GL)] {
            let args = Args::try_parse_from(["texcube-tutorial", "--mode", name]).unwrap();
            assert_eq!(args.mode, backend);
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Args::try_parse_from(["texcube-tutorial", "--mode", "metal"]).is_err());
    }

    #[test]
    fn shipped_assets_are_found() {
        let paths = resolve_assets().unwrap();
        assert!(paths.missing().is_empty());
    }
}
