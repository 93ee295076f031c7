use std::path::Path;

use crate::error::{Error, Result};

use super::Bitmap;

/// Storage format of every texture created here.
pub const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// GPU texture plus its default shader-resource view.
///
/// Owned by the caller for as long as any binding references the view.
pub struct LoadedTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

/// Decodes `path` and uploads it as a sampled sRGB texture.
///
/// The decoded bitmap is dropped before this returns; only the GPU copy
/// survives.
pub fn load_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: &Path,
) -> Result<LoadedTexture> {
    let bitmap = Bitmap::decode(path)?;
    log::debug!(
        "decoded {} ({}x{}, stride {}, {:?})",
        path.display(),
        bitmap.width(),
        bitmap.height(),
        bitmap.stride(),
        bitmap.layout()
    );

    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "texture".to_string());

    create_texture(device, queue, bitmap, &label)
}

/// Uploads `bitmap` (converted to RGBA first) as the initial contents of a new
/// 2D texture.
pub fn create_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    bitmap: Bitmap,
    label: &str,
) -> Result<LoadedTexture> {
    let (width, height) = (bitmap.width(), bitmap.height());
    check_extent(label, width, height, device.limits().max_texture_dimension_2d)?;
    let bitmap = bitmap.into_rgba();

    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TEXTURE_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        bitmap.pixels(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(bitmap.stride()),
            rows_per_image: Some(height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    Ok(LoadedTexture { texture, view })
}

/// Rejects empty textures and sizes beyond the device's 2D limit `max`.
fn check_extent(label: &str, width: u32, height: u32, max: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::ResourceCreation(format!(
            "texture {label:?} has empty size {width}x{height}"
        )));
    }
    if width > max || height > max {
        return Err(Error::ResourceCreation(format!(
            "texture {label:?} is {width}x{height}, device limit is {max}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u32 = 8192;

    fn rejected(width: u32, height: u32) -> bool {
        matches!(check_extent("t", width, height, MAX), Err(Error::ResourceCreation(_)))
    }

    #[test]
    fn empty_extents_are_rejected() {
        assert!(rejected(0, 16));
        assert!(rejected(16, 0));
        assert!(rejected(0, 0));
    }

    #[test]
    fn extents_past_the_limit_are_rejected() {
        assert!(rejected(MAX + 1, 16));
        assert!(rejected(16, MAX + 1));
    }

    #[test]
    fn extents_up_to_the_limit_are_accepted() {
        check_extent("t", MAX, MAX, MAX).unwrap();
        check_extent("t", 1, 1, MAX).unwrap();
        check_extent("t", 256, 256, MAX).unwrap();
    }

    #[test]
    fn error_names_the_texture() {
        match check_extent("logo.png", 0, 4, MAX) {
            Err(Error::ResourceCreation(msg)) => assert!(msg.contains("logo.png"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
