use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;
use wheel_core::WheelError;

fn asset_error(path: &str, err: JsValue) -> WheelError {
    WheelError::AssetLoad {
        path: path.to_owned(),
        reason: format!("{:?}", err),
    }
}

/// Fetch and decode an image off the main thread's critical path.
pub async fn load_image(path: &str) -> Result<web::HtmlImageElement, WheelError> {
    let img = web::HtmlImageElement::new().map_err(|e| asset_error(path, e))?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(path);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| asset_error(path, e))?;
    if img.natural_width() == 0 || img.natural_height() == 0 {
        return Err(WheelError::AssetLoad {
            path: path.to_owned(),
            reason: "decoded to an empty image".into(),
        });
    }
    Ok(img)
}

/// Copy a decoded image into a new sRGB texture.
pub fn upload_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    img: &web::HtmlImageElement,
    label: &str,
) -> (wgpu::Texture, wgpu::TextureView) {
    let size = wgpu::Extent3d {
        width: img.natural_width().max(1),
        height: img.natural_height().max(1),
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        // External image copies require RENDER_ATTACHMENT on the destination.
        usage: wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    queue.copy_external_image_to_texture(
        &wgpu::CopyExternalImageSourceInfo {
            source: wgpu::ExternalImageSource::HTMLImageElement(img.clone()),
            origin: wgpu::Origin2d::ZERO,
            flip_y: false,
        },
        wgpu::CopyExternalImageDestInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
            color_space: wgpu::PredefinedColorSpace::Srgb,
            premultiplied_alpha: false,
        },
        size,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
