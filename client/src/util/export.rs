//! PNG export of the decorated tree.
//!
//! Export renders into an offscreen canvas at [`EXPORT_PIXEL_RATIO`] without
//! editor chrome, encodes it with `toBlob`, and downloads it through a
//! temporary object URL.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use canvas::consts::EXPORT_PIXEL_RATIO;
use canvas::render::export_size;
use canvas::surface::Extent;
use canvas::tree::Scene;

/// Export failure shown in the status bar.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("export surface unavailable: {0}")]
    Unavailable(String),
    #[error("rendering failed: {0}")]
    Render(String),
    #[error("the browser could not encode the image")]
    Encode,
    #[error("download failed: {0}")]
    Download(String),
}

/// Download name for an export taken at `epoch_ms`.
#[allow(clippy::cast_possible_truncation)]
pub fn export_filename(epoch_ms: f64) -> String {
    format!("my-christmas-tree-{}.png", epoch_ms.max(0.0).trunc() as i64)
}

/// Backing-store size in device pixels of an export.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn export_pixels(scene: &Scene, extent: Extent) -> (u32, u32) {
    let (width, height) = export_size(scene, extent);
    ((width * EXPORT_PIXEL_RATIO).round() as u32, (height * EXPORT_PIXEL_RATIO).round() as u32)
}

/// Render the current session into a detached canvas sized for export.
///
/// # Errors
///
/// Returns [`ExportError`] when the canvas or its context cannot be created
/// or a draw call fails.
#[cfg(feature = "csr")]
pub fn render_export(
    engine: &canvas::engine::Engine,
    images: &mut canvas::render::ImageCache,
    now_ms: f64,
) -> Result<web_sys::HtmlCanvasElement, ExportError> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ExportError::Unavailable("no document".to_owned()))?;
    let surface = document
        .create_element("canvas")
        .map_err(|e| ExportError::Unavailable(format!("{e:?}")))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| ExportError::Unavailable("not a canvas element".to_owned()))?;
    let (width, height) = export_pixels(&engine.scene, engine.config.extent);
    surface.set_width(width);
    surface.set_height(height);

    let ctx = surface
        .get_context("2d")
        .map_err(|e| ExportError::Unavailable(format!("{e:?}")))?
        .ok_or_else(|| ExportError::Unavailable("2d context unsupported".to_owned()))?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| ExportError::Unavailable("unexpected context type".to_owned()))?;

    canvas::render::draw_export(&ctx, engine, images, now_ms, EXPORT_PIXEL_RATIO)
        .map_err(|e| ExportError::Render(format!("{e:?}")))?;
    Ok(surface)
}

/// Encode `surface` as PNG and download it as `filename`.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] if the browser yields no blob, and
/// [`ExportError::Download`] if the object URL or link cannot be created.
#[cfg(feature = "csr")]
pub async fn export_png(surface: web_sys::HtmlCanvasElement, filename: &str) -> Result<(), ExportError> {
    use futures::channel::oneshot;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    let (tx, rx) = oneshot::channel::<JsValue>();
    let on_blob = Closure::once(move |blob: JsValue| {
        if tx.send(blob).is_err() {
            log::debug!("export receiver dropped");
        }
    });
    surface
        .to_blob(on_blob.as_ref().unchecked_ref())
        .map_err(|e| ExportError::Render(format!("{e:?}")))?;
    let blob = rx
        .await
        .map_err(|_| ExportError::Encode)?
        .dyn_into::<web_sys::Blob>()
        .map_err(|_| ExportError::Encode)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| ExportError::Download(format!("{e:?}")))?;
    let clicked = click_download_link(&url, filename);
    if let Err(err) = web_sys::Url::revoke_object_url(&url) {
        log::warn!("revoke object url failed: {err:?}");
    }
    clicked
}

#[cfg(feature = "csr")]
fn click_download_link(href: &str, filename: &str) -> Result<(), ExportError> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ExportError::Download("no document".to_owned()))?;
    let link = document
        .create_element("a")
        .map_err(|e| ExportError::Download(format!("{e:?}")))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Download("not an anchor element".to_owned()))?;
    link.set_href(href);
    link.set_download(filename);
    link.click();
    Ok(())
}
