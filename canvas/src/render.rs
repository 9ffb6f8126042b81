//! Rendering: draws the tree scene and its decorations to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads engine state and produces pixels; it never mutates the store or
//! the gesture state. The only state it owns is the [`ImageCache`] of decoded
//! image decorations.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The host logs the result at its boundary.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::{EMOJI_FONT_PX, EXPORT_SUBTITLE_BAND_PX, EXPORT_TITLE_BAND_PX, SUBTITLE_TEXT, TITLE_TEXT};
use crate::doc::{Content, Decoration};
use crate::engine::Engine;
use crate::surface::Extent;
use crate::tree::{
    self, ORNAMENTS, Ornament, OrnamentShape, Rect, STAR_INNER_RADIUS, STAR_OUTER_RADIUS, Scene, Tier,
};

const TIER_OUTER_COLOR: &str = "#2D5016";
const TIER_INNER_COLOR: &str = "#3D6B1F";
const TIER_SHADOW: &str = "rgba(0, 0, 0, 0.3)";
const TRUNK_EDGE_COLOR: &str = "#5D4037";
const TRUNK_MID_COLOR: &str = "#6D4C41";
const STAR_FILL: &str = "#FDE047";
const STAR_STROKE: &str = "#FACC15";
const STAR_GLOW: &str = "rgba(253, 224, 71, 0.9)";
const GLOW_COLOR: &str = "rgba(107, 203, 119, 0.3)";
const SNOW_COLOR: &str = "255, 255, 255";
const OUTLINE_COLOR: &str = "#FACC15";
const OUTLINE_DASH_PX: f64 = 4.0;
const OUTLINE_PAD_PX: f64 = 4.0;

/// Page background, top to bottom, for opaque renders.
const EXPORT_BACKGROUND: [&str; 3] = ["#0F172A", "#1E293B", "#022C22"];
const TITLE_COLOR: &str = "#FDE047";
const SUBTITLE_COLOR: &str = "#CBD5E1";

/// Per-frame rendering switches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Outline the decoration whose editor is open.
    pub show_selection: bool,
    /// Fill the background instead of leaving it transparent.
    pub opaque_background: bool,
}

impl RenderOptions {
    /// Interactive on-screen rendering.
    pub const SCREEN: Self = Self { show_selection: true, opaque_background: false };
    /// Rendering for PNG export: no editor chrome, solid background.
    pub const EXPORT: Self = Self { show_selection: false, opaque_background: true };
}

/// Decoded images for image decorations, keyed by source.
///
/// New images get `on_load` as their load handler so the host can schedule a
/// frame once pixels arrive.
pub struct ImageCache {
    images: HashMap<String, HtmlImageElement>,
    on_load: js_sys::Function,
}

impl ImageCache {
    #[must_use]
    pub fn new(on_load: js_sys::Function) -> Self {
        Self { images: HashMap::new(), on_load }
    }

    /// The decoded image for `src`, starting a load on first sight.
    ///
    /// Returns `Ok(None)` until the image has finished decoding.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the image element cannot be created.
    pub fn get_or_load(&mut self, src: &str) -> Result<Option<&HtmlImageElement>, JsValue> {
        if !self.images.contains_key(src) {
            let img = HtmlImageElement::new()?;
            img.set_onload(Some(&self.on_load));
            img.set_src(src);
            self.images.insert(src.to_owned(), img);
        }
        Ok(self.images.get(src).filter(|img| img.complete() && img.natural_width() > 0))
    }

    /// Drop images no longer referenced by any decoration.
    pub fn retain_sources<'a>(&mut self, live: impl IntoIterator<Item = &'a str>) {
        let live: std::collections::HashSet<&str> = live.into_iter().collect();
        self.images.retain(|src, img| {
            let keep = live.contains(src.as_str());
            if !keep {
                img.set_onload(None);
            }
            keep
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Draw the full scene: tree layers, then decorations in store order.
///
/// `dpr` is the device pixel ratio of the backing store; drawing happens in
/// logical surface units.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    engine: &Engine,
    images: &mut ImageCache,
    now_ms: f64,
    dpr: f64,
    opts: RenderOptions,
) -> Result<(), JsValue> {
    let extent = engine.config.extent;
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, extent.width, extent.height);
    if opts.opaque_background {
        fill_background(ctx, extent.width, extent.height)?;
    }
    draw_scene(ctx, engine, images, now_ms, opts)
}

/// Size in logical pixels of an exported image, including title bands.
#[must_use]
pub fn export_size(scene: &Scene, extent: Extent) -> (f64, f64) {
    (extent.width, extent.height + header_height(scene))
}

/// Draw the scene for export: page background, optional title and subtitle
/// bands, then the tree without editor chrome.
///
/// The target canvas should be [`export_size`] times `pixel_ratio`.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_export(
    ctx: &CanvasRenderingContext2d,
    engine: &Engine,
    images: &mut ImageCache,
    now_ms: f64,
    pixel_ratio: f64,
) -> Result<(), JsValue> {
    let (width, height) = export_size(&engine.scene, engine.config.extent);
    ctx.set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0)?;

    fill_background(ctx, width, height)?;

    let mut y = 0.0;
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    if engine.scene.show_title {
        ctx.set_font("bold 48px sans-serif");
        ctx.set_fill_style_str(TITLE_COLOR);
        ctx.fill_text(TITLE_TEXT, width * 0.5, y + EXPORT_TITLE_BAND_PX * 0.5)?;
        y += EXPORT_TITLE_BAND_PX;
    }
    if engine.scene.show_subtitle {
        ctx.set_font("18px sans-serif");
        ctx.set_fill_style_str(SUBTITLE_COLOR);
        ctx.fill_text(SUBTITLE_TEXT, width * 0.5, y + EXPORT_SUBTITLE_BAND_PX * 0.5)?;
    }

    ctx.translate(0.0, header_height(&engine.scene))?;
    draw_scene(ctx, engine, images, now_ms, RenderOptions::EXPORT)
}

fn fill_background(ctx: &CanvasRenderingContext2d, width: f64, height: f64) -> Result<(), JsValue> {
    let bg = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
    bg.add_color_stop(0.0, EXPORT_BACKGROUND[0])?;
    bg.add_color_stop(0.5, EXPORT_BACKGROUND[1])?;
    bg.add_color_stop(1.0, EXPORT_BACKGROUND[2])?;
    ctx.set_fill_style_canvas_gradient(&bg);
    ctx.fill_rect(0.0, 0.0, width, height);
    Ok(())
}

fn header_height(scene: &Scene) -> f64 {
    let mut h = 0.0;
    if scene.show_title {
        h += EXPORT_TITLE_BAND_PX;
    }
    if scene.show_subtitle {
        h += EXPORT_SUBTITLE_BAND_PX;
    }
    h
}

fn draw_scene(
    ctx: &CanvasRenderingContext2d,
    engine: &Engine,
    images: &mut ImageCache,
    now_ms: f64,
    opts: RenderOptions,
) -> Result<(), JsValue> {
    let extent = engine.config.extent;
    let scene = &engine.scene;

    // Layer 1: backdrop glow.
    draw_glow(ctx, extent)?;

    // Layer 2: snow behind the tree.
    if scene.show_snow {
        draw_snow(ctx, extent, now_ms)?;
    }

    // Layer 3: tree body.
    for tier in tree::tiers(extent) {
        draw_tier(ctx, tier);
    }
    draw_trunk(ctx, tree::trunk(extent))?;

    // Layer 4: lights.
    if scene.show_lights {
        for (index, ornament) in ORNAMENTS.iter().enumerate() {
            draw_ornament(ctx, scene, index, ornament, extent, now_ms)?;
        }
    }

    // Layer 5: top star.
    let (star_center, star_spin) = tree::star_pose(extent, now_ms, scene.playing);
    ctx.save();
    ctx.translate(star_center.x, star_center.y)?;
    ctx.rotate(star_spin.to_radians())?;
    ctx.set_shadow_color(STAR_GLOW);
    ctx.set_shadow_blur(25.0);
    star_path(ctx, 5, STAR_OUTER_RADIUS, STAR_INNER_RADIUS);
    ctx.set_fill_style_str(STAR_FILL);
    ctx.fill();
    ctx.set_shadow_blur(0.0);
    ctx.set_stroke_style_str(STAR_STROKE);
    ctx.set_line_width(2.0);
    ctx.stroke();
    ctx.restore();

    // Layer 6: decorations in store order (bottom first).
    for dec in engine.decorations() {
        draw_decoration(ctx, dec, images)?;
    }

    // Layer 7: editor outline.
    if opts.show_selection {
        if let Some(dec) = engine.editing() {
            draw_outline(ctx, dec)?;
        }
    }

    images.retain_sources(engine.decorations().iter().filter_map(|d| match &d.content {
        Content::Image { src } => Some(src.as_str()),
        _ => None,
    }));

    Ok(())
}

// =============================================================
// Tree layers
// =============================================================

fn draw_glow(ctx: &CanvasRenderingContext2d, extent: Extent) -> Result<(), JsValue> {
    let c = extent.center();
    let radius = extent.width.max(extent.height) * 0.5;
    let glow = ctx.create_radial_gradient(c.x, c.y, 0.0, c.x, c.y, radius)?;
    glow.add_color_stop(0.0, GLOW_COLOR)?;
    glow.add_color_stop(0.7, "rgba(107, 203, 119, 0)")?;
    ctx.set_fill_style_canvas_gradient(&glow);
    ctx.fill_rect(0.0, 0.0, extent.width, extent.height);
    Ok(())
}

fn draw_snow(ctx: &CanvasRenderingContext2d, extent: Extent, now_ms: f64) -> Result<(), JsValue> {
    for flake in tree::snowflakes(extent, now_ms) {
        ctx.begin_path();
        ctx.arc(flake.center.x, flake.center.y, flake.radius, 0.0, TAU)?;
        ctx.set_fill_style_str(&format!("rgba({SNOW_COLOR}, {:.2})", flake.alpha));
        ctx.fill();
    }
    Ok(())
}

fn draw_tier(ctx: &CanvasRenderingContext2d, tier: Tier) {
    ctx.save();
    ctx.set_shadow_color(TIER_SHADOW);
    ctx.set_shadow_blur(8.0);
    ctx.set_shadow_offset_y(4.0);
    triangle_path(ctx, tier);
    ctx.set_fill_style_str(TIER_OUTER_COLOR);
    ctx.fill();
    ctx.restore();

    triangle_path(ctx, tier.inner());
    ctx.set_fill_style_str(TIER_INNER_COLOR);
    ctx.fill();
}

fn triangle_path(ctx: &CanvasRenderingContext2d, tier: Tier) {
    ctx.begin_path();
    ctx.move_to(tier.apex.x, tier.apex.y);
    ctx.line_to(tier.apex.x + tier.half_width, tier.base_y());
    ctx.line_to(tier.apex.x - tier.half_width, tier.base_y());
    ctx.close_path();
}

fn draw_trunk(ctx: &CanvasRenderingContext2d, r: Rect) -> Result<(), JsValue> {
    let grad = ctx.create_linear_gradient(r.x, 0.0, r.x + r.width, 0.0);
    grad.add_color_stop(0.0, TRUNK_EDGE_COLOR)?;
    grad.add_color_stop(0.5, TRUNK_MID_COLOR)?;
    grad.add_color_stop(1.0, TRUNK_EDGE_COLOR)?;
    ctx.save();
    ctx.set_shadow_color("rgba(0, 0, 0, 0.4)");
    ctx.set_shadow_blur(12.0);
    ctx.set_shadow_offset_y(4.0);
    ctx.set_fill_style_canvas_gradient(&grad);
    ctx.fill_rect(r.x, r.y, r.width, r.height);
    ctx.restore();
    Ok(())
}

fn draw_ornament(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    index: usize,
    ornament: &Ornament,
    extent: Extent,
    now_ms: f64,
) -> Result<(), JsValue> {
    let c = ornament.center(extent);
    let color = scene.palette.color_for(index);
    let lit = scene.is_lit(index);
    let r = ornament.size * 0.5;

    ctx.save();
    ctx.set_global_alpha(tree::twinkle(index, now_ms, scene.playing));
    ctx.set_shadow_color(color);
    ctx.set_shadow_blur(if lit { 20.0 } else { 8.0 });

    match ornament.shape {
        OrnamentShape::Ball => {
            let grad = ctx.create_radial_gradient(c.x - r * 0.4, c.y - r * 0.4, 0.0, c.x, c.y, r)?;
            if lit {
                grad.add_color_stop(0.0, &format!("{color}dd"))?;
                grad.add_color_stop(1.0, color)?;
            } else {
                grad.add_color_stop(0.0, &format!("{color}88"))?;
                grad.add_color_stop(1.0, &format!("{color}cc"))?;
            }
            ctx.begin_path();
            ctx.arc(c.x, c.y, r, 0.0, TAU)?;
            ctx.set_fill_style_canvas_gradient(&grad);
            ctx.fill();
        }
        OrnamentShape::Star => {
            ctx.translate(c.x, c.y)?;
            star_path(ctx, 4, r, r * 0.35);
            ctx.set_fill_style_str(color);
            ctx.fill();
            if lit {
                // Second pass brightens the sparkle.
                ctx.fill();
            }
        }
    }

    ctx.restore();
    Ok(())
}

fn star_path(ctx: &CanvasRenderingContext2d, points: u32, outer: f64, inner: f64) {
    let step = PI / f64::from(points);
    ctx.begin_path();
    for i in 0..points * 2 {
        let angle = step.mul_add(f64::from(i), -FRAC_PI_2);
        let r = if i % 2 == 0 { outer } else { inner };
        let (x, y) = (r * angle.cos(), r * angle.sin());
        if i == 0 {
            ctx.move_to(x, y);
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.close_path();
}

// =============================================================
// Decorations
// =============================================================

fn draw_decoration(ctx: &CanvasRenderingContext2d, dec: &Decoration, images: &mut ImageCache) -> Result<(), JsValue> {
    let (w, h) = dec.content.base_size();
    ctx.save();
    transform_to(ctx, dec)?;

    match &dec.content {
        Content::Emoji { glyph } => {
            ctx.set_font(&format!("{EMOJI_FONT_PX}px sans-serif"));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.fill_text(glyph, 0.0, 0.0)?;
        }
        Content::Text { text, style } => {
            ctx.set_font(&style.css_font());
            ctx.set_fill_style_str(&style.color);
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.fill_text(text, 0.0, 0.0)?;
        }
        Content::Image { src } => {
            if let Some(img) = images.get_or_load(src)? {
                let natural = (f64::from(img.natural_width()), f64::from(img.natural_height()));
                let fit = contain_fit(natural, (w, h));
                ctx.draw_image_with_html_image_element_and_dw_and_dh(img, fit.x, fit.y, fit.width, fit.height)?;
            }
        }
    }

    ctx.restore();
    Ok(())
}

fn draw_outline(ctx: &CanvasRenderingContext2d, dec: &Decoration) -> Result<(), JsValue> {
    let (w, h) = dec.content.base_size();
    ctx.save();
    transform_to(ctx, dec)?;
    let px = 1.0 / dec.scale;
    let pad = OUTLINE_PAD_PX * px;

    let dash = js_sys::Array::new();
    dash.push(&(OUTLINE_DASH_PX * px).into());
    dash.push(&(OUTLINE_DASH_PX * px).into());
    ctx.set_line_dash(&dash)?;
    ctx.set_stroke_style_str(OUTLINE_COLOR);
    ctx.set_line_width(1.5 * px);
    ctx.stroke_rect(-w * 0.5 - pad, -h * 0.5 - pad, w + pad * 2.0, h + pad * 2.0);
    ctx.set_line_dash(&js_sys::Array::new())?;

    ctx.restore();
    Ok(())
}

/// Translate to the decoration's center, then rotate and scale about it.
fn transform_to(ctx: &CanvasRenderingContext2d, dec: &Decoration) -> Result<(), JsValue> {
    let c = dec.center();
    ctx.translate(c.x, c.y)?;
    ctx.rotate(dec.rotation.to_radians())?;
    ctx.scale(dec.scale, dec.scale)?;
    Ok(())
}

/// Largest rect with the image's aspect ratio that fits `bounds`, centered
/// on the origin.
#[must_use]
pub fn contain_fit(natural: (f64, f64), bounds: (f64, f64)) -> Rect {
    let (nw, nh) = natural;
    let (bw, bh) = bounds;
    if nw <= 0.0 || nh <= 0.0 {
        return Rect { x: -bw * 0.5, y: -bh * 0.5, width: bw, height: bh };
    }
    let k = (bw / nw).min(bh / nh);
    let (width, height) = (nw * k, nh * k);
    Rect { x: -width * 0.5, y: -height * 0.5, width, height }
}
