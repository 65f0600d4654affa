//! Browser display: WebGPU game view on black, DOM text and a 2D camera preview

use std::f64::consts::TAU;

use shooter_core::scene::{Label, Rgb};
use shooter_core::{Display, PlayArea, Scene, Shape};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use crate::capture::CameraFrame;
use crate::renderer::Renderer;

pub struct WebDisplay {
    renderer: Renderer,
    document: Document,
    hud: HtmlElement,
    overlay: HtmlElement,
    preview: CanvasRenderingContext2d,
    preview_size: (f64, f64),
    area: PlayArea,
}

impl WebDisplay {
    pub fn new(
        renderer: Renderer,
        document: Document,
        hud: HtmlElement,
        overlay: HtmlElement,
        preview_canvas: &HtmlCanvasElement,
        area: PlayArea,
    ) -> Result<Self, JsValue> {
        let preview: CanvasRenderingContext2d = preview_canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context on preview canvas"))?
            .dyn_into()?;
        let preview_size = (preview_canvas.width() as f64, preview_canvas.height() as f64);
        overlay.style().set_property("display", "none")?;

        Ok(Self {
            renderer,
            document,
            hud,
            overlay,
            preview,
            preview_size,
            area,
        })
    }

    fn show_text(&self, scene: &Scene) -> Result<(), JsValue> {
        write_labels(&self.document, &self.hud, &scene.hud)?;
        match &scene.game_over {
            Some(over) => {
                write_labels(
                    &self.document,
                    &self.overlay,
                    &[over.title.clone(), over.detail.clone()],
                )?;
                self.overlay.style().set_property("display", "block")
            }
            None => self.overlay.style().set_property("display", "none"),
        }
    }

    fn draw_preview(&self, frame: &CameraFrame, preview: &[Shape]) -> Result<(), JsValue> {
        let (pw, ph) = self.preview_size;
        let ctx = &self.preview;
        ctx.draw_image_with_html_canvas_element_and_dw_and_dh(&frame.canvas, 0.0, 0.0, pw, ph)?;

        let sx = pw / self.area.width as f64;
        let sy = ph / self.area.height as f64;
        for shape in preview {
            match *shape {
                Shape::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    ctx.begin_path();
                    ctx.move_to(from.x as f64 * sx, from.y as f64 * sy);
                    ctx.line_to(to.x as f64 * sx, to.y as f64 * sy);
                    ctx.set_line_width(width as f64);
                    ctx.set_stroke_style_str(&css(color));
                    ctx.stroke();
                }
                Shape::Disc {
                    center,
                    radius,
                    color,
                } => {
                    ctx.begin_path();
                    ctx.arc(center.x as f64 * sx, center.y as f64 * sy, radius as f64, 0.0, TAU)?;
                    ctx.set_fill_style_str(&css(color));
                    ctx.fill();
                }
                Shape::Ring {
                    center,
                    radius,
                    width,
                    color,
                } => {
                    ctx.begin_path();
                    ctx.arc(center.x as f64 * sx, center.y as f64 * sy, radius as f64, 0.0, TAU)?;
                    ctx.set_line_width(width as f64);
                    ctx.set_stroke_style_str(&css(color));
                    ctx.stroke();
                }
            }
        }
        Ok(())
    }
}

impl Display<CameraFrame> for WebDisplay {
    fn present(&mut self, scene: &Scene, frame: Option<&CameraFrame>, preview: &[Shape]) {
        if let Err(e) = self.renderer.draw(scene) {
            log::error!("render failed: {e}");
        }
        if let Err(e) = self.show_text(scene) {
            log::error!("hud update failed: {e:?}");
        }
        // Without a frame the preview keeps its last picture
        if let Some(frame) = frame {
            if let Err(e) = self.draw_preview(frame, preview) {
                log::error!("preview failed: {e:?}");
            }
        }
    }
}

fn css(color: Rgb) -> String {
    format!("rgb({}, {}, {})", color[0], color[1], color[2])
}

/// One child element per label, reused across ticks
fn write_labels(document: &Document, container: &HtmlElement, labels: &[Label]) -> Result<(), JsValue> {
    while container.child_element_count() < labels.len() as u32 {
        container.append_child(&document.create_element("div")?)?;
    }
    while container.child_element_count() > labels.len() as u32 {
        if let Some(last) = container.last_element_child() {
            last.remove();
        }
    }

    let children = container.children();
    for (i, label) in labels.iter().enumerate() {
        let Some(child) = children.item(i as u32) else {
            continue;
        };
        let child: HtmlElement = child.dyn_into()?;
        child.set_text_content(Some(&label.text));
        child.style().set_property("color", &css(label.color))?;
    }
    Ok(())
}
