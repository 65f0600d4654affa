//! Webcam capture through `getUserMedia`
//!
//! Opening is asynchronous in the browser. `open` hands back a stream at
//! once; it yields no frames until the camera is live and the video element
//! has data, and fails its next read if permission is refused.

use std::cell::RefCell;
use std::rc::Rc;

use shooter_core::{Capture, CaptureError, FrameStream, PlayArea};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

/// `HTMLMediaElement.HAVE_CURRENT_DATA`
const HAVE_CURRENT_DATA: u16 = 2;

/// One mirrored camera frame at play-area resolution
#[derive(Clone)]
pub struct CameraFrame {
    pub canvas: HtmlCanvasElement,
}

pub struct WebcamCapture {
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    area: PlayArea,
}

impl WebcamCapture {
    pub fn new(video: HtmlVideoElement, area: PlayArea) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(area.width as u32);
        canvas.set_height(area.height as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        Ok(Self {
            video,
            canvas,
            ctx,
            area,
        })
    }
}

/// Live media stream shared with the pending `getUserMedia` future
#[derive(Default)]
struct Slot {
    stream: Option<MediaStream>,
    failure: Option<CaptureError>,
    released: bool,
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

impl Capture for WebcamCapture {
    type Stream = WebcamStream;

    fn open(&mut self) -> Result<WebcamStream, CaptureError> {
        let devices = web_sys::window()
            .ok_or(CaptureError::Unavailable)?
            .navigator()
            .media_devices()
            .map_err(|_| CaptureError::Unavailable)?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&JsValue::TRUE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| CaptureError::Refused(format!("{e:?}")))?;

        let slot = Rc::new(RefCell::new(Slot::default()));
        let pending = slot.clone();
        let video = self.video.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = JsFuture::from(promise).await;
            let mut slot = pending.borrow_mut();
            match result {
                Ok(value) => {
                    let Ok(stream) = value.dyn_into::<MediaStream>() else {
                        slot.failure = Some(CaptureError::Unavailable);
                        return;
                    };
                    if slot.released {
                        // Stopped before the camera came up
                        stop_tracks(&stream);
                        return;
                    }
                    video.set_src_object(Some(&stream));
                    if let Err(e) = video.play() {
                        log::warn!("video play failed: {e:?}");
                    }
                    log::info!("camera open");
                    slot.stream = Some(stream);
                }
                Err(e) => {
                    log::error!("camera refused: {e:?}");
                    slot.failure = Some(CaptureError::Refused(format!("{e:?}")));
                }
            }
        });

        Ok(WebcamStream {
            slot,
            video: self.video.clone(),
            canvas: self.canvas.clone(),
            ctx: self.ctx.clone(),
            area: self.area,
        })
    }
}

pub struct WebcamStream {
    slot: Rc<RefCell<Slot>>,
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    area: PlayArea,
}

impl FrameStream for WebcamStream {
    type Frame = CameraFrame;

    fn read(&mut self) -> Result<Option<CameraFrame>, CaptureError> {
        {
            let mut slot = self.slot.borrow_mut();
            if let Some(e) = slot.failure.take() {
                return Err(e);
            }
            match &slot.stream {
                None => return Ok(None),
                Some(stream) if !stream.active() => {
                    return Err(CaptureError::Lost("all camera tracks ended".into()));
                }
                Some(_) => {}
            }
        }
        if self.video.ready_state() < HAVE_CURRENT_DATA {
            return Ok(None);
        }

        let (w, h) = (self.area.width as f64, self.area.height as f64);
        self.ctx.save();
        // Mirror horizontally so the view behaves like a mirror
        let drawn = self
            .ctx
            .translate(w, 0.0)
            .and_then(|_| self.ctx.scale(-1.0, 1.0))
            .and_then(|_| {
                self.ctx
                    .draw_image_with_html_video_element_and_dw_and_dh(&self.video, 0.0, 0.0, w, h)
            });
        self.ctx.restore();

        match drawn {
            Ok(()) => Ok(Some(CameraFrame {
                canvas: self.canvas.clone(),
            })),
            Err(e) => {
                log::debug!("frame grab failed: {e:?}");
                Ok(None)
            }
        }
    }
}

impl Drop for WebcamStream {
    fn drop(&mut self) {
        let mut slot = self.slot.borrow_mut();
        slot.released = true;
        if let Some(stream) = slot.stream.take() {
            stop_tracks(&stream);
            self.video.set_src_object(None);
            log::info!("camera released");
        }
    }
}
