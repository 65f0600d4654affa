//! Bridge to the page's MediaPipe `HandLandmarker`

use js_sys::{Array, Reflect};
use shooter_core::hand::LANDMARK_COUNT;
use shooter_core::{HandPose, LandmarkSource};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::capture::CameraFrame;

#[wasm_bindgen]
extern "C" {
    /// `HandLandmarker` from `@mediapipe/tasks-vision`, created by the page
    /// in VIDEO running mode with `numHands: 1`
    pub type HandLandmarker;

    #[wasm_bindgen(method, catch, js_name = detectForVideo)]
    fn detect_for_video(
        this: &HandLandmarker,
        frame: &HtmlCanvasElement,
        timestamp_ms: f64,
    ) -> Result<JsValue, JsValue>;
}

pub struct MediaPipeLandmarks {
    landmarker: HandLandmarker,
}

impl MediaPipeLandmarks {
    pub fn new(landmarker: HandLandmarker) -> Self {
        Self { landmarker }
    }
}

impl LandmarkSource<CameraFrame> for MediaPipeLandmarks {
    fn detect(&mut self, frame: &CameraFrame, timestamp_ms: u64) -> Option<HandPose> {
        let result = match self
            .landmarker
            .detect_for_video(&frame.canvas, timestamp_ms as f64)
        {
            Ok(result) => result,
            Err(e) => {
                log::warn!("hand detection failed: {e:?}");
                return None;
            }
        };

        match first_hand(&result) {
            Ok(pose) => pose,
            Err(e) => {
                log::warn!("unreadable landmark result: {e:?}");
                None
            }
        }
    }
}

/// `result.landmarks[0]` as a pose, or `None` when no hand was found
fn first_hand(result: &JsValue) -> Result<Option<HandPose>, JsValue> {
    let hands: Array = Reflect::get(result, &"landmarks".into())?.dyn_into()?;
    if hands.length() == 0 {
        return Ok(None);
    }
    let points: Array = hands.get(0).dyn_into()?;

    let mut flat = Vec::with_capacity(LANDMARK_COUNT * 3);
    for point in points.iter() {
        for key in ["x", "y", "z"] {
            let v = Reflect::get(&point, &key.into())?.as_f64().unwrap_or(f64::NAN);
            flat.push(v as f32);
        }
    }

    HandPose::from_flat(&flat)
        .map(Some)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
