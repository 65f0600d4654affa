//! wasm-bindgen surface: one global client driven by the page's buttons and
//! a `setInterval` ticker

use std::cell::RefCell;

use log::LevelFilter;
use shooter_core::{Config, GameSession, PlayArea, SessionAction, TickOutcome};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement, HtmlVideoElement};

use crate::capture::WebcamCapture;
use crate::display::WebDisplay;
use crate::landmarks::{HandLandmarker, MediaPipeLandmarks};
use crate::logger;
use crate::renderer::Renderer;

type Session = GameSession<WebcamCapture, MediaPipeLandmarks>;

/// Live `setInterval` registration; the closure must outlive the interval
struct Ticker {
    id: i32,
    active: bool,
    _callback: Closure<dyn FnMut()>,
}

/// Main client state
pub struct GameClient {
    session: Session,
    display: WebDisplay,
    ticker: Option<Ticker>,
}

thread_local! {
    static CLIENT: RefCell<Option<GameClient>> = const { RefCell::new(None) };
}

fn now_secs() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

impl GameClient {
    async fn new(
        game_canvas: HtmlCanvasElement,
        preview_canvas: HtmlCanvasElement,
        video: HtmlVideoElement,
        hud: HtmlElement,
        overlay: HtmlElement,
        landmarker: HandLandmarker,
        config: Config,
    ) -> Result<Self, JsValue> {
        let area = PlayArea::from(&config);
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        game_canvas.set_width(area.width as u32);
        game_canvas.set_height(area.height as u32);
        let renderer = Renderer::new(game_canvas, area.width as u32, area.height as u32)
            .await
            .map_err(|e| JsValue::from_str(&e))?;
        let display = WebDisplay::new(renderer, document, hud, overlay, &preview_canvas, area)?;

        let capture = WebcamCapture::new(video, area)?;
        let session = GameSession::new(config, capture, MediaPipeLandmarks::new(landmarker))
            .map_err(to_js)?;

        Ok(Self {
            session,
            display,
            ticker: None,
        })
    }

    fn tick(&mut self) {
        match self.session.tick(now_secs(), &mut self.display) {
            TickOutcome::Finished { .. } | TickOutcome::CaptureLost { .. } => self.pause_ticker(),
            TickOutcome::Idle | TickOutcome::NoFrame | TickOutcome::Running { .. } => {}
        }
    }

    /// Stop the interval but keep its closure; this may run inside that closure
    fn pause_ticker(&mut self) {
        if let Some(ticker) = self.ticker.as_mut() {
            if ticker.active {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(ticker.id);
                }
                ticker.active = false;
            }
        }
    }

    fn schedule(&mut self) -> Result<(), JsValue> {
        self.pause_ticker();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback = Closure::<dyn FnMut()>::new(|| {
            CLIENT.with(|client| {
                if let Ok(mut client) = client.try_borrow_mut() {
                    if let Some(client) = client.as_mut() {
                        client.tick();
                    }
                }
            });
        });
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            self.session.config().tick_ms as i32,
        )?;

        self.ticker = Some(Ticker {
            id,
            active: true,
            _callback: callback,
        });
        Ok(())
    }

    fn start(&mut self) -> Result<(), JsValue> {
        self.session.start(now_secs()).map_err(to_js)?;
        self.schedule()
    }

    fn restart(&mut self) -> Result<(), JsValue> {
        self.session.restart(now_secs()).map_err(to_js)?;
        self.schedule()
    }

    fn stop(&mut self) -> Result<(), JsValue> {
        self.pause_ticker();
        self.ticker = None;
        self.session.stop().map_err(to_js)
    }
}

fn with_client<T>(f: impl FnOnce(&mut GameClient) -> Result<T, JsValue>) -> Result<T, JsValue> {
    CLIENT.with(|client| match client.borrow_mut().as_mut() {
        Some(client) => f(client),
        None => Err(JsValue::from_str("Client not initialized")),
    })
}

/// Called automatically when the WASM module loads
#[wasm_bindgen(start)]
pub fn init_runtime() {
    console_error_panic_hook::set_once();
    logger::init(LevelFilter::Info);
}

/// Build the client. `config_json` holds optional overrides of the defaults.
#[wasm_bindgen]
pub fn init_client(
    game_canvas: HtmlCanvasElement,
    preview_canvas: HtmlCanvasElement,
    video: HtmlVideoElement,
    hud: HtmlElement,
    overlay: HtmlElement,
    landmarker: HandLandmarker,
    config_json: Option<String>,
) -> js_sys::Promise {
    wasm_bindgen_futures::future_to_promise(async move {
        let config = match config_json.as_deref() {
            Some(json) => Config::from_json(json).map_err(to_js)?,
            None => Config::default(),
        };
        let client = GameClient::new(
            game_canvas,
            preview_canvas,
            video,
            hud,
            overlay,
            landmarker,
            config,
        )
        .await?;

        CLIENT.with(|slot| *slot.borrow_mut() = Some(client));
        log::info!("client ready");
        Ok(JsValue::UNDEFINED)
    })
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    with_client(GameClient::start)
}

#[wasm_bindgen]
pub fn restart_game() -> Result<(), JsValue> {
    with_client(GameClient::restart)
}

#[wasm_bindgen]
pub fn stop_game() -> Result<(), JsValue> {
    with_client(GameClient::stop)
}

/// Apply an action by name: "START", "RESTART" or "STOP"
#[wasm_bindgen]
pub fn dispatch(action: &str) -> Result<(), JsValue> {
    match SessionAction::parse(action) {
        Some(SessionAction::Start) => start_game(),
        Some(SessionAction::Restart) => restart_game(),
        Some(SessionAction::Stop) => stop_game(),
        Some(SessionAction::Expire) | None => {
            Err(JsValue::from_str(&format!("unknown action {action:?}")))
        }
    }
}

/// Session state name for the page: "NotStarted", "Running" or "Over"
#[wasm_bindgen]
pub fn game_state() -> Result<String, JsValue> {
    with_client(|client| Ok(format!("{:?}", client.session.state())))
}

#[wasm_bindgen]
pub fn game_score() -> Result<u32, JsValue> {
    with_client(|client| Ok(client.session.score()))
}
