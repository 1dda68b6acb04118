use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Context};
use js_sys::{Array, Float32Array, Function};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use web_sys::{window, Element, HtmlCanvasElement, HtmlElement, Window};

use crate::background::Background;
use crate::browser::{viewport_metrics, BrowserFrames, FrameCallback, Listener, ViewportListeners};
use crate::canvas::{CanvasSurface, SurfaceError};
use crate::config::FieldConfig;
use crate::scroll_spy;
use crate::theme::{Theme, DARK_CLASS};
use crate::viewport::Viewport;

type BrowserBackground = Background<CanvasSurface, BrowserFrames, StdRng>;

fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

fn browser_window() -> anyhow::Result<Window> {
    window().ok_or_else(|| anyhow!(SurfaceError::NoWindow))
}

fn document_root(window: &Window) -> anyhow::Result<Element> {
    window
        .document()
        .and_then(|document| document.document_element())
        .ok_or_else(|| anyhow!("the page has no document element"))
}

/// Decorative particle layer mounted on a host-provided canvas.
#[wasm_bindgen]
pub struct ParticleBackground {
    state: Rc<RefCell<BrowserBackground>>,
    frame_callback: Rc<RefCell<Option<FrameCallback>>>,
    window: Window,
    root: Element,
    listeners: Option<ViewportListeners>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Takes over `canvas` as the background layer. Throws when the canvas
    /// cannot provide a 2d context so the page can go without the layer.
    #[wasm_bindgen]
    pub fn mount(canvas: HtmlCanvasElement, enabled: Option<bool>) -> Result<ParticleBackground, JsValue> {
        ParticleBackground::create(canvas, enabled.unwrap_or(true)).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = "setEnabled")]
    pub fn set_enabled(&mut self, enabled: bool) -> Result<(), JsValue> {
        if enabled == self.state.borrow().is_enabled() {
            return Ok(());
        }

        if enabled {
            self.listen().map_err(to_js_error)?;

            let (width, height, pixel_ratio) = viewport_metrics(&self.window);
            let mut state = self.state.borrow_mut();
            let viewport = state.viewport(width, height, pixel_ratio);
            state.resize(viewport);
            state.set_enabled(true);
            Ok(())
        } else {
            self.shut_down();
            Ok(())
        }
    }

    #[wasm_bindgen(js_name = "isEnabled")]
    pub fn is_enabled(&self) -> bool {
        self.state.borrow().is_enabled()
    }

    #[wasm_bindgen(js_name = "isScheduled")]
    pub fn is_scheduled(&self) -> bool {
        self.state.borrow().is_scheduled()
    }

    #[wasm_bindgen(js_name = "particleCount")]
    pub fn particle_count(&self) -> usize {
        self.state.borrow().field().particles().len()
    }

    /// Copy of the particle state as `[x, y, vx, vy, ...]`.
    #[wasm_bindgen(js_name = "particleData")]
    pub fn particle_data(&self) -> Float32Array {
        let state = self.state.borrow();
        let data: &[f32] = bytemuck::cast_slice(state.field().particles());

        Float32Array::from(data)
    }

    /// Stops the layer and releases every browser resource it holds.
    pub fn destroy(self) {}
}

impl ParticleBackground {
    fn create(canvas: HtmlCanvasElement, enabled: bool) -> anyhow::Result<ParticleBackground> {
        let window = browser_window()?;
        let root = document_root(&window)?;
        let surface = CanvasSurface::new(canvas).context("could not acquire the background canvas")?;

        let config = FieldConfig::default();
        let (width, height, pixel_ratio) = viewport_metrics(&window);
        let viewport = Viewport::new(width, height, pixel_ratio, &config);

        let frames = BrowserFrames::new(window.clone());
        let frame_callback = frames.callback_slot();

        let state = Rc::new(RefCell::new(Background::new(
            surface,
            frames,
            viewport,
            config,
            StdRng::from_entropy(),
            enabled,
        )));

        {
            let state = Rc::downgrade(&state);

            *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
                if let Some(state) = state.upgrade() {
                    state.borrow_mut().on_frame();
                }
            }) as Box<dyn FnMut(f64)>));
        }

        let mut background = ParticleBackground {
            state,
            frame_callback,
            window,
            root,
            listeners: None,
        };

        if enabled {
            background.listen()?;
            background.state.borrow_mut().start();
        }

        info!("Particle background mounted (enabled: {})", enabled);
        Ok(background)
    }

    fn listen(&mut self) -> anyhow::Result<()> {
        if self.listeners.is_some() {
            return Ok(());
        }

        let listeners = ViewportListeners::attach(
            &self.window,
            &self.root,
            Rc::downgrade(&self.state),
            |background: &mut BrowserBackground, window: &Window| {
                let (width, height, pixel_ratio) = viewport_metrics(window);
                let viewport = background.viewport(width, height, pixel_ratio);
                background.resize(viewport);
            },
            |background: &mut BrowserBackground, position| background.pointer_moved(position),
            |background: &mut BrowserBackground| background.pointer_left(),
        )
        .map_err(|err| anyhow!("could not register listeners: {:?}", err))?;

        self.listeners = Some(listeners);
        Ok(())
    }

    /// Cancels the pending frame, then drops the listeners.
    fn shut_down(&mut self) {
        {
            let mut state = self.state.borrow_mut();
            state.stop();
            state.pointer_left();
        }

        self.listeners = None;
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.shut_down();
        self.frame_callback.borrow_mut().take();
    }
}

/// Navigation highlighter following `window.scrollY`.
#[wasm_bindgen]
pub struct ScrollSpy {
    state: Rc<RefCell<ScrollSpyState>>,
    _listener: Listener<dyn FnMut()>,
}

struct ScrollSpyState {
    spy: scroll_spy::ScrollSpy,
    window: Window,
    on_change: Option<Function>,
}

impl ScrollSpyState {
    /// Re-evaluates the active section. Returns the host callback and the new
    /// id when it changed, so the caller can notify after releasing the state.
    fn refresh(&mut self) -> Option<(Function, String)> {
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let document = self.window.document();

        let changed = self.spy.update(scroll_y, |id| {
            document
                .as_ref()
                .and_then(|document| document.get_element_by_id(id))
                .and_then(|element| element.dyn_into::<HtmlElement>().ok())
                .map(|element| element.offset_top() as f64)
        });

        if !changed {
            return None;
        }

        let callback = self.on_change.clone()?;
        let id = self.spy.active_id()?.to_owned();
        Some((callback, id))
    }
}

/// The callback may read the spy back, so it runs with the state unborrowed.
fn refresh_and_notify(state: &RefCell<ScrollSpyState>) {
    let notification = state.borrow_mut().refresh();

    if let Some((callback, id)) = notification {
        if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&id)) {
            error!("Scroll spy callback failed: {:?}", err);
        }
    }
}

#[wasm_bindgen]
impl ScrollSpy {
    /// Tracks the sections named by `ids` (in page order). `offset` defaults to 100px.
    #[wasm_bindgen(constructor)]
    pub fn new(ids: Array, offset: Option<f64>, on_change: Option<Function>) -> Result<ScrollSpy, JsValue> {
        let window = browser_window().map_err(to_js_error)?;
        let ids = ids.iter().filter_map(|id| id.as_string()).collect();

        let state = Rc::new(RefCell::new(ScrollSpyState {
            spy: scroll_spy::ScrollSpy::new(ids, offset.unwrap_or(scroll_spy::DEFAULT_OFFSET)),
            window: window.clone(),
            on_change,
        }));

        refresh_and_notify(&state);

        let handler = {
            let state = Rc::downgrade(&state);

            Closure::wrap(Box::new(move || {
                if let Some(state) = state.upgrade() {
                    refresh_and_notify(&state);
                }
            }) as Box<dyn FnMut()>)
        };

        let listener = Listener::attach(&window, "scroll", handler)?;

        Ok(ScrollSpy {
            state,
            _listener: listener,
        })
    }

    #[wasm_bindgen(js_name = "activeId")]
    pub fn active_id(&self) -> Option<String> {
        self.state.borrow().spy.active_id().map(str::to_owned)
    }

    /// Removes the scroll listener.
    pub fn destroy(self) {}
}

/// Applies the theme to the document root by toggling its `dark` class.
#[wasm_bindgen(js_name = "applyTheme")]
pub fn apply_theme(dark: bool) -> Result<(), JsValue> {
    let root = browser_window().and_then(|window| document_root(&window)).map_err(to_js_error)?;
    let theme = Theme::from_dark(dark);

    root.class_list().toggle_with_force(DARK_CLASS, theme.is_dark())?;
    Ok(())
}

/// Flips the theme currently applied to the document root and returns whether
/// the page is now dark.
#[wasm_bindgen(js_name = "toggleTheme")]
pub fn toggle_theme() -> Result<bool, JsValue> {
    let root = browser_window().and_then(|window| document_root(&window)).map_err(to_js_error)?;
    let theme = Theme::from_dark(root.class_list().contains(DARK_CLASS)).toggled();

    root.class_list().toggle_with_force(DARK_CLASS, theme.is_dark())?;
    Ok(theme.is_dark())
}

#[wasm_bindgen(js_name = "themeToggleLabel")]
pub fn theme_toggle_label(dark: bool) -> String {
    Theme::from_dark(dark).toggle_label().to_owned()
}
