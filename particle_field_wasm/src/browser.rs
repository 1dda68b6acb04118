use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, MouseEvent, Window};

use crate::scheduler::{FrameError, FrameScheduler};

pub type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame`-backed scheduler. The callback lives in a shared
/// slot because it has to be installed after the state it drives exists.
pub struct BrowserFrames {
    window: Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl BrowserFrames {
    pub fn new(window: Window) -> Self {
        BrowserFrames {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    pub fn callback_slot(&self) -> Rc<RefCell<Option<FrameCallback>>> {
        self.callback.clone()
    }
}

impl FrameScheduler for BrowserFrames {
    type Handle = i32;

    fn request(&mut self) -> Result<i32, FrameError> {
        let callback = self.callback.borrow();
        let callback = callback.as_ref().ok_or(FrameError::CallbackMissing)?;

        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|err| FrameError::Request(format!("{:?}", err)))
    }

    fn cancel(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            warn!("Could not cancel animation frame {}: {:?}", handle, err);
        }
    }
}

/// Current `innerWidth`, `innerHeight` and `devicePixelRatio`.
pub fn viewport_metrics(window: &Window) -> (f32, f32, f32) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);

    (width as f32, height as f32, window.device_pixel_ratio() as f32)
}

pub fn pointer_position(event: &MouseEvent) -> Vec2 {
    Vec2::new(event.client_x() as f32, event.client_y() as f32)
}

/// An event listener that is removed from its target when dropped.
pub struct Listener<T: ?Sized> {
    target: EventTarget,
    event: &'static str,
    callback: Closure<T>,
}

impl<T: ?Sized + 'static> Listener<T> {
    pub fn attach(target: &EventTarget, event: &'static str, callback: Closure<T>) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        debug!("Listening for '{}'", event);

        Ok(Listener {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl<T: ?Sized> Drop for Listener<T> {
    fn drop(&mut self) {
        let removed = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());

        if let Err(err) = removed {
            warn!("Could not remove '{}' listener: {:?}", self.event, err);
        }
    }
}

/// Resize and pointer listeners feeding a shared piece of state.
///
/// Closures hold only weak references so that dropping the owner frees the
/// state even while the browser still references a callback.
pub struct ViewportListeners {
    _resize: Listener<dyn FnMut()>,
    _pointer_move: Listener<dyn FnMut(MouseEvent)>,
    _pointer_leave: Listener<dyn FnMut()>,
}

impl ViewportListeners {
    pub fn attach<S, OnResize, OnMove, OnLeave>(
        window: &Window,
        root: &Element,
        state: Weak<RefCell<S>>,
        on_resize: OnResize,
        on_move: OnMove,
        on_leave: OnLeave,
    ) -> Result<Self, JsValue>
    where
        S: 'static,
        OnResize: Fn(&mut S, &Window) + 'static,
        OnMove: Fn(&mut S, Vec2) + 'static,
        OnLeave: Fn(&mut S) + 'static,
    {
        let resize = {
            let state = state.clone();
            let window = window.clone();

            Closure::wrap(Box::new(move || {
                if let Some(state) = state.upgrade() {
                    on_resize(&mut *state.borrow_mut(), &window);
                }
            }) as Box<dyn FnMut()>)
        };

        let pointer_move = {
            let state = state.clone();

            Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Some(state) = state.upgrade() {
                    on_move(&mut *state.borrow_mut(), pointer_position(&event));
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        let pointer_leave = Closure::wrap(Box::new(move || {
            if let Some(state) = state.upgrade() {
                on_leave(&mut *state.borrow_mut());
            }
        }) as Box<dyn FnMut()>);

        Ok(ViewportListeners {
            _resize: Listener::attach(window, "resize", resize)?,
            _pointer_move: Listener::attach(window, "mousemove", pointer_move)?,
            _pointer_leave: Listener::attach(root, "mouseleave", pointer_leave)?,
        })
    }
}
