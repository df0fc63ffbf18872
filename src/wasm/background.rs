
use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext as GL, Window};

use super::dom;
use crate::error::UiError;

/// Keeps the resize listener and the frame loop alive.
pub(crate) struct Background {
    _resize: EventListener,
    _frame: Rc<RefCell<Option<AnimationFrame>>>,
}

/// Start the decorative canvas: fit it to the window and run a slow ambient
/// colour drift behind the page.
pub(crate) fn start(canvas: &HtmlCanvasElement, window: &Window) -> Result<Background, UiError> {
    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or(UiError::MissingElement("webgl2 context"))?
        .dyn_into()
        .map_err(|_| UiError::Js("context is not WebGL2".into()))?;

    fit(canvas, window);
    let resize = {
        let canvas = canvas.clone();
        let win = window.clone();
        EventListener::new(window, "resize", move |_| fit(&canvas, &win))
    };

    let frame = Rc::new(RefCell::new(None));
    schedule(Rc::clone(&frame), Rc::new(gl));

    Ok(Background {
        _resize: resize,
        _frame: frame,
    })
}

/// Hide the canvas after a failed start so the page renders without it.
pub(crate) fn hide(canvas: &HtmlCanvasElement) {
    dom::check("hide background", canvas.style().set_property("display", "none"));
}

fn fit(canvas: &HtmlCanvasElement, window: &Window) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let ratio = window.device_pixel_ratio().max(1.0);
    canvas.set_width((w * ratio) as u32);
    canvas.set_height((h * ratio) as u32);
}

fn schedule(slot: Rc<RefCell<Option<AnimationFrame>>>, gl: Rc<GL>) {
    let next = Rc::clone(&slot);
    let handle = request_animation_frame(move |timestamp| {
        draw(&gl, timestamp);
        schedule(next, gl);
    });
    *slot.borrow_mut() = Some(handle);
}

fn draw(gl: &GL, timestamp: f64) {
    // drift between deep navy and a faint indigo
    let t = ((timestamp * 0.0003).sin() * 0.5 + 0.5) as f32;
    gl.clear_color(0.03 + 0.05 * t, 0.04 + 0.05 * t, 0.12 + 0.2 * t, 0.35);
    gl.clear(GL::COLOR_BUFFER_BIT);
}
