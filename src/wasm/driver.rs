//! requestAnimationFrame tween driver.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use web_sys::{HtmlElement, Window};

use super::dom;
use crate::ease::Ease;
use crate::tween::{Animator, Frame, Prop, ScrollTween, TweenSpec};

struct Running {
    el: HtmlElement,
    spec: TweenSpec,
    started: f64,
    on_complete: Option<Box<dyn FnOnce()>>,
}

struct State {
    window: Window,
    tweens: Vec<Running>,
    scroll: Option<ScrollTween>,
    frame: Option<AnimationFrame>,
}

/// Cheap handle; clones drive the same set of tweens.
#[derive(Clone)]
pub(crate) struct Driver {
    state: Rc<RefCell<State>>,
}

impl Driver {
    pub(crate) fn new(window: Window) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                window,
                tweens: Vec::new(),
                scroll: None,
                frame: None,
            })),
        }
    }

    fn now(&self) -> f64 {
        let state = self.state.borrow();
        state
            .window
            .performance()
            .map(|p| p.now())
            .unwrap_or_default()
    }

    /// Where `prop` of `el` is right now: the in-flight tween's value if one
    /// moves it, else the computed opacity or the identity transform.
    fn current(&self, el: &HtmlElement, prop: Prop, now: f64) -> f64 {
        let state = self.state.borrow();
        let live = state
            .tweens
            .iter()
            .rev()
            .filter(|t| t.el.is_same_node(Some(el.as_ref())) && t.spec.touches(prop))
            .find_map(|t| t.spec.sample(now - t.started).get(prop));
        if let Some(value) = live {
            return value;
        }
        match prop {
            Prop::Opacity => state
                .window
                .get_computed_style(el)
                .ok()
                .flatten()
                .and_then(|style| style.get_property_value("opacity").ok())
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(1.0),
            Prop::Scale => 1.0,
            Prop::TranslateY => 0.0,
        }
    }

    fn schedule(&self) {
        if self.state.borrow().frame.is_some() {
            return;
        }
        let weak = Rc::downgrade(&self.state);
        let handle = request_animation_frame(move |timestamp| {
            if let Some(state) = weak.upgrade() {
                Driver { state }.tick(timestamp);
            }
        });
        self.state.borrow_mut().frame = Some(handle);
    }

    fn tick(&self, now: f64) {
        let mut finished = Vec::new();
        let more = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            state.frame.take();
            state.tweens.retain_mut(|t| {
                let elapsed = now - t.started;
                apply(&t.el, &t.spec.sample(elapsed));
                if t.spec.is_done(elapsed) {
                    if let Some(done) = t.on_complete.take() {
                        finished.push(done);
                    }
                    false
                } else {
                    true
                }
            });
            if let Some(scroll) = state.scroll {
                state.window.scroll_to_with_x_and_y(0.0, scroll.sample(now));
                if scroll.is_done(now) {
                    state.scroll = None;
                }
            }
            !state.tweens.is_empty() || state.scroll.is_some()
        };
        for done in finished {
            done();
        }
        if more {
            self.schedule();
        }
    }
}

impl Animator for Driver {
    type Target = HtmlElement;

    fn animate(
        &mut self,
        target: &HtmlElement,
        spec: TweenSpec,
        on_complete: Option<Box<dyn FnOnce()>>,
    ) {
        let started = self.now();
        let spec = spec.resolve(|prop| self.current(target, prop, started));
        apply(target, &spec.sample(0.0));
        {
            let mut state = self.state.borrow_mut();
            state.tweens.retain(|t| {
                !(t.el.is_same_node(Some(target.as_ref()))
                    && spec.motions.iter().any(|m| t.spec.touches(m.prop)))
            });
            state.tweens.push(Running {
                el: target.clone(),
                spec,
                started,
                on_complete,
            });
        }
        self.schedule();
    }

    fn animate_scroll(&mut self, offset: f64, duration_ms: f64, ease: Ease) {
        let now = self.now();
        {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            match state.scroll.as_mut() {
                Some(tween) => tween.retarget(now, offset, duration_ms, ease),
                None => {
                    let from = state.window.scroll_y().unwrap_or_default();
                    state.scroll = Some(ScrollTween::new(from, offset, now, duration_ms, ease));
                }
            }
        }
        self.schedule();
    }

    fn set_immediate(&mut self, target: &HtmlElement, frame: Frame) {
        apply(target, &frame);
    }
}

fn apply(el: &HtmlElement, frame: &Frame) {
    let style = el.style();
    if let Some(opacity) = frame.opacity {
        dom::check("tween opacity", style.set_property("opacity", &opacity.to_string()));
    }
    if let Some(transform) = frame.transform() {
        dom::check("tween transform", style.set_property("transform", &transform));
    }
}
