//! Browser glue: DOM lookup, event listeners, pointer lock and the stats timer.
//!
//! All game state lives in one `App` behind `Rc<RefCell<_>>`; every listener
//! closure holds a clone and forwards the event to the controller, then carries
//! out the returned effects.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, Event, EventTarget, HtmlCanvasElement,
    HtmlElement, HtmlInputElement, HtmlSelectElement, MouseEvent, window,
};

use crate::config::GameConfig;
use crate::controller::{Controller, Effect, InputMode, dot_size_highlight};
use crate::error::{Error, Result};
use crate::render::{CanvasSurface, draw_scene};

const CANVAS_ID: &str = "gameCanvas";
const START_ID: &str = "startButton";
const RESET_ID: &str = "resetButton";
const TIMER_ID: &str = "timer";
const ACCURACY_ID: &str = "accuracy";
const COUNTER_ID: &str = "counter";
const GAME_SELECT_ID: &str = "gameSelect";
const DPI_ID: &str = "dpiInput";
const SENSITIVITY_ID: &str = "sensitivityInput";
const APPLY_ID: &str = "applySettings";
const DOT_SIZE_SELECTOR: &str = ".dotSizeOption";
const ACTIVE_CLASS: &str = "active";

type SharedApp = Rc<RefCell<App>>;

struct Overlays {
    timer: Element,
    accuracy: Element,
    counter: Element,
}

struct SettingsPanel {
    game: HtmlSelectElement,
    dpi: HtmlInputElement,
    sensitivity: HtmlInputElement,
    apply: HtmlElement,
}

struct IntervalTimer {
    handle: i32,
    _tick: Closure<dyn FnMut()>,
}

struct App {
    controller: Controller<StdRng>,
    surface: CanvasSurface,
    document: Document,
    reset_button: HtmlElement,
    overlays: Overlays,
    dot_sizes: Vec<(f64, Element)>,
    timer: Option<IntervalTimer>,
    weak_self: Weak<RefCell<App>>,
}

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

pub fn mount(mode: InputMode, config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let controller = Controller::new(config, mode, StdRng::from_entropy())?;
    let canvas = ensure_canvas(&doc, controller.config())?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| Error::Dom("2d context unavailable".into()))?
        .dyn_into()?;

    let start_button = ensure_button(&doc, START_ID, "Start")?;
    let reset_button = ensure_button(&doc, RESET_ID, "Reset")?;
    let overlays = Overlays {
        timer: ensure_overlay(&doc, TIMER_ID)?,
        accuracy: ensure_overlay(&doc, ACCURACY_ID)?,
        counter: ensure_overlay(&doc, COUNTER_ID)?,
    };
    let dot_sizes = dot_size_options(&doc, controller.config())?;
    let settings = match mode {
        InputMode::CapturedPointer => settings_panel(&doc),
        InputMode::DirectClick => None,
    };
    let initial_radius = controller.config().dot_radius;

    let app: SharedApp = Rc::new_cyclic(|weak| {
        RefCell::new(App {
            controller,
            surface: CanvasSurface::new(canvas.clone(), ctx),
            document: doc.clone(),
            reset_button,
            overlays,
            dot_sizes: dot_sizes.clone(),
            timer: None,
            weak_self: weak.clone(),
        })
    });
    app.borrow_mut().apply(vec![
        Effect::Redraw,
        Effect::RefreshStats,
        Effect::HighlightDotSize(initial_radius),
    ]);

    listen_mouse(&start_button, "click", &app, |app, _| {
        let fx = app.controller.start(performance_now());
        app.apply(fx);
    })?;
    {
        let reset_button = app.borrow().reset_button.clone();
        listen_mouse(&reset_button, "click", &app, |app, _| {
            let fx = app.controller.reset();
            app.apply(fx);
        })?;
    }
    listen_mouse(&canvas, "click", &app, |app, evt| {
        let fx = app.controller.click(
            evt.offset_x() as f64,
            evt.offset_y() as f64,
            performance_now(),
        );
        app.apply(fx);
    })?;
    for (radius, el) in dot_sizes {
        listen_mouse(&el, "click", &app, move |app, _| {
            match app.controller.select_dot_size(radius) {
                Ok(fx) => app.apply(fx),
                Err(err) => log::warn!("dot size rejected: {err}"),
            }
        })?;
    }

    if mode == InputMode::CapturedPointer {
        listen_mouse(&doc, "mousemove", &app, |app, evt| {
            let fx = app
                .controller
                .pointer_motion(evt.movement_x() as f64, evt.movement_y() as f64);
            app.apply(fx);
        })?;
        listen_event(&doc, "pointerlockchange", &app, |app, _| {
            let captured = app
                .document
                .pointer_lock_element()
                .map(|el| el.id() == CANVAS_ID)
                .unwrap_or(false);
            let fx = app.controller.pointer_capture_changed(captured);
            app.apply(fx);
        })?;
        if let Some(panel) = settings {
            let apply = panel.apply.clone();
            listen_mouse(&apply, "click", &app, move |app, _| {
                let fx = app.controller.apply_settings(
                    &panel.game.value(),
                    &panel.dpi.value(),
                    &panel.sensitivity.value(),
                );
                app.apply(fx);
            })?;
        } else {
            log::info!("no settings panel on page; sensitivity stays at 1.0");
        }
    }

    log::info!("aim trainer mounted in {mode:?} mode");
    Ok(())
}

impl App {
    fn apply(&mut self, effects: Vec<Effect>) {
        let now = performance_now();
        for effect in effects {
            let outcome = match effect {
                Effect::Redraw => draw_scene(&mut self.surface, &self.controller),
                Effect::RefreshStats => {
                    self.refresh_stats(now);
                    Ok(())
                }
                Effect::StartTimer => self.start_timer(),
                Effect::StopTimer => {
                    self.stop_timer();
                    Ok(())
                }
                Effect::RequestPointerCapture => {
                    self.surface.canvas().request_pointer_lock();
                    Ok(())
                }
                Effect::ReleasePointerCapture => {
                    self.document.exit_pointer_lock();
                    Ok(())
                }
                Effect::ShowResetControl(show) => set_visible(&self.reset_button, show),
                Effect::HighlightDotSize(radius) => self.highlight_dot_size(radius),
                Effect::Notify(message) => notify(&message),
            };
            if let Err(err) = outcome {
                log::error!("effect failed: {err}");
            }
        }
    }

    fn refresh_stats(&self, now: f64) {
        let text = self.controller.stats(now);
        self.overlays.timer.set_text_content(Some(&text.timer));
        self.overlays.accuracy.set_text_content(Some(&text.accuracy));
        self.overlays.counter.set_text_content(Some(&text.counter));
    }

    fn refresh_timer(&self, now: f64) {
        let text = self.controller.stats(now);
        self.overlays.timer.set_text_content(Some(&text.timer));
    }

    fn start_timer(&mut self) -> Result<()> {
        self.stop_timer();
        let weak = self.weak_self.clone();
        let tick = Closure::wrap(Box::new(move || {
            let Some(app) = weak.upgrade() else {
                return;
            };
            if let Ok(app) = app.try_borrow() {
                app.refresh_timer(performance_now());
            };
        }) as Box<dyn FnMut()>);
        let period = i32::try_from(self.controller.config().timer_refresh_ms).map_err(|_| {
            Error::OutOfRange {
                field: "timer_refresh_ms",
                value: self.controller.config().timer_refresh_ms as f64,
            }
        })?;
        let win = window().ok_or_else(|| Error::Dom("no window".into()))?;
        let handle = win
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                period,
            )
            .map_err(Error::from_js)?;
        self.timer = Some(IntervalTimer {
            handle,
            _tick: tick,
        });
        Ok(())
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            if let Some(win) = window() {
                win.clear_interval_with_handle(timer.handle);
            }
        }
    }

    fn highlight_dot_size(&self, radius: f64) -> Result<()> {
        let sizes: Vec<f64> = self.dot_sizes.iter().map(|(size, _)| *size).collect();
        let flags = dot_size_highlight(&sizes, radius);
        for ((_, el), active) in self.dot_sizes.iter().zip(flags) {
            let classes = el.class_list();
            if active {
                classes.add_1(ACTIVE_CLASS).map_err(Error::from_js)?;
            } else {
                classes.remove_1(ACTIVE_CLASS).map_err(Error::from_js)?;
            }
        }
        Ok(())
    }
}

// --- Listener helpers --------------------------------------------------------

fn listen_mouse(
    target: &EventTarget,
    event: &str,
    app: &SharedApp,
    handler: impl Fn(&mut App, MouseEvent) + 'static,
) -> Result<(), JsValue> {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
        match app.try_borrow_mut() {
            Ok(mut state) => handler(&mut state, evt),
            Err(_) => log::debug!("event dropped: app busy"),
        }
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn listen_event(
    target: &EventTarget,
    event: &str,
    app: &SharedApp,
    handler: impl Fn(&mut App, Event) + 'static,
) -> Result<(), JsValue> {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |evt: Event| match app.try_borrow_mut() {
        Ok(mut state) => handler(&mut state, evt),
        Err(_) => log::debug!("event dropped: app busy"),
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// --- DOM lookup / creation ---------------------------------------------------

fn find<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id).and_then(|el| el.dyn_into::<T>().ok())
}

fn body(doc: &Document) -> Result<HtmlElement, JsValue> {
    doc.body()
        .ok_or_else(|| Error::MissingElement("body").into())
}

fn ensure_canvas(doc: &Document, config: &GameConfig) -> Result<HtmlCanvasElement, JsValue> {
    let canvas: HtmlCanvasElement = match find(doc, CANVAS_ID) {
        Some(c) => c,
        None => {
            let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
            c.set_id(CANVAS_ID);
            c.set_attribute("style", "border:1px solid #222; background:#fff;")
                .ok();
            body(doc)?.append_child(&c)?;
            c
        }
    };
    // Drawable area and hit-test space must agree.
    canvas.set_width(config.width as u32);
    canvas.set_height(config.height as u32);
    Ok(canvas)
}

fn ensure_button(doc: &Document, id: &str, label: &str) -> Result<HtmlElement, JsValue> {
    if let Some(el) = find(doc, id) {
        return Ok(el);
    }
    let button: HtmlElement = doc.create_element("button")?.dyn_into()?;
    button.set_id(id);
    button.set_text_content(Some(label));
    body(doc)?.append_child(&button)?;
    Ok(button)
}

fn ensure_overlay(doc: &Document, id: &str) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let div = doc.create_element("div")?;
    div.set_id(id);
    div.set_attribute("style", "font-family:'Fira Code', monospace; font-size:15px;")
        .ok();
    body(doc)?.append_child(&div)?;
    Ok(div)
}

/// Selectable radii come from the page's `data-size` attributes; when the
/// page has none, buttons are created from the config.
fn dot_size_options(doc: &Document, config: &GameConfig) -> Result<Vec<(f64, Element)>, JsValue> {
    let nodes = doc.query_selector_all(DOT_SIZE_SELECTOR)?;
    let mut options = Vec::new();
    for i in 0..nodes.length() {
        let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        match el
            .get_attribute("data-size")
            .and_then(|s| s.trim().parse::<f64>().ok())
        {
            Some(size) => options.push((size, el)),
            None => log::warn!("{DOT_SIZE_SELECTOR} element without a numeric data-size"),
        }
    }
    if !options.is_empty() {
        return Ok(options);
    }

    let container = doc.create_element("div")?;
    for &size in &config.dot_sizes {
        let button = doc.create_element("button")?;
        button.set_class_name("dotSizeOption");
        button.set_attribute("data-size", &size.to_string())?;
        button.set_text_content(Some(&format!("{size}px")));
        container.append_child(&button)?;
        options.push((size, button));
    }
    body(doc)?.append_child(&container)?;
    Ok(options)
}

fn settings_panel(doc: &Document) -> Option<SettingsPanel> {
    Some(SettingsPanel {
        game: find(doc, GAME_SELECT_ID)?,
        dpi: find(doc, DPI_ID)?,
        sensitivity: find(doc, SENSITIVITY_ID)?,
        apply: find(doc, APPLY_ID)?,
    })
}

fn set_visible(el: &HtmlElement, visible: bool) -> Result<()> {
    el.style()
        .set_property("display", if visible { "block" } else { "none" })
        .map_err(Error::from_js)
}

fn notify(message: &str) -> Result<()> {
    let win = window().ok_or_else(|| Error::Dom("no window".into()))?;
    win.alert_with_message(message).map_err(Error::from_js)
}
