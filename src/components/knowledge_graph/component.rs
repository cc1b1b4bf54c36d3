//! Leptos component wrapping the knowledge graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, zooming, and hover. An animation loop
//! runs via `requestAnimationFrame`, stepping the layout and redrawing each
//! frame until the component unmounts.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use leptos::ev;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent, Window,
};

use super::builder::Bounds;
use super::config::GraphConfig;
use super::render;
use super::state::{GraphEvent, KnowledgeGraphState};
use super::theme::Theme;
use super::types::TaggedEntity;

/// Graph state plus the theme it is drawn with.
struct GraphContext {
	state: KnowledgeGraphState,
	theme: Theme,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;

/// Owner-scoped slot for the animation frame closure, disposed on unmount.
type FrameSlot = StoredValue<Option<Closure<dyn FnMut()>>, LocalStorage>;

/// Renders tagged entities as an interactive entity/tag graph on a canvas.
///
/// Pass entities via the reactive `data` signal; a new value rebuilds the
/// graph while keeping the current pan and zoom. The component sizes itself
/// to its parent container by default; set `fullscreen = true` to fill the
/// window instead. Explicit `width`/`height` override automatic sizing. Every
/// window resize re-measures the canvas in either mode.
///
/// `on_activate` receives the entity id when an entity node is pressed,
/// `on_select` receives the node id (entity or tag) of every pressed node, and
/// `on_hover` receives the hovered node id (or `None`) whenever it changes.
/// Only the primary mouse button interacts with nodes and the canvas.
#[component]
pub fn KnowledgeGraphCanvas(
	/// Library to draw; every new value rebuilds the graph.
	#[prop(into)]
	data: Signal<Vec<TaggedEntity>>,
	/// Layout, viewport, and style constants.
	#[prop(optional)]
	config: Option<GraphConfig>,
	/// Colors; defaults to the dashboard theme.
	#[prop(optional)]
	theme: Option<Theme>,
	/// Library id of a pressed document node.
	#[prop(optional, into)]
	on_activate: Option<Callback<u64>>,
	/// Node id of any pressed node.
	#[prop(optional, into)]
	on_select: Option<Callback<String>>,
	/// Node id under the pointer, `None` when it leaves all nodes.
	#[prop(optional, into)]
	on_hover: Option<Callback<Option<String>>>,
	/// Fill and follow the window instead of the parent element.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed CSS width in pixels.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed CSS height in pixels.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();
	let theme = theme.unwrap_or_default();
	let sizing = Sizing {
		fullscreen,
		width,
		height,
	};
	let context_init = context.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			warn!("atlas-graph: no window, canvas stays blank");
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("atlas-graph: 2d canvas context unavailable");
			return;
		};

		let (w, h) = measure(&window, &canvas, sizing);
		let ratio = window.device_pixel_ratio();
		size_canvas(&canvas, w, h, ratio);

		let entities = data.get_untracked();
		let mut state = KnowledgeGraphState::new(
			&entities,
			Bounds::new(w, h),
			&config,
			&mut js_sys::Math::random,
		);
		state.resize(w, h, ratio);
		info!(
			"atlas-graph: mounted {} entities as {} nodes",
			entities.len(),
			state.graph.nodes.len()
		);
		*context_init.borrow_mut() = Some(GraphContext {
			state,
			theme: theme.clone(),
		});

		// Fullscreen follows the window, otherwise the parent is re-read.
		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		let listener = window_event_listener(ev::resize, move |_| {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = measure(&win, &canvas_resize, sizing);
			let ratio = win.device_pixel_ratio();
			size_canvas(&canvas_resize, nw, nh, ratio);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh, ratio);
			}
		});
		on_cleanup(move || listener.remove());

		let alive = Arc::new(AtomicBool::new(true));
		let frame_id = Arc::new(AtomicI32::new(0));
		let slot: FrameSlot = StoredValue::new_local(None);
		let (alive_anim, frame_anim) = (alive.clone(), frame_id.clone());
		let context_anim = context_init.clone();
		slot.set_value(Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.frame();
				render::render(&c.state, &ctx, &c.theme);
			}
			if let Some(id) = web_sys::window().and_then(|win| schedule(&win, slot)) {
				frame_anim.store(id, Ordering::Relaxed);
			}
		})));
		if let Some(id) = schedule(&window, slot) {
			frame_id.store(id, Ordering::Relaxed);
		}

		on_cleanup(move || {
			alive.store(false, Ordering::Relaxed);
			if let Some(win) = web_sys::window() {
				let _ = win.cancel_animation_frame(frame_id.load(Ordering::Relaxed));
			}
			// Drops the frame closure and the graph context it holds.
			slot.dispose();
		});
	});

	let context_data = context.clone();
	Effect::new(move |prev: Option<()>| {
		let entities = data.get();
		// The mount effect already built from the initial value.
		if prev.is_none() {
			return;
		}
		if let Some(ref mut c) = *context_data.borrow_mut() {
			c.state.rebuild(&entities, &mut js_sys::Math::random);
			info!(
				"atlas-graph: rebuilt from {} entities, {} nodes",
				entities.len(),
				c.state.graph.nodes.len()
			);
		}
	});

	let dispatch = move |event: Option<GraphEvent>| match event {
		Some(GraphEvent::Activated(id)) => {
			if let Some(cb) = on_activate {
				cb.run(id);
			}
		}
		Some(GraphEvent::HoverChanged(id)) => {
			if let Some(cb) = on_hover {
				cb.run(id);
			}
		}
		None => {}
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((canvas, x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		let (event, selected) = {
			let mut guard = context_md.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			let event = c.state.press(ev.button(), x, y);
			set_cursor(&canvas, &c.state);
			// A press on a node starts a drag and selects it.
			let selected = c
				.state
				.is_dragging()
				.then(|| c.state.selected_node_id().map(str::to_owned))
				.flatten();
			(event, selected)
		};
		if let (Some(id), Some(cb)) = (selected, on_select) {
			cb.run(id);
		}
		dispatch(event);
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((canvas, x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		let event = context_mm
			.borrow_mut()
			.as_mut()
			.and_then(|c| {
				let event = c.state.pointer_move(x, y);
				set_cursor(&canvas, &c.state);
				event
			});
		dispatch(event);
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.pointer_up();
			if let Some(canvas) = canvas_ref.get() {
				set_cursor(&canvas, &c.state);
			}
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let event = context_ml
			.borrow_mut()
			.as_mut()
			.and_then(|c| c.state.pointer_leave());
		if let Some(canvas) = canvas_ref.get() {
			let _ = HtmlElement::style(&canvas).set_property("cursor", "grab");
		}
		dispatch(event);
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((_, x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.wheel(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="knowledge-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn window_size(window: &Window) -> (f64, f64) {
	let read = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(
		read(window.inner_width(), 800.0),
		read(window.inner_height(), 600.0),
	)
}

/// How the canvas picks its CSS size.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Sizing {
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
}

impl Sizing {
	/// Fullscreen follows the window. Otherwise explicit dimensions win over
	/// the parent's client size, and 800x600 stands in for a missing parent.
	fn resolve(self, window: (f64, f64), parent: Option<(f64, f64)>) -> (f64, f64) {
		if self.fullscreen {
			return window;
		}
		let (pw, ph) = parent.unwrap_or((800.0, 600.0));
		(self.width.unwrap_or(pw), self.height.unwrap_or(ph))
	}
}

fn measure(window: &Window, canvas: &HtmlCanvasElement, sizing: Sizing) -> (f64, f64) {
	let parent = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64));
	sizing.resolve(window_size(window), parent)
}

/// Request the next animation frame with the closure held in `slot`.
fn schedule(window: &Window, slot: FrameSlot) -> Option<i32> {
	slot.try_with_value(|cb| {
		cb.as_ref()
			.and_then(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
	})
	.flatten()
}

/// Backing store in device pixels, layout size in CSS pixels.
fn size_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64, ratio: f64) {
	canvas.set_width((width * ratio) as u32);
	canvas.set_height((height * ratio) as u32);
	// Inherent `HtmlElement::style`, not the tachys `ElementExt::style`.
	let style = HtmlElement::style(canvas);
	let _ = style.set_property("width", &format!("{width}px"));
	let _ = style.set_property("height", &format!("{height}px"));
}

/// Pointer position relative to the canvas, in CSS pixels.
fn local_position(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(HtmlCanvasElement, f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	let (x, y) = (
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	);
	Some((canvas, x, y))
}

fn set_cursor(canvas: &HtmlCanvasElement, state: &KnowledgeGraphState) {
	let _ = HtmlElement::style(canvas).set_property("cursor", state.cursor().as_css());
}
