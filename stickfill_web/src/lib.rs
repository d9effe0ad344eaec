// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for stickfill.
//!
//! This crate wires [`stickfill_core`] to a live page:
//!
//! - [`DomHost`]: layout queries and style writes against the document
//! - [`RefreshScheduler`]: one-shot `requestAnimationFrame` callbacks
//! - [`source`]: inline and linked stylesheet text
//! - [`ConsoleSink`]: trace output via `console.debug`
//!
//! [`install`] runs the native-support check and, when the browser lacks
//! `position: sticky`, registers the `scroll` and `load` listeners. With the
//! default `auto-start` feature this happens as soon as the module is
//! instantiated.
//!
//! # Crate features
//!
//! - `auto-start` (default): install from a `wasm_bindgen(start)` entry.
//! - `trace`: route core trace events to [`ConsoleSink`].

#![no_std]

extern crate alloc;

mod console;
mod dom;
mod raf;
pub mod source;

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

pub use console::ConsoleSink;
pub use dom::DomHost;
pub use raf::{ANIMATION_FRAME_NAMES, RefreshScheduler};

use stickfill_core::config::StickyConfig;
use stickfill_core::coordinator::StickyCoordinator;
use stickfill_core::trace::{StyleSource, StylesheetEvent, StylesheetOutcome, Tracer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{CssStyleDeclaration, Element, Event, HtmlElement, Window};

/// Shared between the listeners and the refresh callback.
struct State {
    host: DomHost,
    coordinator: StickyCoordinator<Element>,
    #[cfg(feature = "trace")]
    sink: ConsoleSink,
}

impl State {
    /// Borrows the coordinator and host alongside a tracer for this call.
    fn parts(&mut self) -> (&mut StickyCoordinator<Element>, &mut DomHost, Tracer<'_>) {
        #[cfg(feature = "trace")]
        let tracer = Tracer::new(&mut self.sink);
        #[cfg(not(feature = "trace"))]
        let tracer = Tracer::none();
        (&mut self.coordinator, &mut self.host, tracer)
    }
}

type Shared = Rc<RefCell<State>>;
type Listener = Closure<dyn FnMut(Event)>;

/// Keeps the emulation's listeners registered.
///
/// Dropping the handle removes the `scroll` and `load` listeners and cancels
/// a queued refresh. Elements already pinned keep their current placement.
pub struct Installed {
    window: Window,
    on_scroll: Listener,
    on_load: Listener,
    refresh: RefreshScheduler,
}

impl core::fmt::Debug for Installed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Installed")
            .field("refresh", &self.refresh)
            .finish_non_exhaustive()
    }
}

impl Drop for Installed {
    fn drop(&mut self) {
        _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.on_scroll.as_ref().unchecked_ref());
        _ = self
            .window
            .remove_event_listener_with_callback("load", self.on_load.as_ref().unchecked_ref());
        self.refresh.cancel();
    }
}

/// Installs the emulation with [`StickyConfig::web`].
///
/// See [`install_with`].
pub fn install() -> Result<Option<Installed>, JsValue> {
    install_with(StickyConfig::web())
}

/// Installs the emulation unless the browser supports sticky positioning.
///
/// Returns `Ok(None)` when a native spelling is accepted; nothing is
/// registered and the page is never touched. Otherwise registers the window
/// `scroll` listener and a `load` listener that scans the page's stylesheets.
/// If the document has already finished loading, the scan runs immediately.
///
/// # Errors
///
/// Fails if there is no `window` or `document`, or if a listener cannot be
/// registered.
pub fn install_with(config: StickyConfig) -> Result<Option<Installed>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    let scratch: HtmlElement = document.create_element("div")?.unchecked_into();
    let scratch = scratch.style();
    let Some(coordinator) =
        StickyCoordinator::unless_native(config, |value| accepts_position(&scratch, value))
    else {
        return Ok(None);
    };

    let fallback_delay_ms = coordinator.config().fallback_delay_ms;
    let state: Shared = Rc::new(RefCell::new(State {
        host: DomHost::new(window.clone(), document.clone()),
        coordinator,
        #[cfg(feature = "trace")]
        sink: ConsoleSink,
    }));

    let pass_state = Rc::clone(&state);
    let refresh = RefreshScheduler::new(move || run_pass(&pass_state), fallback_delay_ms);

    let scroll_state = Rc::clone(&state);
    let scroll_refresh = refresh.clone();
    let on_scroll = Closure::wrap(Box::new(move |_event: Event| {
        update_scroll(&scroll_state, &scroll_refresh);
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;

    let load_state = Rc::clone(&state);
    let load_refresh = refresh.clone();
    let on_load = Closure::wrap(Box::new(move |_event: Event| {
        load(&load_state, &load_refresh);
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;

    if document.ready_state() == "complete" {
        load(&state, &refresh);
    }

    Ok(Some(Installed {
        window,
        on_scroll,
        on_load,
        refresh,
    }))
}

/// Entry point: installs with the default configuration and keeps the
/// listeners for the lifetime of the page.
///
/// # Errors
///
/// Propagates setup failures from [`install`].
#[cfg(feature = "auto-start")]
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn start() -> Result<(), JsValue> {
    if let Some(installed) = install()? {
        core::mem::forget(installed);
    }
    Ok(())
}

/// Assigns `value` to the scratch style's `position` and reports whether it
/// read back non-empty.
fn accepts_position(style: &CssStyleDeclaration, value: &str) -> bool {
    style.set_property("position", value).is_ok()
        && style
            .get_property_value("position")
            .is_ok_and(|read| !read.is_empty())
}

/// Records the current scroll offset and schedules a pass if none is pending.
fn update_scroll(state: &Shared, refresh: &RefreshScheduler) {
    let mut s = state.borrow_mut();
    let (coordinator, host, mut tracer) = s.parts();
    if coordinator.on_scroll(&*host, &mut tracer) {
        refresh.schedule();
    }
}

fn run_pass(state: &Shared) {
    let mut s = state.borrow_mut();
    let (coordinator, host, mut tracer) = s.parts();
    coordinator.run_pending(host, &mut tracer);
}

fn ingest(state: &Shared, source: StyleSource<'_>, css: &str) {
    let mut s = state.borrow_mut();
    let (coordinator, host, mut tracer) = s.parts();
    let tracked = coordinator.ingest_stylesheet(host, css, &mut tracer);
    tracer.stylesheet(&StylesheetEvent {
        source,
        outcome: StylesheetOutcome::Scanned { tracked },
    });
}

/// Scans inline sheets now and fetches linked ones in the background.
fn load(state: &Shared, refresh: &RefreshScheduler) {
    let (window, document) = {
        let s = state.borrow();
        (s.host.window().clone(), s.host.document().clone())
    };

    for (index, css) in source::inline_styles(&document).iter().enumerate() {
        ingest(state, StyleSource::Inline { index }, css);
    }
    update_scroll(state, refresh);

    for href in source::stylesheet_links(&document) {
        let state = Rc::clone(state);
        let refresh = refresh.clone();
        let window = window.clone();
        wasm_bindgen_futures::spawn_local(async move {
            fetch_and_ingest(&state, &refresh, &window, href).await;
        });
    }
}

async fn fetch_and_ingest(state: &Shared, refresh: &RefreshScheduler, window: &Window, href: String) {
    match source::fetch_text(window, &href).await {
        Ok(css) => {
            ingest(state, StyleSource::Linked { href: &href }, &css);
            update_scroll(state, refresh);
        }
        Err(_) => {
            let mut s = state.borrow_mut();
            let (_, _, mut tracer) = s.parts();
            tracer.stylesheet(&StylesheetEvent {
                source: StyleSource::Linked { href: &href },
                outcome: StylesheetOutcome::Failed,
            });
        }
    }
}
