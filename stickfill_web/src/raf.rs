// Copyright 2026 the Stickfill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Refresh-synchronized one-shot scheduling.
//!
//! [`RefreshScheduler`] runs a callback on the next animation frame through
//! `requestAnimationFrame`. The unprefixed name is preferred, then the
//! `webkit` and `moz` spellings. When the host has none of them, it falls back
//! to `setTimeout` with a fixed delay.
//!
//! Unlike a frame loop, nothing re-registers itself: at most one callback is
//! queued at a time, and [`schedule`](RefreshScheduler::schedule) is a no-op
//! while one is. Callers still gate `schedule` themselves (see
//! [`StickyCoordinator::on_scroll`]). The queued callback is cancelled when
//! the last scheduler handle is dropped.
//!
//! [`StickyCoordinator::on_scroll`]: stickfill_core::coordinator::StickyCoordinator::on_scroll

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use js_sys::{Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window::set_timeout_*` so the
// fallback works wherever the globals exist.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, delay_ms: i32) -> JsValue;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(handle: &JsValue);
}

/// Names looked up for refresh-synchronized scheduling, in order.
pub const ANIMATION_FRAME_NAMES: [&str; 3] = [
    "requestAnimationFrame",
    "webkitRequestAnimationFrame",
    "mozRequestAnimationFrame",
];

/// Cancellation functions paired index-for-index with
/// [`ANIMATION_FRAME_NAMES`].
pub const CANCEL_FRAME_NAMES: [&str; 3] = [
    "cancelAnimationFrame",
    "webkitCancelAnimationFrame",
    "mozCancelAnimationFrame",
];

/// How a scheduled callback is delivered.
enum Mode {
    /// A `requestAnimationFrame`-style function and its cancel counterpart,
    /// if the host has one.
    Frame {
        request: Function,
        cancel: Option<Function>,
    },
    /// `setTimeout` with this delay.
    Timeout(i32),
}

/// Host handle of the single callback currently queued.
///
/// Armed by `schedule`, cleared when the callback runs, and taken for
/// cancellation when the scheduler goes away.
#[derive(Debug)]
pub(crate) struct PendingHandle<H> {
    slot: RefCell<Option<H>>,
}

impl<H> PendingHandle<H> {
    pub(crate) const fn new() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub(crate) fn arm(&self, handle: H) {
        *self.slot.borrow_mut() = Some(handle);
    }

    /// The queued callback is running; there is nothing left to cancel.
    pub(crate) fn fire(&self) {
        self.slot.borrow_mut().take();
    }

    /// Hands the queued handle, if any, to `cancel`. Returns `true` if one
    /// was pending.
    pub(crate) fn cancel(&self, cancel: impl FnOnce(H)) -> bool {
        let handle = self.slot.borrow_mut().take();
        handle.map(cancel).is_some()
    }
}

type RefreshClosure = Closure<dyn FnMut()>;

struct RefreshInner {
    mode: Mode,

    /// Handle returned by the host for the queued callback.
    pending: PendingHandle<JsValue>,

    /// The JS closure handed to the host on every `schedule`.
    ///
    /// Created once and reused. A queued callback must be cancelled before
    /// this is dropped.
    closure: RefCell<Option<RefreshClosure>>,

    /// The user-supplied callback.
    callback: RefCell<Box<dyn FnMut()>>,
}

impl RefreshInner {
    /// Withdraws the queued callback, if any.
    ///
    /// Returns `false` if a callback stays queued because the host has no
    /// matching cancel function.
    fn cancel_pending(&self) -> bool {
        match &self.mode {
            Mode::Frame { cancel: None, .. } => !self.pending.is_armed(),
            Mode::Frame {
                cancel: Some(cancel),
                ..
            } => {
                self.pending.cancel(|id| {
                    _ = cancel.call1(&JsValue::NULL, &id);
                });
                true
            }
            Mode::Timeout(_) => {
                self.pending.cancel(|handle| clear_timeout(&handle));
                true
            }
        }
    }
}

impl Drop for RefreshInner {
    fn drop(&mut self) {
        // A callback the host still holds must find its closure alive.
        if !self.cancel_pending()
            && let Some(closure) = self.closure.borrow_mut().take()
        {
            closure.forget();
        }
    }
}

/// Schedules single callbacks on the next display refresh.
///
/// Cloning is cheap and shares the same callback. When the last clone is
/// dropped, a callback that is still queued is cancelled.
#[derive(Clone)]
pub struct RefreshScheduler {
    inner: Rc<RefreshInner>,
}

impl RefreshScheduler {
    /// Creates a scheduler that runs `callback` once per
    /// [`schedule`](Self::schedule) call.
    ///
    /// `fallback_delay_ms` is used only when no animation-frame function is
    /// available.
    pub fn new(callback: impl FnMut() + 'static, fallback_delay_ms: i32) -> Self {
        let mode = find_animation_frame().map_or(Mode::Timeout(fallback_delay_ms), |(request, cancel)| {
            Mode::Frame { request, cancel }
        });
        let inner = Rc::new(RefreshInner {
            mode,
            pending: PendingHandle::new(),
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
        });

        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.pending.fire();
                inner.callback.borrow_mut()();
            }
        }) as Box<dyn FnMut()>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Requests one callback on the next refresh.
    ///
    /// Does nothing while a callback is already queued.
    pub fn schedule(&self) {
        if self.inner.pending.is_armed() {
            return;
        }
        let closure = self.inner.closure.borrow();
        let Some(closure) = closure.as_ref() else {
            return;
        };
        let callback: &JsValue = closure.as_ref();
        match &self.inner.mode {
            Mode::Frame { request, .. } => {
                if let Ok(id) = request.call1(&JsValue::NULL, callback) {
                    self.inner.pending.arm(id);
                }
            }
            Mode::Timeout(delay_ms) => {
                self.inner.pending.arm(set_timeout(callback, *delay_ms));
            }
        }
    }

    /// Withdraws the queued callback, if any.
    ///
    /// Returns `false` if the host offers no way to cancel an animation
    /// frame; the callback then still runs once.
    pub fn cancel(&self) -> bool {
        self.inner.cancel_pending()
    }

    /// Returns `true` if a callback is queued and has not run yet.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.inner.pending.is_armed()
    }

    /// Returns `true` if callbacks are synchronized to animation frames
    /// rather than a timer.
    #[must_use]
    pub fn is_frame_synchronized(&self) -> bool {
        matches!(self.inner.mode, Mode::Frame { .. })
    }
}

impl core::fmt::Debug for RefreshScheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct("RefreshScheduler");
        match self.inner.mode {
            Mode::Frame { .. } => s.field("mode", &"animation-frame"),
            Mode::Timeout(delay_ms) => s.field("timeout_ms", &delay_ms),
        };
        s.field("scheduled", &self.is_scheduled())
            .finish_non_exhaustive()
    }
}

/// Looks up the first animation-frame function on the global object, with
/// its matching cancel function.
fn find_animation_frame() -> Option<(Function, Option<Function>)> {
    let global = js_sys::global();
    let lookup = |name: &str| {
        let value = Reflect::get(&global, &JsValue::from_str(name)).ok()?;
        let f = value.dyn_into::<Function>().ok()?;
        // Unbound calls need `this` to be the global object.
        Some(f.bind0(&global))
    };
    ANIMATION_FRAME_NAMES
        .into_iter()
        .zip(CANCEL_FRAME_NAMES)
        .find_map(|(request, cancel)| Some((lookup(request)?, lookup(cancel))))
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::PendingHandle;

    #[test]
    fn queued_callback_is_cancelled_once() {
        let pending = PendingHandle::new();
        pending.arm(7_i32);
        assert!(pending.is_armed());

        let cancelled = Cell::new(None);
        assert!(pending.cancel(|id| cancelled.set(Some(id))));
        assert_eq!(cancelled.get(), Some(7));

        assert!(!pending.cancel(|_| panic!("nothing left to cancel")));
        assert!(!pending.is_armed());
    }

    #[test]
    fn callback_that_ran_is_not_cancelled() {
        let pending = PendingHandle::new();
        pending.arm(3_i32);
        pending.fire();

        assert!(!pending.is_armed(), "a fired callback frees the slot");
        assert!(!pending.cancel(|_| panic!("already ran")));
    }

    #[test]
    fn rearming_after_fire_tracks_the_new_handle() {
        let pending = PendingHandle::new();
        pending.arm(1_i32);
        pending.fire();
        pending.arm(2);

        let cancelled = Cell::new(0);
        pending.cancel(|id| cancelled.set(id));
        assert_eq!(cancelled.get(), 2);
    }
}
