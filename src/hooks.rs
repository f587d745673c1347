use std::cell::RefCell;
use std::rc::{Rc, Weak};

use focus_timer::audio::{AudioBackend, HtmlAudioBackend, SilentBackend};
use focus_timer::config::TICK_MS;
use focus_timer::storage::{self, LocalStore};
use focus_timer::{Effect, Effects, FocusSession, Settings, TaskStore};
use gloo_timers::callback::Interval;
use log::{error, warn};
use yew::prelude::*;

pub type Session = FocusSession<Box<dyn AudioBackend>>;

/// Timer session plus the one periodic tick handle. Dropping the
/// [`Interval`] clears it in the browser.
struct Runtime {
    session: Session,
    ticker: Option<Interval>,
}

/// Shared handle to the running session. Every mutation re-renders the
/// component that owns the hook.
#[derive(Clone)]
pub struct TimerHandle {
    runtime: Rc<RefCell<Runtime>>,
    redraw: UseForceUpdateHandle,
}

impl PartialEq for TimerHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.runtime, &other.runtime)
    }
}

impl TimerHandle {
    /// Read-only access for rendering.
    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.runtime.borrow().session)
    }

    /// Run a session operation, then start/stop the ticker as it requests.
    pub fn dispatch(&self, op: impl FnOnce(&mut Session) -> Effects) {
        // Release the borrow before touching the ticker: its callback
        // dispatches back into the session.
        let effects = op(&mut self.runtime.borrow_mut().session);
        for effect in effects {
            self.apply_ticker(effect);
        }
        self.redraw.force_update();
    }

    /// Run a session operation with no ticker effects.
    pub fn update<R>(&self, op: impl FnOnce(&mut Session) -> R) -> R {
        let out = op(&mut self.runtime.borrow_mut().session);
        self.redraw.force_update();
        out
    }

    fn apply_ticker(&self, effect: Effect) {
        match effect {
            Effect::StartTicking => {
                let mut runtime = self.runtime.borrow_mut();
                if runtime.ticker.is_some() {
                    warn!("tick already scheduled; not starting a second one");
                    return;
                }
                // Weak, or the runtime would own a closure that owns it.
                let weak: Weak<RefCell<Runtime>> = Rc::downgrade(&self.runtime);
                let redraw = self.redraw.clone();
                runtime.ticker = Some(Interval::new(TICK_MS, move || {
                    if let Some(runtime) = weak.upgrade() {
                        let handle = TimerHandle {
                            runtime,
                            redraw: redraw.clone(),
                        };
                        handle.dispatch(|session| session.tick());
                    }
                }));
            }
            Effect::StopTicking => {
                let ticker = self.runtime.borrow_mut().ticker.take();
                drop(ticker);
            }
            other => warn!("ignoring non-ticker effect {:?}", other),
        }
    }
}

fn audio_backend() -> Box<dyn AudioBackend> {
    match HtmlAudioBackend::new() {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            error!("audio unavailable, continuing silently: {:?}", e);
            Box::new(SilentBackend::default())
        }
    }
}

/// Custom hook owning the timer session for the component's lifetime.
#[hook]
pub fn use_timer() -> TimerHandle {
    let runtime = use_mut_ref(|| Runtime {
        session: FocusSession::new(Settings::default(), audio_backend()),
        ticker: None,
    });
    let redraw = use_force_update();
    TimerHandle { runtime, redraw }
}

/// Custom hook holding the task list. Loads it once from `localStorage` and
/// writes it back whenever it changes. The mount itself writes nothing, so
/// stored data that failed to load stays until the first mutation.
#[hook]
pub fn use_tasks() -> UseStateHandle<TaskStore> {
    let mounted = use_mut_ref(|| false);
    let tasks = use_state(|| match LocalStore::open() {
        Ok(store) => TaskStore::from_tasks(storage::load_tasks(&store)),
        Err(e) => {
            warn!("starting with no tasks: {}", e);
            TaskStore::new()
        }
    });

    {
        let snapshot = (*tasks).clone();
        use_effect_with(snapshot, move |current| {
            if mounted.replace(true) {
                let saved = LocalStore::open()
                    .and_then(|mut store| storage::save_tasks(&mut store, current.tasks()));
                if let Err(e) = saved {
                    error!("failed to save tasks: {}", e);
                }
            }
            || ()
        });
    }

    tasks
}
