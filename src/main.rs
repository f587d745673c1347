//! Main module for the focus timer page using Yew.
//! Wires the timer session, task list, modal and keyboard shortcut to the
//! view components.

use focus_timer::audio::AmbientTrack;
use focus_timer::config::{
    DELETE_TASK_PROMPT, MAX_BREAK_MINUTES, MAX_FOCUS_MINUTES, MIN_BREAK_MINUTES,
    MIN_FOCUS_MINUTES,
};
use focus_timer::{is_space_shortcut, Mode, TaskEditor, TaskId};
use log::{info, warn};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

mod components;
mod hooks;

use components::{
    DurationInput, ModeSwitch, SoundToggle, TaskList, TaskModal, TimerControls, TimerDisplay,
    TrackSelect,
};
use hooks::{use_tasks, use_timer};

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Tag name of the focused element, e.g. "INPUT".
fn active_tag() -> Option<String> {
    gloo_utils::document()
        .active_element()
        .map(|element| element.tag_name())
}

fn confirm_delete() -> bool {
    gloo_utils::window()
        .confirm_with_message(DELETE_TASK_PROMPT)
        .unwrap_or(false)
}

fn parse_track(key: &str) -> AmbientTrack {
    key.parse().unwrap_or_else(|e| {
        warn!("{}; falling back to no music", e);
        AmbientTrack::None
    })
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let timer = use_timer();
    let tasks = use_tasks();
    let editor = use_state(TaskEditor::default);

    // Space toggles the timer unless typing in an input. The page scroll is
    // suppressed on keydown, the toggle fires on keyup.
    {
        let timer = timer.clone();
        use_effect_with((), move |_| {
            let document = gloo_utils::document();
            let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(|e: KeyboardEvent| {
                if is_space_shortcut(&e.code(), active_tag().as_deref()) {
                    e.prevent_default();
                }
            });
            let keyup = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                if is_space_shortcut(&e.code(), active_tag().as_deref()) {
                    timer.dispatch(|session| session.toggle());
                }
            });
            if let Err(e) = document
                .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
                .and_then(|_| {
                    document
                        .add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())
                })
            {
                warn!("keyboard shortcut unavailable: {:?}", e);
            }

            move || {
                let _ = document
                    .remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
                let _ = document
                    .remove_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
            }
        });
    }

    // --- Timer handlers ---
    let on_toggle = {
        let timer = timer.clone();
        Callback::from(move |_: ()| {
            timer.dispatch(|session| {
                session.click();
                session.toggle()
            })
        })
    };
    let on_reset = {
        let timer = timer.clone();
        Callback::from(move |_: ()| {
            timer.dispatch(|session| {
                session.click();
                session.reset()
            })
        })
    };
    let on_mode = {
        let timer = timer.clone();
        Callback::from(move |mode: Mode| timer.dispatch(|session| session.set_mode(mode)))
    };
    let on_focus_minutes = {
        let timer = timer.clone();
        Callback::from(move |raw: String| {
            timer.update(|session| session.set_duration(Mode::Focus, &raw))
        })
    };
    let on_break_minutes = {
        let timer = timer.clone();
        Callback::from(move |raw: String| {
            timer.update(|session| session.set_duration(Mode::Break, &raw))
        })
    };
    let on_track = {
        let timer = timer.clone();
        Callback::from(move |key: String| {
            let track = parse_track(&key);
            timer.update(|session| session.select_track(track))
        })
    };
    let on_mute = {
        let timer = timer.clone();
        Callback::from(move |_: ()| {
            let muted = timer.update(|session| session.toggle_mute());
            info!("sound effects {}", if muted { "muted" } else { "on" });
        })
    };

    // --- Task handlers ---
    let on_toggle_task = {
        let tasks = tasks.clone();
        Callback::from(move |id: TaskId| {
            let mut next = (*tasks).clone();
            if next.toggle_complete(id) {
                tasks.set(next);
            }
        })
    };
    let on_delete_task = {
        let tasks = tasks.clone();
        Callback::from(move |id: TaskId| {
            let mut next = (*tasks).clone();
            if next.delete(id, |_| confirm_delete()).is_some() {
                tasks.set(next);
            }
        })
    };
    let on_edit_task = {
        let tasks = tasks.clone();
        let editor = editor.clone();
        Callback::from(move |id: TaskId| {
            let mut next = (*editor).clone();
            if next.open_edit(&tasks, id) {
                editor.set(next);
            }
        })
    };
    let on_add_task = {
        let editor = editor.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*editor).clone();
            next.open_new();
            editor.set(next);
        })
    };
    let on_draft = {
        let editor = editor.clone();
        Callback::from(move |draft: String| {
            let mut next = (*editor).clone();
            next.set_draft(draft);
            editor.set(next);
        })
    };
    let on_save_task = {
        let tasks = tasks.clone();
        let editor = editor.clone();
        Callback::from(move |_: ()| {
            let mut next_editor = (*editor).clone();
            let mut next_tasks = (*tasks).clone();
            if next_editor.save(&mut next_tasks, now_ms()) {
                tasks.set(next_tasks);
            }
            editor.set(next_editor);
        })
    };
    let on_cancel_task = {
        let editor = editor.clone();
        Callback::from(move |_: ()| {
            let mut next = (*editor).clone();
            next.close();
            editor.set(next);
        })
    };

    let (mode, running, time, muted, track, focus_minutes, break_minutes) = timer.read(|session| {
        let engine = session.engine();
        (
            engine.mode(),
            engine.is_running(),
            engine.display(),
            session.audio().is_muted(),
            session.audio().selection(),
            session.settings().focus_minutes(),
            session.settings().break_minutes(),
        )
    });
    let task_rows = Rc::new(tasks.tasks().to_vec());

    html! {
        <div class="container">
            <header class="app-header">
                <h1>{ "Focus Timer" }</h1>
                <SoundToggle {muted} onclick={on_mute} />
            </header>

            <section class="timer-section">
                <ModeSwitch {mode} onchange={on_mode} />
                <TimerDisplay time={time} {mode} />
                <TimerControls {running} on_toggle={on_toggle} on_reset={on_reset} />
            </section>

            <section class="settings">
                <div class="form-row">
                    <DurationInput id="focus-time" label="Focus (min)"
                        value={focus_minutes}
                        min={MIN_FOCUS_MINUTES} max={MAX_FOCUS_MINUTES}
                        onchange={on_focus_minutes} />
                    <DurationInput id="break-time" label="Break (min)"
                        value={break_minutes}
                        min={MIN_BREAK_MINUTES} max={MAX_BREAK_MINUTES}
                        onchange={on_break_minutes} />
                </div>
                <div class="form-group">
                    <label for="music-select">{ "Focus Music" }</label>
                    <TrackSelect selected={track} onchange={on_track} />
                </div>
            </section>

            <section class="tasks">
                <div class="tasks-header">
                    <h2>{ "Tasks" }</h2>
                    <button id="add-task-btn" class="btn-secondary small" onclick={on_add_task}>
                        { "+ Add Task" }
                    </button>
                </div>
                <TaskList tasks={task_rows}
                    on_toggle={on_toggle_task}
                    on_edit={on_edit_task}
                    on_delete={on_delete_task} />
            </section>

            <TaskModal
                open={editor.is_open()}
                editing={editor.editing().is_some()}
                draft={editor.draft().to_string()}
                on_input={on_draft}
                on_save={on_save_task}
                on_cancel={on_cancel_task} />
        </div>
    }
}

/// Entry point: installs logging and the panic hook, then renders the app.
fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    info!("focus timer starting");
    yew::Renderer::<App>::new().render();
}
