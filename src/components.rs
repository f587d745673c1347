//! Pure Yew view components for the focus timer UI.
//!
//! These render from props only; all state lives in `main.rs`.

use focus_timer::audio::AmbientTrack;
use focus_timer::{Mode, Task, TaskId};
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TimerDisplayProps {
    pub time: AttrValue,
    pub mode: Mode,
}

#[function_component(TimerDisplay)]
pub fn timer_display(props: &TimerDisplayProps) -> Html {
    let label = match props.mode {
        Mode::Focus => "Focus",
        Mode::Break => "Break",
    };
    html! {
        <div class={classes!("timer", props.mode.is_break().then_some("break"))}>
            <div class="mode-label">{ label }</div>
            <div id="time-display" class="time-display">{ props.time.clone() }</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TimerControlsProps {
    pub running: bool,
    pub on_toggle: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(TimerControls)]
pub fn timer_controls(props: &TimerControlsProps) -> Html {
    html! {
        <div class="controls">
            <button id="start-pause-btn" class="btn-primary"
                onclick={props.on_toggle.reform(|_: MouseEvent| ())}>
                { if props.running { "Pause" } else { "Start" } }
            </button>
            <button id="reset-btn" class="btn-secondary"
                onclick={props.on_reset.reform(|_: MouseEvent| ())}>
                { "Reset" }
            </button>
        </div>
    }
}

/// Focus/break switch. Checked means break.
#[derive(Properties, PartialEq)]
pub struct ModeSwitchProps {
    pub mode: Mode,
    pub onchange: Callback<Mode>,
}

#[function_component(ModeSwitch)]
pub fn mode_switch(props: &ModeSwitchProps) -> Html {
    let onchange = props.onchange.reform(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Mode::from_break_checked(input.checked())
    });
    html! {
        <label class="mode-switch">
            <span>{ "Focus" }</span>
            <input type="checkbox" id="mode-checkbox"
                checked={props.mode.is_break()}
                {onchange}
            />
            <span>{ "Break" }</span>
        </label>
    }
}

/// Numeric minutes input. `onchange` receives the raw text and returns the
/// clamped minutes, which are written straight back into the field.
#[derive(Properties, PartialEq)]
pub struct DurationInputProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: u32,
    pub min: u32,
    pub max: u32,
    pub onchange: Callback<String, u32>,
}

#[function_component(DurationInput)]
pub fn duration_input(props: &DurationInputProps) -> Html {
    let onchange = {
        let commit = props.onchange.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let clamped = commit.emit(input.value());
            input.set_value(&clamped.to_string());
        })
    };
    html! {
        <div class="form-group">
            <label for={props.id.clone()}>{ props.label.clone() }</label>
            <input type="number"
                id={props.id.clone()}
                min={props.min.to_string()}
                max={props.max.to_string()}
                value={props.value.to_string()}
                {onchange}
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TrackSelectProps {
    pub selected: AmbientTrack,
    pub onchange: Callback<String>,
}

#[function_component(TrackSelect)]
pub fn track_select(props: &TrackSelectProps) -> Html {
    let onchange = props.onchange.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        select.value()
    });
    html! {
        <select id="music-select" {onchange}>
            { AmbientTrack::ALL.iter().map(|track| html! {
                <option value={track.key()} selected={*track == props.selected}>
                    { track.label() }
                </option>
            }).collect::<Html>() }
        </select>
    }
}

#[derive(Properties, PartialEq)]
pub struct SoundToggleProps {
    pub muted: bool,
    pub onclick: Callback<()>,
}

#[function_component(SoundToggle)]
pub fn sound_toggle(props: &SoundToggleProps) -> Html {
    let opacity = if props.muted { "opacity: 0.5" } else { "opacity: 1" };
    html! {
        <button id="sound-toggle-btn" class="icon-btn" style={opacity}
            onclick={props.onclick.reform(|_: MouseEvent| ())}>
            <svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24"
                fill="none" stroke="currentColor" stroke-width="2"
                stroke-linecap="round" stroke-linejoin="round">
                <polygon points="11 5 6 9 2 9 2 15 6 15 11 19 11 5"></polygon>
                if props.muted {
                    <line x1="23" y1="9" x2="17" y2="15"></line>
                    <line x1="17" y1="9" x2="23" y2="15"></line>
                } else {
                    <path d="M19.07 4.93a10 10 0 0 1 0 14.14M15.54 8.46a5 5 0 0 1 0 7.07"></path>
                }
            </svg>
        </button>
    }
}

/// Full task list, redrawn from `tasks` on every change.
#[derive(Properties, PartialEq)]
pub struct TaskListProps {
    pub tasks: Rc<Vec<Task>>,
    pub on_toggle: Callback<TaskId>,
    pub on_edit: Callback<TaskId>,
    pub on_delete: Callback<TaskId>,
}

#[function_component(TaskList)]
pub fn task_list(props: &TaskListProps) -> Html {
    html! {
        <div id="task-list" class="task-list">
            { props.tasks.iter().map(|task| render_task_row(task, props)).collect::<Html>() }
        </div>
    }
}

fn render_task_row(task: &Task, props: &TaskListProps) -> Html {
    let id = task.id;
    html! {
        <div key={id} class={classes!("task-item", task.completed.then_some("completed"))}>
            <div class={classes!("task-checkbox", task.completed.then_some("checked"))}
                onclick={props.on_toggle.reform(move |_: MouseEvent| id)}></div>
            <div class="task-text"
                ondblclick={props.on_edit.reform(move |_: MouseEvent| id)}>
                { task.text.clone() }
            </div>
            <div class="delete-btn"
                onclick={props.on_delete.reform(move |_: MouseEvent| id)}>
                { "✕" }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
    pub open: bool,
    pub editing: bool,
    pub draft: AttrValue,
    pub on_input: Callback<String>,
    pub on_save: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Add/edit dialog. Enter saves; a click on the backdrop cancels.
#[function_component(TaskModal)]
pub fn task_modal(props: &TaskModalProps) -> Html {
    let input_ref = use_node_ref();

    {
        let input_ref = input_ref.clone();
        use_effect_with(props.open, move |open| {
            if *open {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }

    let oninput = props.on_input.reform(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.value()
    });
    let onkeypress = {
        let on_save = props.on_save.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                on_save.emit(());
            }
        })
    };
    let on_backdrop = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |e: MouseEvent| {
            if e.target() == e.current_target() {
                on_cancel.emit(());
            }
        })
    };

    html! {
        <div id="task-modal" class={classes!("modal", props.open.then_some("show"))}
            onclick={on_backdrop}>
            <div class="modal-content">
                <h3>{ if props.editing { "Edit Task" } else { "New Task" } }</h3>
                <input type="text" id="new-task-input" ref={input_ref}
                    placeholder="What are you working on?"
                    value={props.draft.clone()}
                    {oninput}
                    {onkeypress}
                />
                <div class="modal-actions">
                    <button id="cancel-task-btn" class="btn-secondary"
                        onclick={props.on_cancel.reform(|_: MouseEvent| ())}>
                        { "Cancel" }
                    </button>
                    <button id="save-task-btn" class="btn-primary"
                        onclick={props.on_save.reform(|_: MouseEvent| ())}>
                        { "Save" }
                    </button>
                </div>
            </div>
        </div>
    }
}
