//! Loading / success / error markers on individual controls

use contracts::shared::control_state::ControlVisualState;

use crate::shared::dom::FormControl;
use crate::shared::scheduler::Scheduler;

const LOADING: ControlVisualState = ControlVisualState::Loading;

/// Mark the control as loading and disable it. Repeated calls are harmless.
pub fn add_loading_state<C: FormControl>(control: &C) {
    if let Some(class) = LOADING.marker_class() {
        control.add_class(class);
    }
    control.set_disabled(true);
}

/// Clear the loading marker and re-enable the control unconditionally
pub fn remove_loading_state<C: FormControl>(control: &C) {
    if let Some(class) = LOADING.marker_class() {
        control.remove_class(class);
    }
    control.set_disabled(false);
}

/// Add the state's marker and schedule its removal.
///
/// Earlier removals for the same control are not cancelled, so a second
/// flash within the delay may be cut short by the first timer.
pub fn flash_state<C, S>(control: &C, state: ControlVisualState, scheduler: &S)
where
    C: FormControl + Clone + 'static,
    S: Scheduler + ?Sized,
{
    let Some(class) = state.marker_class() else {
        return;
    };
    control.add_class(class);

    if let Some(delay) = state.auto_clear_ms() {
        let target = control.clone();
        scheduler.schedule(delay, Box::new(move || target.remove_class(class)));
    }
}

pub fn add_success_state<C, S>(control: &C, scheduler: &S)
where
    C: FormControl + Clone + 'static,
    S: Scheduler + ?Sized,
{
    flash_state(control, ControlVisualState::Success, scheduler);
}

pub fn add_error_state<C, S>(control: &C, scheduler: &S)
where
    C: FormControl + Clone + 'static,
    S: Scheduler + ?Sized,
{
    flash_state(control, ControlVisualState::Error, scheduler);
}
