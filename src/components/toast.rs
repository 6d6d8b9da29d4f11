use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::config::TOAST_DURATION_MS;

/// Each show gets a new generation; a dismiss only hides the toast it was
/// scheduled for.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub message: String,
    pub visible: bool,
    pub generation: u32,
}

pub enum ToastAction {
    Show { message: String, generation: u32 },
    Dismiss(u32),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            ToastAction::Show { message, generation } => Rc::new(ToastState {
                message,
                visible: true,
                generation,
            }),
            ToastAction::Dismiss(generation) if generation == self.generation => Rc::new(ToastState {
                visible: false,
                ..(*self).clone()
            }),
            ToastAction::Dismiss(_) => self,
        }
    }
}

/// Shows one toast at a time. Showing a new message restarts the dismiss
/// timer; dropping the old `Timeout` cancels it.
#[derive(Clone)]
pub struct ToastHandle {
    state: UseReducerHandle<ToastState>,
    issued: Rc<Cell<u32>>,
    dismiss: Rc<RefCell<Option<Timeout>>>,
}

impl ToastHandle {
    pub fn show(&self, message: impl Into<String>) {
        let generation = self.issued.get().wrapping_add(1);
        self.issued.set(generation);
        self.state.dispatch(ToastAction::Show {
            message: message.into(),
            generation,
        });

        let state = self.state.clone();
        let timeout = Timeout::new(TOAST_DURATION_MS, move || {
            state.dispatch(ToastAction::Dismiss(generation));
        });
        *self.dismiss.borrow_mut() = Some(timeout);
    }

    pub fn state(&self) -> ToastState {
        (*self.state).clone()
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    let state = use_reducer(ToastState::default);
    let issued = use_memo(|_| Cell::new(0u32), ());
    let dismiss = use_mut_ref(|| None::<Timeout>);
    ToastHandle { state, issued, dismiss }
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub state: ToastState,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    html! {
        <div id="quantityToast" class={classes!("toast", props.state.visible.then(|| "show"))} role="status" aria-live="polite">
            <span id="toastMessage">{ props.state.message.clone() }</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(state: Rc<ToastState>, message: &str, generation: u32) -> Rc<ToastState> {
        state.reduce(ToastAction::Show { message: message.into(), generation })
    }

    #[test]
    fn stale_dismiss_leaves_newer_toast_visible() {
        let state = show(Rc::new(ToastState::default()), "Milk added to pack!", 1);
        let state = show(state, "Eggs added to pack!", 2);

        let state = state.reduce(ToastAction::Dismiss(1));
        assert!(state.visible);
        assert_eq!(state.message, "Eggs added to pack!");

        let state = state.reduce(ToastAction::Dismiss(2));
        assert!(!state.visible);
        assert_eq!(state.message, "Eggs added to pack!");
    }

    #[test]
    fn dismiss_before_any_show_is_harmless() {
        let state = Rc::new(ToastState::default()).reduce(ToastAction::Dismiss(7));
        assert_eq!(*state, ToastState::default());
    }
}
