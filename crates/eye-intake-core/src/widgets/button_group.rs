//! Fixed choice-button group.

use std::marker::PhantomData;

use crate::models::FixedChoice;

/// Render state of one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceButton<T> {
    pub value: T,
    pub label: &'static str,
    pub selected: bool,
}

/// One button per option of a fixed enum; at most one is selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonGroup<T>(PhantomData<T>);

impl<T: FixedChoice> ButtonGroup<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    pub fn buttons(&self, current: Option<T>) -> Vec<ChoiceButton<T>> {
        T::ALL
            .iter()
            .map(|&value| ChoiceButton {
                value,
                label: value.label(),
                selected: current == Some(value),
            })
            .collect()
    }

    /// Clicking a button sets it as the value, even if already selected.
    pub fn click(&self, value: T) -> Option<T> {
        Some(value)
    }

    /// Click by label; unknown labels leave the value unchanged.
    pub fn click_label(&self, current: Option<T>, label: &str) -> Option<T> {
        T::from_label(label).or(current)
    }
}
