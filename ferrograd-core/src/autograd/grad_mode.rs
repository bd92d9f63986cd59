//! Scoped switch deciding whether operations record graph nodes.
//!
//! The flag is thread-local and only ever changed through [`GradModeGuard`],
//! which restores the previous value on drop. Nested backward passes rely on
//! this: each pass sets the mode it needs and leaves the caller's mode intact.

use std::cell::Cell;

thread_local! {
    static GRAD_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Returns `true` if operations applied on this thread record graph nodes.
pub fn is_grad_enabled() -> bool {
    GRAD_ENABLED.with(|flag| flag.get())
}

/// RAII guard that sets the grad mode for its lifetime.
#[derive(Debug)]
#[must_use = "grad mode is restored as soon as the guard is dropped"]
pub struct GradModeGuard {
    previous: bool,
}

impl GradModeGuard {
    pub fn new(enabled: bool) -> Self {
        let previous = GRAD_ENABLED.with(|flag| flag.replace(enabled));
        GradModeGuard { previous }
    }
}

impl Drop for GradModeGuard {
    fn drop(&mut self) {
        GRAD_ENABLED.with(|flag| flag.set(self.previous));
    }
}

/// Disables graph recording until the returned guard is dropped.
pub fn no_grad() -> GradModeGuard {
    GradModeGuard::new(false)
}

/// Enables graph recording until the returned guard is dropped.
pub fn enable_grad() -> GradModeGuard {
    GradModeGuard::new(true)
}

#[cfg(test)]
#[path = "grad_mode_test.rs"]
mod tests;
