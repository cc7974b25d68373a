//! The certificate image load currently in flight.
#![cfg_attr(
    not(all(target_arch = "wasm32", feature = "wasm")),
    allow(dead_code)
)]

/// Handlers attached to an in-flight load.
pub(crate) trait Detach {
    /// Unhook the handlers so they can no longer fire.
    fn detach(&self);
}

/// Keeps at most one load alive. Replacing it detaches the previous load
/// before dropping it, so its handlers are released instead of leaked.
pub(crate) struct InFlight<T: Detach> {
    current: Option<T>,
}

impl<T: Detach> InFlight<T> {
    pub(crate) fn new() -> Self {
        Self { current: None }
    }

    pub(crate) fn replace(&mut self, load: T) {
        if let Some(previous) = self.current.replace(load) {
            previous.detach();
        }
    }
}
