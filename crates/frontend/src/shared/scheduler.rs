use gloo_timers::callback::Timeout;

/// Deferred one-shot tasks. Scheduled tasks cannot be cancelled.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Browser timer backed by `setTimeout`
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        // Таймер должен сработать даже после выхода из обработчика
        Timeout::new(delay_ms, task).forget();
    }
}
