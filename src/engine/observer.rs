/*!
 * Tick Observer
 * Injected callback interface for structured tick events
 */

use super::snapshot::TickReport;

/// Receives the structured report of every executed tick.
///
/// The engine owns no global logging state; front ends that want per-tick
/// output inject an observer instead.
pub trait TickObserver {
    fn on_tick(&mut self, report: &TickReport);
}

impl<F> TickObserver for F
where
    F: FnMut(&TickReport),
{
    fn on_tick(&mut self, report: &TickReport) {
        self(report)
    }
}
