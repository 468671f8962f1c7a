use crate::period::PeriodSelection;
use std::sync::mpsc::{channel, Receiver, Sender};
use time::Date;
use tracing::debug;

/// Notifications published by the period resolver and the calendar for the
/// UI loop to act on
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum DashboardEvent {
    DateSelected { date: Date, formatted: String },
    PeriodSelected(PeriodSelection),
}

#[derive(Clone, Debug)]
pub(crate) struct EventSender(Sender<DashboardEvent>);

impl EventSender {
    pub(crate) fn emit(&self, event: DashboardEvent) {
        if let Err(e) = self.0.send(event) {
            // Nobody is listening anymore (e.g., the app is shutting down)
            debug!(event = ?e.0, "dropping event with no receiver");
        }
    }
}

pub(crate) fn event_channel() -> (EventSender, Receiver<DashboardEvent>) {
    let (tx, rx) = channel();
    (EventSender(tx), rx)
}
