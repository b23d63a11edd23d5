use crate::frame::Frame;

/// Subsystem an event originated from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    Focus,
    Camera,
    Terminal,
    Input,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Focus => "focus",
            Channel::Camera => "camera",
            Channel::Terminal => "terminal",
            Channel::Input => "input",
        }
    }
}

/// A recorded scene event, for traces and replay diffs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub channel: Channel,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame: Frame, channel: Channel, message: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            channel,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn on_channel(&self, channel: Channel) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter().filter(move |e| e.channel == channel)
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{Channel, EventBus};
    use crate::frame::Frame;

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        let f = Frame::first().advance(0.1).advance(0.1);
        bus.emit(f, Channel::Focus, "hello");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].frame_index, 2);
    }

    #[test]
    fn filters_by_channel() {
        let mut bus = EventBus::new();
        bus.emit(Frame::first(), Channel::Focus, "a");
        bus.emit(Frame::first(), Channel::Terminal, "b");
        bus.emit(Frame::first(), Channel::Focus, "c");
        let msgs: Vec<_> = bus
            .on_channel(Channel::Focus)
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(msgs, vec!["a", "c"]);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Frame::first(), Channel::Input, "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
    }
}
