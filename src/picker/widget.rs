use crate::picker::state::{DEFAULT_DISPLAY, Meridiem, TimeState};
use crate::picker::view::{self, ClockView, DEFAULT_DIAL_RADIUS};

pub type ChangeCallback = Box<dyn FnMut()>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum WidgetEvent {
    CommitHour(String),
    CommitMinute(String),
    SelectMeridiem(Meridiem),
    SelectHour(u32),
    Cancel,
    Confirm,
}

// Every mutating event rebuilds the whole view.
pub struct TimeWidget {
    state: TimeState,
    view: Option<ClockView>,
    dial_radius: f32,
    on_change: ChangeCallback,
    renders: u64,
    acknowledgement: Option<String>,
}

impl TimeWidget {
    pub fn init(initial_value: Option<&str>, on_change: impl FnMut() + 'static) -> Self {
        Self::init_with_radius(initial_value, DEFAULT_DIAL_RADIUS, on_change)
    }

    pub fn init_with_radius(
        initial_value: Option<&str>,
        dial_radius: f32,
        on_change: impl FnMut() + 'static,
    ) -> Self {
        let state = TimeState::parse_or_default(non_empty(initial_value));
        log::debug!("time widget init with {}", state.display());
        let mut widget = Self {
            state,
            view: None,
            dial_radius,
            on_change: Box::new(on_change),
            renders: 0,
            acknowledgement: None,
        };
        widget.render();
        widget
    }

    /// Host-driven value push. Re-parses and rebuilds only when the value
    /// differs from the current display string; returns whether it did.
    pub fn on_external_update(&mut self, new_value: Option<&str>) -> bool {
        let new_value = non_empty(new_value).unwrap_or(DEFAULT_DISPLAY);
        if new_value == self.state.display() {
            return false;
        }

        self.state.apply_str(new_value);
        log::debug!("external update '{new_value}' -> {}", self.state.display());
        self.rebuild();
        true
    }

    pub fn value(&self) -> &str {
        self.state.display()
    }

    pub fn state(&self) -> &TimeState {
        &self.state
    }

    pub fn view(&self) -> Option<&ClockView> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut ClockView> {
        self.view.as_mut()
    }

    pub fn dial_radius(&self) -> f32 {
        self.dial_radius
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }

    pub fn is_mounted(&self) -> bool {
        self.view.is_some()
    }

    pub fn take_acknowledgement(&mut self) -> Option<String> {
        self.acknowledgement.take()
    }

    pub fn teardown(&mut self) {
        self.view = None;
        self.acknowledgement = None;
        log::debug!("time widget torn down at {}", self.state.display());
    }

    pub fn handle(&mut self, event: WidgetEvent) {
        if !self.is_mounted() {
            log::debug!("ignoring {event:?} on a torn-down widget");
            return;
        }

        match event {
            WidgetEvent::CommitHour(text) => {
                self.state.commit_hour_text(&text);
                self.notify();
                self.rebuild();
            }
            WidgetEvent::CommitMinute(text) => {
                self.state.commit_minute_text(&text);
                self.notify();
                self.rebuild();
            }
            WidgetEvent::SelectMeridiem(meridiem) => {
                if self.state.meridiem() == meridiem {
                    return;
                }
                self.state.set_meridiem(meridiem);
                self.notify();
                self.rebuild();
            }
            WidgetEvent::SelectHour(hour) => {
                self.state.set_hour(hour);
                self.notify();
                self.rebuild();
            }
            WidgetEvent::Cancel => {
                self.state.reset();
                self.rebuild();
            }
            WidgetEvent::Confirm => {
                let message = format!("Selected Time: {}", self.state.display());
                log::info!("{message}");
                self.acknowledgement = Some(message);
            }
        }
    }

    fn notify(&mut self) {
        log::debug!("time widget changed to {}", self.state.display());
        (self.on_change)();
    }

    fn rebuild(&mut self) {
        if self.is_mounted() {
            self.render();
        }
    }

    fn render(&mut self) {
        self.view = Some(view::build(&self.state, self.dial_radius));
        self.renders += 1;
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}
