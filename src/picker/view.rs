use crate::picker::state::{Meridiem, TimeState};

pub const DEFAULT_DIAL_RADIUS: f32 = 70.0;
const DEGREES_PER_HOUR: f32 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ClockView {
    pub time_input: TimeInputSection,
    pub clock_face: ClockFace,
    pub footer: [FooterAction; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeInputSection {
    pub hour_field: EditableField,
    pub minute_field: EditableField,
    pub toggles: [MeridiemToggle; 2],
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FieldKind {
    Hour,
    Minute,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditableField {
    pub kind: FieldKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MeridiemToggle {
    pub meridiem: Meridiem,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClockFace {
    pub radius: f32,
    pub hand_rotation_deg: f32,
    pub markers: Vec<HourMarker>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourMarker {
    pub hour: u32,
    pub angle_deg: f32,
    /// Offset from the dial centre, y pointing down.
    pub offset: (f32, f32),
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FooterAction {
    Cancel,
    Ok,
}

impl FooterAction {
    pub fn label(self) -> &'static str {
        match self {
            FooterAction::Cancel => "CANCEL",
            FooterAction::Ok => "OK",
        }
    }
}

pub fn build(state: &TimeState, dial_radius: f32) -> ClockView {
    ClockView {
        time_input: TimeInputSection {
            hour_field: EditableField {
                kind: FieldKind::Hour,
                text: state.hour_text(),
            },
            minute_field: EditableField {
                kind: FieldKind::Minute,
                text: state.minute_text(),
            },
            toggles: [Meridiem::Am, Meridiem::Pm].map(|meridiem| MeridiemToggle {
                meridiem,
                active: state.meridiem() == meridiem,
            }),
        },
        clock_face: ClockFace {
            radius: dial_radius,
            hand_rotation_deg: hand_rotation_deg(state.hour()),
            markers: (1..=12)
                .map(|hour| HourMarker {
                    hour,
                    angle_deg: marker_angle_deg(hour),
                    offset: marker_offset(hour, dial_radius),
                    selected: hour == state.hour(),
                })
                .collect(),
        },
        footer: [FooterAction::Cancel, FooterAction::Ok],
    }
}

pub fn hand_rotation_deg(hour: u32) -> f32 {
    hour as f32 * DEGREES_PER_HOUR
}

/// Angle of an hour marker with 3 o'clock at 0 degrees, normalised into
/// (-180, 180] so 12 o'clock sits at -90.
pub fn marker_angle_deg(hour: u32) -> f32 {
    let angle = (hour as f32 - 3.0) * DEGREES_PER_HOUR;
    if angle > 180.0 { angle - 360.0 } else { angle }
}

pub fn marker_offset(hour: u32, radius: f32) -> (f32, f32) {
    let radians = marker_angle_deg(hour).to_radians();
    (radians.cos() * radius, radians.sin() * radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn three_oclock_sits_on_positive_x_axis() {
        let (x, y) = marker_offset(3, DEFAULT_DIAL_RADIUS);
        assert_close(marker_angle_deg(3), 0.0);
        assert_close(x, DEFAULT_DIAL_RADIUS);
        assert_close(y, 0.0);
    }

    #[test]
    fn twelve_oclock_sits_above_centre() {
        let (x, y) = marker_offset(12, DEFAULT_DIAL_RADIUS);
        assert_close(marker_angle_deg(12), -90.0);
        assert_close(x, 0.0);
        assert_close(y, -DEFAULT_DIAL_RADIUS);
    }

    #[test]
    fn six_and_nine_follow_clock_geometry() {
        let (x6, y6) = marker_offset(6, 100.0);
        assert_close(x6, 0.0);
        assert_close(y6, 100.0);
        let (x9, y9) = marker_offset(9, 100.0);
        assert_close(x9, -100.0);
        assert_close(y9, 0.0);
    }

    #[test]
    fn hand_rotation_is_thirty_degrees_per_hour() {
        assert_close(hand_rotation_deg(1), 30.0);
        assert_close(hand_rotation_deg(7), 210.0);
        assert_close(hand_rotation_deg(12), 360.0);
    }

    #[test]
    fn build_marks_current_hour_and_meridiem() {
        let state: TimeState = "04:09 PM".parse().expect("valid");
        let view = build(&state, DEFAULT_DIAL_RADIUS);

        assert_eq!(view.time_input.hour_field.text, "04");
        assert_eq!(view.time_input.minute_field.text, "09");
        let active: Vec<_> = view
            .time_input
            .toggles
            .iter()
            .filter(|toggle| toggle.active)
            .map(|toggle| toggle.meridiem)
            .collect();
        assert_eq!(active, vec![Meridiem::Pm]);

        assert_eq!(view.clock_face.markers.len(), 12);
        let selected: Vec<_> = view
            .clock_face
            .markers
            .iter()
            .filter(|marker| marker.selected)
            .map(|marker| marker.hour)
            .collect();
        assert_eq!(selected, vec![4]);
        assert_close(view.clock_face.hand_rotation_deg, 120.0);
        assert_eq!(view.footer.map(FooterAction::label), ["CANCEL", "OK"]);
    }
}
