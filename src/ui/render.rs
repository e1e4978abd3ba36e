use eframe::egui::{
    self, Align, Align2, Color32, FontId, Key, Layout, Rect, RichText, Sense, Stroke, TextEdit,
    Ui, Vec2,
};

use crate::picker::view::{
    ClockFace, ClockView, EditableField, FieldKind, FooterAction, TimeInputSection,
};
use crate::picker::widget::WidgetEvent;

const DIAL_BG: Color32 = Color32::from_rgb(16, 24, 34);
const DIAL_RIM: Color32 = Color32::from_rgb(68, 98, 122);
const HAND: Color32 = Color32::from_rgb(255, 204, 96);
const ACCENT: Color32 = Color32::from_rgb(89, 204, 184);
const MARKER_TEXT: Color32 = Color32::from_rgb(226, 234, 246);
const MARKER_HOVER: Color32 = Color32::from_rgb(34, 60, 88);
const MUTED: Color32 = Color32::from_rgb(150, 171, 191);

const MARKER_RADIUS: f32 = 15.0;
const DIAL_PADDING: f32 = 10.0;

pub fn draw(ui: &mut Ui, view: &mut ClockView) -> Vec<WidgetEvent> {
    let mut events = Vec::new();
    ui.vertical_centered(|ui| {
        draw_time_input(ui, &mut view.time_input, &mut events);
        ui.add_space(10.0);
        draw_clock_face(ui, &view.clock_face, &mut events);
        ui.add_space(10.0);
    });
    draw_footer(ui, &view.footer, &mut events);
    events
}

fn draw_time_input(ui: &mut Ui, section: &mut TimeInputSection, events: &mut Vec<WidgetEvent>) {
    ui.horizontal(|ui| {
        draw_editable(ui, &mut section.hour_field, events);
        ui.label(RichText::new(":").size(26.0).color(MUTED).strong());
        draw_editable(ui, &mut section.minute_field, events);

        ui.add_space(12.0);
        for toggle in &section.toggles {
            let text = RichText::new(toggle.meridiem.label()).size(18.0).strong();
            let text = if toggle.active { text.color(ACCENT) } else { text };
            if ui.selectable_label(toggle.active, text).clicked() && !toggle.active {
                events.push(WidgetEvent::SelectMeridiem(toggle.meridiem));
            }
        }
    });
}

#[derive(Debug, Clone, Default)]
struct FieldFocus {
    focused: bool,
    origin: String,
}

// Enter, Tab and clicking elsewhere all drop focus and commit. Escape drops
// focus too but restores the text the field had when it was focused.
fn draw_editable(ui: &mut Ui, field: &mut EditableField, events: &mut Vec<WidgetEvent>) {
    let response = ui.add(
        TextEdit::singleline(&mut field.text)
            .font(FontId::monospace(26.0))
            .desired_width(40.0),
    );

    // Tab hands focus over after this field has drawn, so the loss is only
    // visible on the next frame. Track it here instead of `lost_focus()`.
    let focus_id = response.id.with("field_focus");
    let mut focus: FieldFocus = ui.data(|d| d.get_temp(focus_id)).unwrap_or_default();
    let has_focus = response.has_focus();

    if has_focus && !focus.focused {
        focus.origin = field.text.clone();
    } else if !has_focus && focus.focused {
        if ui.input(|i| i.key_pressed(Key::Escape)) {
            field.text = std::mem::take(&mut focus.origin);
        } else {
            let text = field.text.clone();
            events.push(match field.kind {
                FieldKind::Hour => WidgetEvent::CommitHour(text),
                FieldKind::Minute => WidgetEvent::CommitMinute(text),
            });
        }
    }
    focus.focused = has_focus;
    ui.data_mut(|d| d.insert_temp(focus_id, focus));
}

fn draw_clock_face(ui: &mut Ui, face: &ClockFace, events: &mut Vec<WidgetEvent>) {
    let size = (face.radius + MARKER_RADIUS + DIAL_PADDING) * 2.0;
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();

    painter.circle_filled(center, size / 2.0, DIAL_BG);
    painter.circle_stroke(center, size / 2.0 - 1.0, Stroke::new(1.5, DIAL_RIM));

    // The hand rotates clockwise from 12 o'clock.
    let hand_angle = (face.hand_rotation_deg - 90.0).to_radians();
    let hand_end = center + Vec2::angled(hand_angle) * (face.radius - MARKER_RADIUS);
    painter.line_segment([center, hand_end], Stroke::new(2.0, HAND));
    painter.circle_filled(center, 4.0, HAND);

    for marker in &face.markers {
        let pos = center + Vec2::new(marker.offset.0, marker.offset.1);
        let hit_rect = Rect::from_center_size(pos, Vec2::splat(MARKER_RADIUS * 2.0));
        let response = ui.interact(
            hit_rect,
            ui.id().with(("hour_marker", marker.hour)),
            Sense::click(),
        );

        if marker.selected {
            painter.circle_filled(pos, MARKER_RADIUS, HAND.linear_multiply(0.6));
        } else if response.hovered() {
            painter.circle_filled(pos, MARKER_RADIUS, MARKER_HOVER);
        }
        painter.text(
            pos,
            Align2::CENTER_CENTER,
            marker.hour.to_string(),
            FontId::monospace(14.0),
            if marker.selected { Color32::BLACK } else { MARKER_TEXT },
        );

        if response.clicked() {
            events.push(WidgetEvent::SelectHour(marker.hour));
        }
    }
}

fn draw_footer(ui: &mut Ui, actions: &[FooterAction], events: &mut Vec<WidgetEvent>) {
    ui.horizontal(|ui| {
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            // Added in reverse so CANCEL ends up left of OK.
            for action in actions.iter().rev() {
                let button = match action {
                    FooterAction::Ok => egui::Button::new(RichText::new(action.label()).strong())
                        .fill(Color32::from_rgb(22, 78, 89)),
                    FooterAction::Cancel => {
                        egui::Button::new(RichText::new(action.label()).color(MUTED))
                    }
                };
                if ui.add(button.min_size(egui::vec2(80.0, 26.0))).clicked() {
                    events.push(match action {
                        FooterAction::Cancel => WidgetEvent::Cancel,
                        FooterAction::Ok => WidgetEvent::Confirm,
                    });
                }
            }
        });
    });
}
