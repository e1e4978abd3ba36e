use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use eframe::egui::{self, Color32, RichText, TextEdit, TopBottomPanel, Ui};

use crate::config::{PickerConfig, save_picker_config};
use crate::picker::widget::TimeWidget;
use crate::ui::render;

pub fn run_gui(config: PickerConfig, config_path: PathBuf) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Clockpick")
            .with_inner_size([620.0, 460.0])
            .with_min_inner_size([520.0, 400.0]),
        ..Default::default()
    };

    let app = PickerApp::new(config, config_path);

    eframe::run_native(
        "Clockpick",
        native_options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow!("failed to launch Clockpick GUI: {err}"))?;

    Ok(())
}

fn configure_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(Color32::from_rgb(226, 234, 246));
    visuals.panel_fill = Color32::from_rgb(8, 16, 26);
    visuals.window_fill = Color32::from_rgb(12, 20, 32);
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(10, 18, 30);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(16, 24, 38);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(26, 42, 62);
    visuals.widgets.active.bg_fill = Color32::from_rgb(34, 60, 88);
    visuals.selection.bg_fill = Color32::from_rgb(43, 148, 178);
    ctx.set_visuals(visuals);
}

struct PickerApp {
    widget: TimeWidget,
    changed: Rc<Cell<bool>>,
    field_value: String,
    external_input: String,
    config: PickerConfig,
    config_path: PathBuf,
    status_message: Option<(String, Instant)>,
    acknowledgement: Option<String>,
}

impl PickerApp {
    fn new(config: PickerConfig, config_path: PathBuf) -> Self {
        let changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&changed);
        let widget =
            TimeWidget::init_with_radius(Some(&config.value), config.dial_radius, move || {
                flag.set(true)
            });
        log::info!(
            "hosting time widget with field '{}' (canonical {})",
            config.value,
            widget.value()
        );

        Self {
            field_value: config.value.clone(),
            external_input: widget.value().to_string(),
            widget,
            changed,
            config,
            config_path,
            status_message: None,
            acknowledgement: None,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, ttl: Duration) {
        self.status_message = Some((text.into(), Instant::now() + ttl));
    }

    fn persist_field(&mut self) -> Result<()> {
        if !self.config.persist {
            return Ok(());
        }
        self.config.value = self.field_value.clone();
        save_picker_config(&self.config_path, &self.config)?;
        log::info!(
            "saved field {} to {}",
            self.field_value,
            self.config_path.display()
        );
        Ok(())
    }

    fn persist_or_report(&mut self) -> bool {
        match self.persist_field() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("persist failed: {err:#}");
                self.set_status(format!("Persist failed: {err}"), Duration::from_secs(4));
                false
            }
        }
    }

    fn collect_outputs(&mut self) {
        if !self.changed.replace(false) {
            return;
        }
        self.field_value = self.widget.value().to_string();
        self.external_input = self.field_value.clone();
        self.persist_or_report();
    }

    // The form writing its field and pushing it into the widget.
    fn push_external_value(&mut self) {
        let input = self.external_input.clone();
        let rebuilt = self.widget.on_external_update(Some(&input));
        self.field_value = input;
        if !self.persist_or_report() {
            return;
        }
        let text = if rebuilt {
            format!("Widget re-parsed '{}' -> {}", self.field_value, self.widget.value())
        } else {
            "Value unchanged, widget left as is.".to_string()
        };
        self.set_status(text, Duration::from_secs(3));
    }

    fn show_header(&mut self, ui: &mut Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label(
                RichText::new("Clockpick")
                    .size(24.0)
                    .color(Color32::from_rgb(96, 228, 206))
                    .strong(),
            );
            ui.separator();
            ui.label(
                RichText::new(format!("Field: {}", self.field_value))
                    .size(20.0)
                    .color(Color32::from_rgb(255, 214, 117))
                    .strong(),
            );
            if let Some(time) = self.widget.state().to_naive_time() {
                ui.label(
                    RichText::new(format!("24h {}", time.format("%H:%M")))
                        .size(16.0)
                        .color(Color32::from_rgb(169, 188, 209)),
                );
            }
        });
        if let Some((msg, _)) = &self.status_message {
            ui.label(
                RichText::new(msg)
                    .color(Color32::from_rgb(111, 228, 134))
                    .strong(),
            );
        }
    }

    fn show_host_controls(&mut self, ui: &mut Ui) {
        ui.heading(
            RichText::new("Host Field")
                .color(Color32::from_rgb(104, 221, 205))
                .strong(),
        );
        ui.separator();
        ui.label("Push a value into the widget as the form would:");
        ui.add(TextEdit::singleline(&mut self.external_input).desired_width(140.0));
        if ui.button("Update widget").clicked() {
            self.push_external_value();
        }

        ui.add_space(8.0);
        ui.label(
            RichText::new(format!("Renders: {}", self.widget.render_count()))
                .monospace()
                .color(Color32::from_rgb(180, 190, 204)),
        );
        ui.label(
            RichText::new(format!("Dial radius: {:.1}", self.widget.dial_radius()))
                .monospace()
                .color(Color32::from_rgb(180, 190, 204)),
        );
        ui.label(
            RichText::new(if self.config.persist {
                format!("Persisting to {}", self.config_path.display())
            } else {
                "Persistence disabled".to_string()
            })
            .color(Color32::from_rgb(161, 180, 201)),
        );
    }

    fn show_acknowledgement(&mut self, ctx: &egui::Context) {
        let Some(message) = self.acknowledgement.clone() else {
            return;
        };
        let mut close = false;
        egui::Window::new("Time Picker")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(RichText::new(message).size(18.0).strong());
                ui.add_space(6.0);
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        if close {
            self.acknowledgement = None;
        }
    }
}

impl eframe::App for PickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some((_, expires_at)) = &self.status_message
            && Instant::now() >= *expires_at
        {
            self.status_message = None;
        }

        TopBottomPanel::top("header")
            .resizable(false)
            .show(ctx, |ui| self.show_header(ui));

        egui::SidePanel::right("host_panel")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| self.show_host_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let events = match self.widget.view_mut() {
                Some(view) => render::draw(ui, view),
                None => Vec::new(),
            };
            for event in events {
                self.widget.handle(event);
            }
        });

        self.collect_outputs();
        if let Some(message) = self.widget.take_acknowledgement() {
            self.acknowledgement = Some(message);
        }
        self.show_acknowledgement(ctx);

        if let Some((_, expires_at)) = &self.status_message {
            ctx.request_repaint_after(expires_at.saturating_duration_since(Instant::now()));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.widget.teardown();
        log::info!("closing with field {}", self.field_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_picker_config;

    fn app_in(dir: &tempfile::TempDir, value: &str) -> (PickerApp, PathBuf) {
        let path = dir.path().join("timepicker.json");
        let config = PickerConfig {
            value: value.to_string(),
            ..PickerConfig::default()
        };
        (PickerApp::new(config, path.clone()), path)
    }

    #[test]
    fn pushed_value_is_persisted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (mut app, path) = app_in(&dir, "07:00 AM");

        app.external_input = "09:15 PM".to_string();
        app.push_external_value();

        assert_eq!(app.widget.value(), "09:15 PM");
        assert_eq!(app.field_value, "09:15 PM");
        let saved = load_picker_config(&path).expect("saved config");
        assert_eq!(saved.value, "09:15 PM");
    }

    #[test]
    fn pushed_value_is_not_written_when_persistence_is_off() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (mut app, path) = app_in(&dir, "07:00 AM");
        app.config.persist = false;

        app.external_input = "10:00 AM".to_string();
        app.push_external_value();

        assert_eq!(app.field_value, "10:00 AM");
        assert!(!path.exists());
    }

    #[test]
    fn widget_edits_are_collected_and_persisted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (mut app, path) = app_in(&dir, "03:30 PM");

        app.widget.handle(crate::picker::widget::WidgetEvent::SelectHour(5));
        app.collect_outputs();

        assert_eq!(app.field_value, "05:30 PM");
        assert_eq!(app.external_input, "05:30 PM");
        let saved = load_picker_config(&path).expect("saved config");
        assert_eq!(saved.value, "05:30 PM");
    }
}
