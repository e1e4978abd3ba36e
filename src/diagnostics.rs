use anyhow::{Result, anyhow};

use crate::config::PickerConfig;
use crate::picker::state::TimeState;
use crate::picker::widget::TimeWidget;

pub fn run_check(config: &PickerConfig) -> Result<()> {
    let mut widget =
        TimeWidget::init_with_radius(Some(&config.value), config.dial_radius, || {});

    println!("Clockpick check");
    println!("Input value: '{}'", config.value);
    match config.value.parse::<TimeState>() {
        Ok(_) => println!("Parse: accepted"),
        Err(err) => println!("Parse: fell back to default ({err})"),
    }
    println!("Canonical value: {}", widget.value());
    let time24 = widget
        .state()
        .to_naive_time()
        .ok_or_else(|| anyhow!("state {} has no 24-hour equivalent", widget.value()))?;
    println!("24-hour: {}", time24.format("%H:%M"));

    let view = widget
        .view()
        .ok_or_else(|| anyhow!("widget did not mount a view"))?;
    let face = &view.clock_face;
    println!("Hand rotation: {:.0} deg", face.hand_rotation_deg);
    println!("Dial radius: {:.1}", face.radius);
    println!("Markers:");
    for marker in &face.markers {
        println!(
            "  {}{:>2}  angle {:>6.1}  x {:>8.2}  y {:>8.2}",
            if marker.selected { '*' } else { ' ' },
            marker.hour,
            marker.angle_deg,
            marker.offset.0,
            marker.offset.1,
        );
    }

    widget.teardown();
    Ok(())
}
