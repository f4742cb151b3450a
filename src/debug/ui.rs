//! egui front end for [`DebugPanel`]. Every edit goes through the panel, so
//! clamping, snapping and change callbacks behave the same as scripted edits.

use log::warn;

use crate::math::Color;

use super::{DebugPanel, Property, PropertyKind, PropertyValue};

/// Draw the panel as a floating window in the top-right corner
pub fn show_window<T>(ctx: &egui::Context, panel: &DebugPanel<T>, target: &mut T) {
    egui::Window::new(panel.title())
        .title_bar(true)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .default_width(240.0)
        .show(ctx, |ui| show(ui, panel, target));
}

/// Draw top-level properties, then one collapsing section per folder
pub fn show<T>(ui: &mut egui::Ui, panel: &DebugPanel<T>, target: &mut T) {
    for property in panel.properties().iter().filter(|p| p.folder.is_none()) {
        property_row(ui, panel, property, target);
    }

    for folder in panel.folders() {
        egui::CollapsingHeader::new(folder).default_open(true).show(ui, |ui| {
            for property in panel.properties().iter().filter(|p| p.folder.as_deref() == Some(folder)) {
                property_row(ui, panel, property, target);
            }
        });
    }
}

fn property_row<T>(ui: &mut egui::Ui, panel: &DebugPanel<T>, property: &Property<T>, target: &mut T) {
    let label = property.label.as_str();
    let edited = match property.kind {
        PropertyKind::Number { min, max, step } => {
            let mut value = panel.get(target, label).ok().and_then(PropertyValue::as_number).unwrap_or(min);
            let mut slider = egui::Slider::new(&mut value, min..=max).text(label);
            if step > 0.0 {
                slider = slider.step_by(step as f64);
            }
            ui.add(slider).changed().then_some(PropertyValue::Number(value))
        }
        PropertyKind::Color => {
            let current = panel.get(target, label).ok().and_then(PropertyValue::as_color).unwrap_or_default();
            let mut rgb = current.to_array();
            let changed = ui
                .horizontal(|ui| {
                    let changed = ui.color_edit_button_rgb(&mut rgb).changed();
                    ui.label(label);
                    changed
                })
                .inner;
            changed.then(|| PropertyValue::Color(Color::from_array(rgb)))
        }
        PropertyKind::Toggle => {
            let mut checked = panel.get(target, label).ok().and_then(PropertyValue::as_bool).unwrap_or(false);
            ui.checkbox(&mut checked, label).changed().then_some(PropertyValue::Bool(checked))
        }
        PropertyKind::Action => {
            if ui.button(label).clicked() {
                if let Err(err) = panel.trigger(target, label) {
                    warn!("debug action failed: {err}");
                }
            }
            None
        }
    };

    if let Some(value) = edited {
        if let Err(err) = panel.set(target, label, value) {
            warn!("debug edit rejected: {err}");
        }
    }
}
