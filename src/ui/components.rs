//! Reusable UI components
//!
//! Small widgets shared by the modals and the main list.

use crate::theme;
use crate::types::{category_label, Category};
use eframe::egui;

/// Format a quantity with its unit, dropping the decimals of whole numbers
pub fn format_quantity(value: f64, unidad: &str) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let number = if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        let s = format!("{:.2}", rounded);
        s.trim_end_matches('0').to_string()
    };
    if unidad.is_empty() {
        number
    } else {
        format!("{} {}", number, unidad)
    }
}

/// Modal title row with icon and close button. Returns true if close was clicked.
pub fn modal_header(ui: &mut egui::Ui, icon: &str, title: &str, close_enabled: bool) -> bool {
    let mut close_clicked = false;
    ui.horizontal(|ui| {
        ui.add(
            egui::Label::new(
                egui::RichText::new(format!("{}  {}", icon, title))
                    .size(theme::FONT_HEADING)
                    .strong(),
            )
            .selectable(false),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let close_size = 24.0;
            let sense = if close_enabled { egui::Sense::click() } else { egui::Sense::hover() };
            let (rect, response) = ui.allocate_exact_size(egui::vec2(close_size, close_size), sense);
            let close_color = if !close_enabled {
                theme::BORDER_DEFAULT
            } else if response.hovered() {
                ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                theme::STATUS_ERROR
            } else {
                theme::TEXT_DIM
            };
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::X,
                egui::FontId::proportional(16.0),
                close_color,
            );
            close_clicked = close_enabled && response.clicked();
        });
    });
    ui.add_space(theme::SPACING_SM);
    ui.separator();
    ui.add_space(theme::SPACING_SM);
    close_clicked
}

pub fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_MUTED),
        )
        .selectable(false),
    );
}

/// Inline validation message under a field
pub fn field_error(ui: &mut egui::Ui, message: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(format!("{}  {}", egui_phosphor::regular::WARNING, message))
                .size(theme::FONT_SMALL)
                .color(theme::STATUS_ERROR),
        )
        .wrap(),
    );
}

/// Single-line text input styled like the search box
pub fn text_input(
    ui: &mut egui::Ui,
    id: egui::Id,
    value: &mut String,
    hint: &str,
    has_error: bool,
) -> egui::Response {
    theme::input_frame(has_error)
        .show(ui, |ui| {
            ui.add(
                egui::TextEdit::singleline(value)
                    .id(id)
                    .hint_text(hint)
                    .frame(false)
                    .desired_width(ui.available_width())
                    .font(egui::FontId::proportional(theme::FONT_BODY)),
            )
        })
        .inner
}

/// Numeric input; any value is accepted so the form can report negatives
pub fn number_input(ui: &mut egui::Ui, id: egui::Id, value: &mut f64, has_error: bool) -> egui::Response {
    theme::input_frame(has_error)
        .show(ui, |ui| {
            ui.push_id(id, |ui| {
                ui.add_sized(
                    egui::vec2(ui.available_width(), 20.0),
                    egui::DragValue::new(value).speed(1.0).max_decimals(2),
                )
            })
            .inner
        })
        .inner
}

/// Colored pill with the category icon and label
pub fn category_badge(ui: &mut egui::Ui, category: Option<Category>) {
    let (bg, fg) = theme::category_colors(category);
    let text = match category {
        Some(c) => format!("{}  {}", c.icon(), c.label()),
        None => category_label(None).to_string(),
    };
    egui::Frame::new()
        .fill(bg)
        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, fg.gamma_multiply(0.4)))
        .corner_radius(theme::RADIUS_MEDIUM)
        .inner_margin(egui::Margin::symmetric(8, 3))
        .show(ui, |ui| {
            ui.add(
                egui::Label::new(egui::RichText::new(text).size(theme::FONT_LABEL).color(fg))
                    .selectable(false),
            );
        });
}

/// Square tile with a package icon, red for ERSA items
pub fn item_icon_tile(ui: &mut egui::Ui, is_ersa: bool) {
    let (bg, fg) = theme::item_accent(is_ersa);
    let size = theme::ICON_TILE_SIZE;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    ui.painter().rect_filled(rect, theme::RADIUS_LARGE, bg);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::PACKAGE,
        egui::FontId::proportional(20.0),
        fg,
    );
}
