//! View rendering (top bar, inventory list, toast)

use super::store_ops::lock_store;
use super::App;
use crate::constants::{APP_NAME, TOAST_FADE_SECS, TOAST_VISIBLE_SECS};
use crate::theme;
use crate::types::{category_label, Category, InventoryItem};
use crate::ui::components::format_quantity;
use eframe::egui;

impl App {
    pub fn render_top_bar(&mut self, ctx: &egui::Context) {
        let (total, low_stock) = {
            let store = lock_store(&self.store);
            let items = store.items();
            (items.len(), items.iter().filter(|i| i.needs_reorder()).count())
        };

        egui::TopBottomPanel::top("top_bar")
            .exact_height(theme::TOP_BAR_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
                    .inner_margin(egui::Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(format!("{}  {}", egui_phosphor::regular::PACKAGE, APP_NAME))
                                .size(theme::FONT_TITLE)
                                .strong()
                                .color(theme::ACCENT),
                        )
                        .selectable(false),
                    );
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(format!("{} items · {} bajo pedido", total, low_stock))
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                    ui.add_space(theme::SPACING_XL);

                    // Search box with border style
                    egui::Frame::new()
                        .fill(theme::BG_INPUT)
                        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
                        .corner_radius(theme::RADIUS_DEFAULT)
                        .inner_margin(egui::Margin::symmetric(8, 5))
                        .show(ui, |ui| {
                            ui.spacing_mut().item_spacing.x = 4.0;
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS)
                                        .size(14.0)
                                        .color(theme::TEXT_DIM),
                                )
                                .selectable(false),
                            );
                            ui.add(
                                egui::TextEdit::singleline(&mut self.search_query)
                                    .hint_text("Buscar nombre / código...")
                                    .frame(false)
                                    .desired_width(260.0),
                            );
                            if !self.search_query.is_empty() {
                                let clear = ui.add(
                                    egui::Label::new(
                                        egui::RichText::new(egui_phosphor::regular::X)
                                            .size(12.0)
                                            .color(theme::TEXT_DIM),
                                    )
                                    .selectable(false)
                                    .sense(egui::Sense::click()),
                                );
                                if clear.clicked() {
                                    self.search_query.clear();
                                }
                            }
                        });

                    ui.add_space(theme::SPACING_LG);
                    if theme::settings_checkbox(ui, self.show_low_stock_only, "Solo bajo punto de pedido", true) {
                        self.show_low_stock_only = !self.show_low_stock_only;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let add = ui.add(theme::button_accent(format!(
                            "{}  Agregar Item",
                            egui_phosphor::regular::PLUS
                        )));
                        if add.clicked() {
                            self.open_add_modal(None);
                        }
                    });
                });
            });
    }

    pub fn render_inventory(&mut self, ui: &mut egui::Ui) {
        let groups = lock_store(&self.store).grouped(&self.search_query, self.show_low_stock_only);

        if groups.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("No hay items que coincidan").color(theme::TEXT_DIM));
            });
            return;
        }

        let mut add_to: Option<Option<Category>> = None;
        let mut reassign: Option<i64> = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (group_idx, group) in groups.iter().enumerate() {
                    if self.render_group_header(ui, group.category, group.items.len()) {
                        add_to = Some(group.category);
                    }

                    if group.items.is_empty() {
                        ui.label(
                            egui::RichText::new("Sin items")
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        );
                    } else if let Some(id) = render_item_table(ui, group_idx, &group.items) {
                        reassign = Some(id);
                    }
                    ui.add_space(theme::SPACING_LG);
                }
            });

        if let Some(category) = add_to {
            self.open_add_modal(category);
        }
        if let Some(id) = reassign {
            self.open_reassign_modal(id);
        }
    }

    /// Category title with count and a quick-add button. Returns true if add was clicked.
    fn render_group_header(&self, ui: &mut egui::Ui, category: Option<Category>, count: usize) -> bool {
        let (_, color) = theme::category_colors(category);
        let icon = category.map(Category::icon).unwrap_or(egui_phosphor::regular::QUESTION);
        let mut add_clicked = false;
        ui.horizontal(|ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(format!("{}  {}", icon, category_label(category)))
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(color),
                )
                .selectable(false),
            );
            ui.add(
                egui::Label::new(
                    egui::RichText::new(format!("({})", count))
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
            // Uncategorized items can only come from the toolbar button
            if category.is_some() {
                let add = ui
                    .add(theme::button(egui_phosphor::regular::PLUS).small())
                    .on_hover_text("Agregar item en esta categoría");
                add_clicked = add.clicked();
            }
        });
        ui.add_space(theme::SPACING_XS);
        add_clicked
    }

    pub fn render_toast(&mut self, ctx: &egui::Context) {
        // Bottom-right of central panel, visible then fade, pause on hover
        let (Some(msg), Some(panel_rect)) = (self.toast_message.clone(), self.central_panel_rect) else {
            return;
        };
        let total_duration = TOAST_VISIBLE_SECS + TOAST_FADE_SECS;
        let margin = 12.0;
        let toast_pos = egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin);
        let border = if self.toast_is_error { theme::STATUS_ERROR } else { theme::ACCENT };
        let icon = if self.toast_is_error {
            egui_phosphor::regular::WARNING
        } else {
            egui_phosphor::regular::CHECK_CIRCLE
        };

        let response = egui::Area::new(egui::Id::new("store_toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| {
                let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
                let alpha = if elapsed > TOAST_VISIBLE_SECS {
                    ((total_duration - elapsed) / TOAST_FADE_SECS).clamp(0.0, 1.0)
                } else {
                    1.0
                };

                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0x1a, 0x1a, 0x1e, (230.0 * alpha) as u8))
                    .stroke(egui::Stroke::new(
                        1.0,
                        egui::Color32::from_rgba_unmultiplied(border.r(), border.g(), border.b(), (100.0 * alpha) as u8),
                    ))
                    .corner_radius(theme::RADIUS_MEDIUM)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(format!("{}  {}", icon, msg)).color(
                            egui::Color32::from_rgba_unmultiplied(255, 255, 255, (255.0 * alpha) as u8),
                        ));
                    });
            });

        // Pause timer while hovering
        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        if elapsed >= total_duration {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}

/// Table of one category's items. Returns the id of the item whose category button was clicked.
fn render_item_table(ui: &mut egui::Ui, group_idx: usize, items: &[InventoryItem]) -> Option<i64> {
    use egui_extras::{Column, TableBuilder};

    let mut clicked = None;
    let header = |text: &str, ui: &mut egui::Ui| {
        ui.add(
            egui::Label::new(
                egui::RichText::new(text)
                    .size(theme::FONT_SMALL)
                    .strong()
                    .color(theme::TEXT_MUTED),
            )
            .selectable(false),
        );
    };

    theme::section_frame().show(ui, |ui| {
        TableBuilder::new(ui)
            .id_salt(("inventory_group", group_idx))
            .striped(false)
            .resizable(false)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(110.0).clip(true))
            .column(Column::remainder().at_least(160.0).clip(true))
            .column(Column::exact(100.0).clip(true))
            .column(Column::exact(100.0).clip(true))
            .column(Column::exact(110.0))
            .column(Column::exact(90.0))
            .column(Column::exact(40.0))
            .header(22.0, |mut row| {
                for title in ["CÓDIGO", "NOMBRE", "TIPO", "UBICACIÓN", "STOCK", "PTO. PEDIDO", ""] {
                    row.col(|ui| header(title, ui));
                }
            })
            .body(|mut body| {
                for item in items {
                    body.row(theme::ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(egui::RichText::new(&item.codigo).monospace().color(theme::TEXT_SECONDARY));
                        });
                        row.col(|ui| {
                            let text = if item.foto.is_some() {
                                format!("{}  {}", item.nombre, egui_phosphor::regular::IMAGE)
                            } else {
                                item.nombre.clone()
                            };
                            ui.label(egui::RichText::new(text).color(theme::TEXT_PRIMARY));
                        });
                        row.col(|ui| {
                            let (_, color) = theme::item_accent(item.is_ersa());
                            let color = if item.is_ersa() { color } else { theme::TEXT_MUTED };
                            ui.label(egui::RichText::new(&item.tipo).color(color));
                        });
                        row.col(|ui| {
                            ui.label(egui::RichText::new(&item.ubicacion).color(theme::TEXT_MUTED));
                        });
                        row.col(|ui| {
                            let stock = format_quantity(item.stock, &item.unidad);
                            if item.needs_reorder() {
                                ui.label(
                                    egui::RichText::new(format!("{}  {}", egui_phosphor::regular::WARNING, stock))
                                        .color(theme::STATUS_WARNING),
                                )
                                .on_hover_text("Stock en o bajo el punto de pedido");
                            } else {
                                ui.label(egui::RichText::new(stock).color(theme::STATUS_SUCCESS));
                            }
                        });
                        row.col(|ui| {
                            ui.label(
                                egui::RichText::new(format_quantity(item.punto_pedido, ""))
                                    .color(theme::TEXT_MUTED),
                            );
                        });
                        row.col(|ui| {
                            if reassign_button(ui) {
                                clicked = Some(item.id);
                            }
                        });
                    });
                }
            });
    });

    clicked
}

/// Small painted icon button on each row. Returns true if clicked.
fn reassign_button(ui: &mut egui::Ui) -> bool {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(26.0, 24.0), egui::Sense::click());
    let response = response.on_hover_text("Cambiar categoría");
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    let (fill, draw_rect) = theme::button_visual(&response, theme::BG_SURFACE, rect);
    ui.painter().rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
    ui.painter().text(
        draw_rect.center(),
        egui::Align2::CENTER_CENTER,
        egui_phosphor::regular::ARROW_RIGHT,
        egui::FontId::proportional(14.0),
        theme::TEXT_SECONDARY,
    );
    response.clicked()
}
