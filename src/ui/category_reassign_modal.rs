//! Modal dialog for moving an item to another category

use crate::theme;
use crate::types::{category_label, Category, InventoryItem};
use crate::ui::components;
use eframe::egui;

const MODAL_WIDTH: f32 = 400.0;

/// Per-frame inputs from the owner
#[derive(Debug, Clone, Copy, Default)]
pub struct ReassignProps<'a> {
    pub is_open: bool,
    pub item: Option<&'a InventoryItem>,
    pub current_category: Option<Category>,
    /// A reassignment is in flight; both actions are disabled
    pub is_reassigning: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReassignEvent {
    Reassign { item_id: i64, category: Category },
    Close,
}

enum BodyAction {
    Confirm,
    Close,
}

#[derive(Debug, Default)]
pub struct CategoryReassignModal {
    selected: Option<Category>,
    was_open: bool,
}

impl CategoryReassignModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<Category> {
        self.selected
    }

    /// Categories the user can pick: all but the current one
    pub fn options(props: &ReassignProps<'_>) -> Vec<Category> {
        Category::options_excluding(props.current_category)
    }

    pub fn select(&mut self, category: Option<Category>) {
        self.selected = category;
    }

    pub fn can_confirm(&self, props: &ReassignProps<'_>) -> bool {
        match self.selected {
            Some(category) => Some(category) != props.current_category && !props.is_reassigning,
            None => false,
        }
    }

    fn sync_open(&mut self, props: &ReassignProps<'_>) -> bool {
        let open = props.is_open && props.item.is_some();
        if open != self.was_open {
            // Selection starts empty on every open and is dropped on close
            self.selected = None;
            self.was_open = open;
        }
        open
    }

    pub fn confirm(&mut self, props: &ReassignProps<'_>) -> Option<ReassignEvent> {
        if !self.can_confirm(props) {
            return None;
        }
        let item = props.item?;
        let category = self.selected?;
        Some(ReassignEvent::Reassign {
            item_id: item.id,
            category,
        })
    }

    /// Clear the selection and tell the owner to hide the modal.
    /// Disabled while a reassignment is in flight.
    pub fn close(&mut self, is_reassigning: bool) -> Option<ReassignEvent> {
        if is_reassigning {
            return None;
        }
        self.selected = None;
        self.was_open = false;
        Some(ReassignEvent::Close)
    }

    pub fn show(&mut self, ctx: &egui::Context, props: &ReassignProps<'_>) -> Option<ReassignEvent> {
        if !self.sync_open(props) {
            return None;
        }
        let item = props.item?;

        let modal_area = egui::Modal::default_area(egui::Id::new("category_reassign_modal"))
            .default_width(MODAL_WIDTH + theme::SPACING_XL * 2.0);
        let modal_response = egui::Modal::new(egui::Id::new("category_reassign_modal"))
            .area(modal_area)
            .backdrop_color(egui::Color32::from_black_alpha(160))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_min_width(MODAL_WIDTH);
                ui.set_max_width(MODAL_WIDTH);
                self.render_body(ui, item, props)
            });

        match modal_response.inner {
            Some(BodyAction::Confirm) => self.confirm(props),
            Some(BodyAction::Close) => self.close(props.is_reassigning),
            None if modal_response.should_close() => self.close(props.is_reassigning),
            None => None,
        }
    }

    fn render_body(
        &mut self,
        ui: &mut egui::Ui,
        item: &InventoryItem,
        props: &ReassignProps<'_>,
    ) -> Option<BodyAction> {
        let mut action = None;

        if components::modal_header(
            ui,
            egui_phosphor::regular::ARROW_RIGHT,
            "Cambiar Categoría",
            !props.is_reassigning,
        ) {
            return Some(BodyAction::Close);
        }

        // Item info
        theme::section_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                components::item_icon_tile(ui, item.is_ersa());
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&item.nombre).size(theme::FONT_BODY).strong());
                    ui.label(
                        egui::RichText::new(format!("Código: {}", item.codigo))
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_MUTED),
                    );
                });
            });
        });
        ui.add_space(theme::SPACING_MD);

        components::field_label(ui, "Categoría Actual");
        components::category_badge(ui, props.current_category);
        ui.add_space(theme::SPACING_MD);

        components::field_label(ui, "Nueva Categoría *");
        let selected_text = match self.selected {
            Some(c) => format!("{}  {}", c.icon(), c.label()),
            None => "Seleccionar nueva categoría".to_string(),
        };
        let mut choice = self.selected();
        ui.add_enabled_ui(!props.is_reassigning, |ui| {
            egui::ComboBox::from_id_salt("reassign_new_category")
                .selected_text(selected_text)
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut choice, None, "Seleccionar nueva categoría");
                    for category in Self::options(props) {
                        ui.selectable_value(
                            &mut choice,
                            Some(category),
                            format!("{}  {}", category.icon(), category.label()),
                        );
                    }
                });
        });
        self.select(choice);

        if let Some(target) = self.selected {
            ui.add_space(theme::SPACING_SM);
            ui.label(
                egui::RichText::new(format!(
                    "{}  {}  {}",
                    category_label(props.current_category),
                    egui_phosphor::regular::ARROW_RIGHT,
                    target.label()
                ))
                .size(theme::FONT_SMALL)
                .color(theme::TEXT_DIM),
            );
        }

        ui.add_space(theme::SPACING_LG);
        ui.horizontal(|ui| {
            ui.set_min_height(theme::BUTTON_HEIGHT);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if props.is_reassigning {
                    "Cambiando...".to_string()
                } else {
                    format!("{}  Cambiar Categoría", egui_phosphor::regular::ARROW_RIGHT)
                };
                if ui.add_enabled(self.can_confirm(props), theme::button_accent(label)).clicked() {
                    action = Some(BodyAction::Confirm);
                }
                if props.is_reassigning {
                    ui.spinner();
                }
                ui.add_space(theme::SPACING_MD);
                if ui
                    .add_enabled(!props.is_reassigning, theme::button("Cancelar"))
                    .clicked()
                {
                    action = Some(BodyAction::Close);
                }
            });
        });

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewInventoryItem;

    fn item(id: i64, tipo: &str) -> InventoryItem {
        InventoryItem::from_new(
            id,
            NewInventoryItem {
                tipo: tipo.into(),
                nombre: "Filtro de aceite".into(),
                codigo: "F-200".into(),
                categoria: Some(Category::Filtros),
                ..NewInventoryItem::default()
            },
        )
    }

    fn props(item: &InventoryItem) -> ReassignProps<'_> {
        ReassignProps {
            is_open: true,
            item: Some(item),
            current_category: Some(Category::Filtros),
            is_reassigning: false,
        }
    }

    #[test]
    fn options_never_include_current_category() {
        let item = item(1, "Repuesto");
        let options = CategoryReassignModal::options(&props(&item));
        assert_eq!(options.len(), 12);
        assert!(!options.contains(&Category::Filtros));
    }

    #[test]
    fn confirm_disabled_without_a_different_selection() {
        let item = item(1, "Repuesto");
        let props = props(&item);
        let mut modal = CategoryReassignModal::new();
        modal.sync_open(&props);

        assert!(!modal.can_confirm(&props));
        assert_eq!(modal.confirm(&props), None);

        modal.select(Some(Category::Filtros));
        assert!(!modal.can_confirm(&props));
        assert_eq!(modal.confirm(&props), None);
    }

    #[test]
    fn confirm_emits_item_id_and_new_category() {
        let item = item(42, "Repuesto");
        let props = props(&item);
        let mut modal = CategoryReassignModal::new();
        modal.sync_open(&props);
        modal.select(Some(Category::Rodamientos));

        assert!(modal.can_confirm(&props));
        assert_eq!(
            modal.confirm(&props),
            Some(ReassignEvent::Reassign {
                item_id: 42,
                category: Category::Rodamientos
            })
        );
    }

    #[test]
    fn nothing_fires_while_reassigning() {
        let item = item(42, "Repuesto");
        let props = ReassignProps {
            is_reassigning: true,
            ..props(&item)
        };
        let mut modal = CategoryReassignModal::new();
        modal.sync_open(&props);
        modal.select(Some(Category::Rodamientos));

        assert!(!modal.can_confirm(&props));
        assert_eq!(modal.confirm(&props), None);
        assert_eq!(modal.close(true), None);
        assert_eq!(modal.selected(), Some(Category::Rodamientos));
    }

    #[test]
    fn close_emits_once_and_clears_selection() {
        let item = item(42, "Repuesto");
        let props = props(&item);
        let mut modal = CategoryReassignModal::new();
        modal.sync_open(&props);
        modal.select(Some(Category::Otros));

        assert_eq!(modal.close(false), Some(ReassignEvent::Close));
        assert_eq!(modal.selected(), None);

        modal.sync_open(&props);
        assert_eq!(modal.selected(), None);
    }

    #[test]
    fn selection_starts_empty_on_each_open() {
        let item = item(7, "Repuesto");
        let mut modal = CategoryReassignModal::new();
        modal.sync_open(&props(&item));
        modal.select(Some(Category::Otros));

        // Owner hides it without going through close()
        modal.sync_open(&ReassignProps::default());
        assert!(modal.sync_open(&props(&item)));
        assert_eq!(modal.selected(), None);
    }

    #[test]
    fn uncategorized_item_can_pick_any_category() {
        let item = item(3, "Repuesto");
        let props = ReassignProps {
            current_category: None,
            ..props(&item)
        };
        assert_eq!(CategoryReassignModal::options(&props).len(), 13);
        let mut modal = CategoryReassignModal::new();
        modal.select(Some(Category::Filtros));
        assert!(modal.can_confirm(&props));
    }

    #[test]
    fn hidden_without_item_or_flag() {
        let ctx = egui::Context::default();
        let item = item(1, "ERSA");
        let mut modal = CategoryReassignModal::new();
        let mut events = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            events.push(modal.show(ctx, &ReassignProps { item: None, ..props(&item) }));
            events.push(modal.show(ctx, &ReassignProps { is_open: false, ..props(&item) }));
        });
        assert!(events.iter().all(Option::is_none));
        assert!(!modal.was_open);
    }

    #[test]
    fn open_modal_renders_without_events() {
        let ctx = egui::Context::default();
        let item = item(1, "ERSA");
        let mut modal = CategoryReassignModal::new();
        let mut event = Some(ReassignEvent::Close);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            event = modal.show(ctx, &props(&item));
        });
        assert_eq!(event, None);
        assert!(modal.was_open);
    }

    fn escape_input() -> egui::RawInput {
        egui::RawInput {
            events: vec![egui::Event::Key {
                key: egui::Key::Escape,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn escape_closes_and_clears_selection() {
        let ctx = egui::Context::default();
        let item = item(42, "Repuesto");
        let props = props(&item);
        let mut modal = CategoryReassignModal::new();
        let mut events = Vec::new();

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            events.push(modal.show(ctx, &props));
        });
        modal.select(Some(Category::Rodamientos));
        let _ = ctx.run(escape_input(), |ctx| {
            events.push(modal.show(ctx, &props));
        });

        assert_eq!(events, vec![None, Some(ReassignEvent::Close)]);
        assert_eq!(modal.selected(), None);
        assert!(!modal.was_open);
    }

    #[test]
    fn escape_is_ignored_while_reassigning() {
        let ctx = egui::Context::default();
        let item = item(42, "Repuesto");
        let props = ReassignProps {
            is_reassigning: true,
            ..props(&item)
        };
        let mut modal = CategoryReassignModal::new();
        let mut events = Vec::new();

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            events.push(modal.show(ctx, &props));
        });
        modal.select(Some(Category::Rodamientos));
        let _ = ctx.run(escape_input(), |ctx| {
            events.push(modal.show(ctx, &props));
        });

        assert_eq!(events, vec![None, None]);
        assert_eq!(modal.selected(), Some(Category::Rodamientos));
        assert!(modal.was_open);
    }
}
