//! Modal dialog for creating a new inventory item
//!
//! The modal owns only its transient form state. Whoever shows it owns the
//! open/adding flags and decides what to do with the returned events.

use crate::constants::PHOTO_EXTENSIONS;
use crate::theme;
use crate::types::{category_label, validate, Category, FieldErrors, ItemField, NewInventoryItem};
use crate::ui::components;
use crate::utils::load_photo_texture;
use eframe::egui;
use std::path::Path;

const MODAL_WIDTH: f32 = 420.0;

/// Per-frame inputs from the owner
#[derive(Debug, Clone, Copy, Default)]
pub struct AddItemProps {
    pub is_open: bool,
    /// A submission is in flight; the submit control is disabled
    pub is_adding: bool,
    /// Locks the category and hides its selector
    pub preselected_category: Option<Category>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddItemEvent {
    Add(NewInventoryItem),
    Close,
}

/// What the user did in the modal body this frame
enum BodyAction {
    Submit,
    Close,
}

#[derive(Default)]
pub struct AddItemModal {
    form: NewInventoryItem,
    errors: FieldErrors,
    photo_preview: Option<egui::TextureHandle>,
    was_open: bool,
}

impl AddItemModal {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn form(&self) -> &NewInventoryItem {
        &self.form
    }

    #[cfg(test)]
    pub fn form_mut(&mut self) -> &mut NewInventoryItem {
        &mut self.form
    }

    #[cfg(test)]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn shows_category_selector(props: &AddItemProps) -> bool {
        props.preselected_category.is_none()
    }

    /// Seed fresh form state for a newly opened modal
    pub fn open(&mut self, preselected_category: Option<Category>) {
        self.form = NewInventoryItem::with_category(preselected_category);
        self.errors.clear();
        self.photo_preview = None;
        self.was_open = true;
    }

    fn reset(&mut self) {
        self.form = NewInventoryItem::default();
        self.errors.clear();
        self.photo_preview = None;
        self.was_open = false;
    }

    /// Track the owner's open flag; seeds state on the closed -> open edge and
    /// resets it on the open -> closed edge. Returns whether the modal is open.
    fn sync_open(&mut self, props: &AddItemProps) -> bool {
        match (self.was_open, props.is_open) {
            (false, true) => self.open(props.preselected_category),
            (true, false) => self.reset(),
            _ => {}
        }
        props.is_open
    }

    /// Validate and, when everything passes, hand the form to the owner.
    /// Never fires while a submission is in flight.
    pub fn submit(&mut self, props: &AddItemProps) -> Option<AddItemEvent> {
        if props.is_adding {
            return None;
        }
        if let Some(category) = props.preselected_category {
            self.form.categoria = Some(category);
        }
        self.errors = validate(&self.form);
        if !self.errors.is_empty() {
            return None;
        }
        Some(AddItemEvent::Add(self.form.clone()))
    }

    /// Discard the form and tell the owner to hide the modal
    pub fn close(&mut self) -> AddItemEvent {
        self.reset();
        AddItemEvent::Close
    }

    /// Forget the error of a field the user just edited
    pub fn field_edited(&mut self, field: ItemField) {
        self.errors.remove(&field);
    }

    pub fn set_photo(&mut self, ctx: &egui::Context, path: &Path) {
        self.photo_preview = load_photo_texture(ctx, path);
        self.form.foto = Some(path.to_string_lossy().to_string());
    }

    pub fn clear_photo(&mut self) {
        self.photo_preview = None;
        self.form.foto = None;
    }

    pub fn show(&mut self, ctx: &egui::Context, props: &AddItemProps) -> Option<AddItemEvent> {
        if !self.sync_open(props) {
            return None;
        }

        let modal_area = egui::Modal::default_area(egui::Id::new("add_item_modal"))
            .default_width(MODAL_WIDTH + theme::SPACING_XL * 2.0);
        let modal_response = egui::Modal::new(egui::Id::new("add_item_modal"))
            .area(modal_area)
            .backdrop_color(egui::Color32::from_black_alpha(160))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_min_width(MODAL_WIDTH);
                ui.set_max_width(MODAL_WIDTH);
                self.render_body(ui, props)
            });

        match modal_response.inner {
            Some(BodyAction::Submit) => self.submit(props),
            Some(BodyAction::Close) => Some(self.close()),
            None if modal_response.should_close() => Some(self.close()),
            None => None,
        }
    }

    fn render_body(&mut self, ui: &mut egui::Ui, props: &AddItemProps) -> Option<BodyAction> {
        let mut action = None;

        if components::modal_header(ui, egui_phosphor::regular::PLUS, "Agregar Nuevo Item", true) {
            return Some(BodyAction::Close);
        }

        let mut enter_pressed = false;
        enter_pressed |= self.text_row(ui, ItemField::Tipo, "Tipo", "Repuesto, Insumo, ERSA...");
        enter_pressed |= self.text_row(ui, ItemField::Nombre, "Nombre", "Texto breve");
        enter_pressed |= self.text_row(ui, ItemField::Codigo, "Código", "T-001");

        components::field_label(ui, "Ubicación");
        let id = ui.make_persistent_id("add_item_ubicacion");
        let resp = components::text_input(ui, id, &mut self.form.ubicacion, "Estante / pañol", false);
        enter_pressed |= submitted_with_enter(ui, &resp);
        ui.add_space(theme::SPACING_SM);

        ui.columns(3, |cols| {
            self.number_cell(&mut cols[0], ItemField::Stock, "Stock");
            enter_pressed |= self.text_row(&mut cols[1], ItemField::Unidad, "Unidad", "UNI");
            self.number_cell(&mut cols[2], ItemField::PuntoPedido, "Punto de pedido");
        });

        if AddItemModal::shows_category_selector(props) {
            self.category_selector(ui);
        } else {
            components::field_label(ui, "Categoría");
            components::category_badge(ui, props.preselected_category);
            ui.add_space(theme::SPACING_SM);
        }

        self.photo_row(ui);

        ui.add_space(theme::SPACING_LG);
        ui.horizontal(|ui| {
            ui.set_min_height(theme::BUTTON_HEIGHT);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if props.is_adding {
                    format!("{}  Agregando...", egui_phosphor::regular::PLUS)
                } else {
                    format!("{}  Agregar Item", egui_phosphor::regular::PLUS)
                };
                let submit = ui.add_enabled(!props.is_adding, theme::button_accent(label));
                if submit.clicked() {
                    action = Some(BodyAction::Submit);
                }
                if props.is_adding {
                    ui.spinner();
                }
                ui.add_space(theme::SPACING_MD);
                if ui.add(theme::button("Cancelar")).clicked() {
                    action = Some(BodyAction::Close);
                }
            });
        });

        if action.is_none() && enter_pressed {
            action = Some(BodyAction::Submit);
        }
        action
    }

    /// Labeled text field bound to a validated form field. Returns true on Enter.
    fn text_row(&mut self, ui: &mut egui::Ui, field: ItemField, label: &str, hint: &str) -> bool {
        components::field_label(ui, label);
        let id = ui.make_persistent_id(("add_item", field.key()));
        let has_error = self.errors.contains_key(&field);
        let value = match field {
            ItemField::Tipo => &mut self.form.tipo,
            ItemField::Nombre => &mut self.form.nombre,
            ItemField::Codigo => &mut self.form.codigo,
            ItemField::Unidad => &mut self.form.unidad,
            ItemField::Stock | ItemField::PuntoPedido => return false,
        };
        let resp = components::text_input(ui, id, value, hint, has_error);
        if resp.changed() {
            self.field_edited(field);
        }
        if let Some(message) = self.errors.get(&field) {
            components::field_error(ui, message);
        }
        ui.add_space(theme::SPACING_SM);
        submitted_with_enter(ui, &resp)
    }

    fn number_cell(&mut self, ui: &mut egui::Ui, field: ItemField, label: &str) {
        components::field_label(ui, label);
        let id = ui.make_persistent_id(("add_item", field.key()));
        let has_error = self.errors.contains_key(&field);
        let value = match field {
            ItemField::Stock => &mut self.form.stock,
            ItemField::PuntoPedido => &mut self.form.punto_pedido,
            _ => return,
        };
        if components::number_input(ui, id, value, has_error).changed() {
            self.field_edited(field);
        }
        if let Some(message) = self.errors.get(&field) {
            components::field_error(ui, message);
        }
    }

    fn category_selector(&mut self, ui: &mut egui::Ui) {
        components::field_label(ui, "Categoría (Opcional)");
        let selected_text = match self.form.categoria {
            Some(c) => format!("{}  {}", c.icon(), c.label()),
            None => "Seleccionar categoría (opcional)".to_string(),
        };
        egui::ComboBox::from_id_salt("add_item_categoria")
            .selected_text(selected_text)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.form.categoria, None, category_label(None));
                for category in Category::ALL {
                    ui.selectable_value(
                        &mut self.form.categoria,
                        Some(category),
                        format!("{}  {}", category.icon(), category.label()),
                    );
                }
            });
        ui.add_space(theme::SPACING_SM);
    }

    fn photo_row(&mut self, ui: &mut egui::Ui) {
        components::field_label(ui, "Foto (Opcional)");
        ui.horizontal(|ui| {
            let pick = ui.add(theme::button(format!(
                "{}  Elegir foto",
                egui_phosphor::regular::UPLOAD_SIMPLE
            )));
            if pick.clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Imagen", PHOTO_EXTENSIONS)
                    .pick_file()
                {
                    self.set_photo(ui.ctx(), &path);
                }
            }
            if self.form.foto.is_some() {
                let remove = ui.add(theme::button(format!("{}  Quitar", egui_phosphor::regular::TRASH)));
                if remove.clicked() {
                    self.clear_photo();
                }
            }
        });

        if let Some(path) = &self.form.foto {
            let name = Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.clone());
            ui.label(
                egui::RichText::new(format!("{}  {}", egui_phosphor::regular::IMAGE, name))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );
        }
        if let Some(texture) = &self.photo_preview {
            ui.add(
                egui::Image::new(texture)
                    .max_height(96.0)
                    .max_width(MODAL_WIDTH)
                    .corner_radius(theme::RADIUS_DEFAULT),
            );
        }
    }
}

fn submitted_with_enter(ui: &egui::Ui, resp: &egui::Response) -> bool {
    resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_props(preselected_category: Option<Category>) -> AddItemProps {
        AddItemProps {
            is_open: true,
            is_adding: false,
            preselected_category,
        }
    }

    fn opened(preselected_category: Option<Category>) -> AddItemModal {
        let mut modal = AddItemModal::new();
        assert!(modal.sync_open(&open_props(preselected_category)));
        modal
    }

    fn fill_valid(modal: &mut AddItemModal) {
        let form = modal.form_mut();
        form.tipo = "Repuesto".into();
        form.nombre = "Tornillo M6".into();
        form.codigo = "T-001".into();
        form.stock = 10.0;
        form.unidad = "UNI".into();
        form.punto_pedido = 5.0;
    }

    #[test]
    fn opening_seeds_defaults() {
        let modal = opened(None);
        assert_eq!(modal.form(), &NewInventoryItem::default());
        assert!(modal.errors().is_empty());
    }

    #[test]
    fn valid_form_emits_one_add_with_defaults() {
        let mut modal = opened(None);
        fill_valid(&mut modal);

        let event = modal.submit(&open_props(None));
        let expected = NewInventoryItem {
            tipo: "Repuesto".into(),
            nombre: "Tornillo M6".into(),
            codigo: "T-001".into(),
            ubicacion: String::new(),
            stock: 10.0,
            unidad: "UNI".into(),
            punto_pedido: 5.0,
            foto: None,
            categoria: None,
        };
        assert_eq!(event, Some(AddItemEvent::Add(expected)));
        assert!(modal.errors().is_empty());
    }

    #[test]
    fn successful_submit_keeps_the_form() {
        let mut modal = opened(None);
        fill_valid(&mut modal);
        modal.submit(&open_props(None));
        assert_eq!(modal.form().codigo, "T-001");
    }

    #[test]
    fn blank_required_fields_block_submission() {
        for field in [ItemField::Tipo, ItemField::Nombre, ItemField::Codigo, ItemField::Unidad] {
            let mut modal = opened(None);
            fill_valid(&mut modal);
            let form = modal.form_mut();
            match field {
                ItemField::Tipo => form.tipo = "  ".into(),
                ItemField::Nombre => form.nombre = String::new(),
                ItemField::Codigo => form.codigo = "\t".into(),
                ItemField::Unidad => form.unidad = " ".into(),
                _ => unreachable!(),
            }
            assert_eq!(modal.submit(&open_props(None)), None);
            assert!(modal.errors().contains_key(&field), "{:?}", field);
        }
    }

    #[test]
    fn negative_numbers_block_submission() {
        let mut modal = opened(None);
        fill_valid(&mut modal);
        modal.form_mut().stock = -1.0;
        assert_eq!(modal.submit(&open_props(None)), None);
        assert_eq!(modal.errors().get(&ItemField::Stock), Some(&"El stock no puede ser negativo"));

        let mut modal = opened(None);
        fill_valid(&mut modal);
        modal.form_mut().punto_pedido = -1.0;
        assert_eq!(modal.submit(&open_props(None)), None);
        assert!(modal.errors().contains_key(&ItemField::PuntoPedido));
    }

    #[test]
    fn fixing_a_field_then_resubmitting_succeeds() {
        let mut modal = opened(None);
        fill_valid(&mut modal);
        modal.form_mut().nombre.clear();
        assert_eq!(modal.submit(&open_props(None)), None);

        modal.form_mut().nombre = "Tornillo M6".into();
        modal.field_edited(ItemField::Nombre);
        assert!(modal.errors().is_empty());
        assert!(matches!(modal.submit(&open_props(None)), Some(AddItemEvent::Add(_))));
    }

    #[test]
    fn preselected_category_hides_selector_and_is_submitted() {
        let props = open_props(Some(Category::Filtros));
        assert!(!AddItemModal::shows_category_selector(&props));
        assert!(AddItemModal::shows_category_selector(&open_props(None)));

        let mut modal = opened(Some(Category::Filtros));
        assert_eq!(modal.form().categoria, Some(Category::Filtros));
        fill_valid(&mut modal);
        // Locked even if the state was touched
        modal.form_mut().categoria = Some(Category::Otros);

        match modal.submit(&props) {
            Some(AddItemEvent::Add(item)) => assert_eq!(item.categoria, Some(Category::Filtros)),
            other => panic!("expected add, got {:?}", other),
        }
    }

    #[test]
    fn nothing_fires_while_adding() {
        let mut modal = opened(None);
        fill_valid(&mut modal);
        let props = AddItemProps {
            is_adding: true,
            ..open_props(None)
        };
        assert_eq!(modal.submit(&props), None);
        assert!(modal.errors().is_empty());
    }

    #[test]
    fn close_emits_once_and_resets_state() {
        let mut modal = opened(None);
        modal.form_mut().nombre = "borrador".into();
        modal.submit(&open_props(None));
        assert!(!modal.errors().is_empty());

        assert_eq!(modal.close(), AddItemEvent::Close);
        assert!(modal.errors().is_empty());
        assert_eq!(modal.form(), &NewInventoryItem::default());

        // Next open starts clean, with the new preselection
        modal.sync_open(&open_props(Some(Category::Rodamientos)));
        assert_eq!(modal.form().nombre, "");
        assert_eq!(modal.form().categoria, Some(Category::Rodamientos));
    }

    #[test]
    fn owner_closing_resets_state() {
        let mut modal = opened(None);
        modal.form_mut().codigo = "X".into();
        assert!(!modal.sync_open(&AddItemProps::default()));
        assert!(modal.sync_open(&open_props(None)));
        assert_eq!(modal.form().codigo, "");
    }

    #[test]
    fn clearing_photo_drops_the_reference() {
        let mut modal = opened(None);
        modal.form_mut().foto = Some("/tmp/foto.png".into());
        modal.clear_photo();
        assert_eq!(modal.form().foto, None);
    }

    #[test]
    fn closed_modal_renders_nothing() {
        let ctx = egui::Context::default();
        let mut modal = AddItemModal::new();
        let mut event = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            event = modal.show(ctx, &AddItemProps::default());
        });
        assert_eq!(event, None);
        assert_eq!(modal.form(), &NewInventoryItem::default());
    }

    #[test]
    fn open_modal_renders_without_events() {
        let ctx = egui::Context::default();
        let mut modal = AddItemModal::new();
        let props = open_props(Some(Category::Filtros));
        let mut event = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            event = modal.show(ctx, &props);
        });
        assert_eq!(event, None);
        assert_eq!(modal.form().categoria, Some(Category::Filtros));
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
    fn escape_closes_once_and_resets_state() {
        let ctx = egui::Context::default();
        let mut modal = AddItemModal::new();
        let props = open_props(None);
        let mut events = Vec::new();

        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            events.extend(modal.show(ctx, &props));
        });
        assert!(events.is_empty());
        modal.form_mut().nombre = "borrador".into();
        modal.submit(&props);
        assert!(!modal.errors().is_empty());

        let _ = ctx.run(escape_input(), |ctx| {
            events.extend(modal.show(ctx, &props));
        });
        assert_eq!(events, vec![AddItemEvent::Close]);
        assert_eq!(modal.form(), &NewInventoryItem::default());
        assert!(modal.errors().is_empty());
        assert!(!modal.was_open);
    }

    #[test]
    fn escape_while_adding_still_closes() {
        let ctx = egui::Context::default();
        let mut modal = AddItemModal::new();
        let props = AddItemProps {
            is_adding: true,
            ..open_props(Some(Category::Filtros))
        };
        let mut events = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            events.extend(modal.show(ctx, &props));
        });
        let _ = ctx.run(escape_input(), |ctx| {
            events.extend(modal.show(ctx, &props));
        });
        assert_eq!(events, vec![AddItemEvent::Close]);
    }
}
