//! Modal dialogs (add item, category reassign)
//!
//! Feeds the app-owned flags into the modals each frame and turns the
//! events they return into store operations.

use super::store_ops::lock_store;
use super::App;
use crate::types::Category;
use crate::ui::{AddItemEvent, AddItemProps, ReassignEvent, ReassignProps};
use eframe::egui;
use tracing::{debug, warn};

impl App {
    pub fn open_add_modal(&mut self, preselected: Option<Category>) {
        // The pending reply closes the add modal, so a new session waits for it
        if self.is_adding {
            debug!("Add in flight, not reopening add item modal");
            return;
        }
        debug!(preselected = ?preselected, "Opening add item modal");
        self.add_preselected = preselected;
        self.show_add_modal = true;
    }

    pub fn open_reassign_modal(&mut self, item_id: i64) {
        // Don't swap the target under an in-flight reassignment
        if self.is_reassigning {
            return;
        }
        let Some(item) = lock_store(&self.store).get(item_id).cloned() else {
            warn!(item_id, "Item vanished before reassign modal opened");
            return;
        };
        debug!(id = item.id, "Opening category reassign modal");
        self.reassign_target = Some(item);
        self.show_reassign_modal = true;
    }

    pub fn render_modals(&mut self, ctx: &egui::Context) {
        let add_props = AddItemProps {
            is_open: self.show_add_modal,
            is_adding: self.is_adding,
            preselected_category: self.add_preselected,
        };
        match self.add_modal.show(ctx, &add_props) {
            Some(AddItemEvent::Add(item)) => self.dispatch_add(ctx, item),
            Some(AddItemEvent::Close) => self.show_add_modal = false,
            None => {}
        }

        let target = self.reassign_target.clone();
        let reassign_props = ReassignProps {
            is_open: self.show_reassign_modal,
            item: target.as_ref(),
            current_category: target.as_ref().and_then(|i| i.categoria),
            is_reassigning: self.is_reassigning,
        };
        match self.reassign_modal.show(ctx, &reassign_props) {
            Some(ReassignEvent::Reassign { item_id, category }) => {
                self.dispatch_reassign(ctx, item_id, category)
            }
            Some(ReassignEvent::Close) => {
                self.show_reassign_modal = false;
                self.reassign_target = None;
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::store::InventoryStore;

    fn seeded_app() -> App {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        App::with_store(InventoryStore::seeded(), runtime, Settings::default(), std::env::temp_dir())
    }

    #[test]
    fn add_modal_remembers_preselected_category() {
        let mut app = seeded_app();
        app.open_add_modal(Some(Category::Electricos));
        assert!(app.show_add_modal);
        assert_eq!(app.add_preselected, Some(Category::Electricos));
    }

    #[test]
    fn reassign_modal_targets_stored_item() {
        let mut app = seeded_app();
        let id = lock_store(&app.store).items()[0].id;
        app.open_reassign_modal(id);
        assert!(app.show_reassign_modal);
        assert_eq!(app.reassign_target.as_ref().map(|i| i.id), Some(id));
    }

    #[test]
    fn unknown_item_does_not_open_reassign_modal() {
        let mut app = seeded_app();
        app.open_reassign_modal(9999);
        assert!(!app.show_reassign_modal);
        assert_eq!(app.reassign_target, None);
    }

    #[test]
    fn reassign_target_is_kept_while_in_flight() {
        let mut app = seeded_app();
        let (first, second) = {
            let store = lock_store(&app.store);
            (store.items()[0].id, store.items()[1].id)
        };
        app.open_reassign_modal(first);
        app.is_reassigning = true;
        app.open_reassign_modal(second);
        assert_eq!(app.reassign_target.as_ref().map(|i| i.id), Some(first));
    }
}
