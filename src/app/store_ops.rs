//! Store operations run in the background
//!
//! Each operation waits out the configured latency on the runtime, applies
//! the change to the shared store and sends the outcome back to the UI
//! thread, which drains replies at the start of every frame.

use super::App;
use crate::store::{InventoryStore, StoreError};
use crate::types::{Category, InventoryItem, NewInventoryItem};
use eframe::egui;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// Outcome of a background store operation
#[derive(Debug)]
pub enum StoreReply {
    Added(Result<InventoryItem, StoreError>),
    Reassigned(Result<InventoryItem, StoreError>),
}

pub(crate) fn lock_store(store: &Mutex<InventoryStore>) -> MutexGuard<'_, InventoryStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

impl App {
    /// Start creating an item. Ignored while another add is in flight.
    pub fn dispatch_add(&mut self, ctx: &egui::Context, item: NewInventoryItem) {
        if self.is_adding {
            return;
        }
        self.is_adding = true;
        info!(codigo = %item.codigo, categoria = ?item.categoria, "Adding inventory item");

        let store = self.store.clone();
        let tx = self.store_tx.clone();
        let latency = self.store_latency;
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(latency).await;
            let result = lock_store(&store).add(item);
            let _ = tx.send(StoreReply::Added(result));
            ctx.request_repaint();
        });
    }

    /// Start moving an item to another category. Ignored while another reassignment is in flight.
    pub fn dispatch_reassign(&mut self, ctx: &egui::Context, item_id: i64, category: Category) {
        if self.is_reassigning {
            return;
        }
        self.is_reassigning = true;
        info!(item_id, to = %category, "Reassigning item category");

        let store = self.store.clone();
        let tx = self.store_tx.clone();
        let latency = self.store_latency;
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(latency).await;
            let result = lock_store(&store).reassign(item_id, category);
            let _ = tx.send(StoreReply::Reassigned(result));
            ctx.request_repaint();
        });
    }

    /// Apply finished operations: clear in-flight flags, close modals on success, toast the outcome
    pub fn poll_store_replies(&mut self) {
        while let Ok(reply) = self.store_rx.try_recv() {
            match reply {
                StoreReply::Added(Ok(item)) => {
                    self.is_adding = false;
                    self.show_add_modal = false;
                    info!(id = item.id, codigo = %item.codigo, "Item added");
                    self.show_toast(format!("Item {} agregado", item.codigo), false);
                }
                StoreReply::Added(Err(e)) => {
                    self.is_adding = false;
                    warn!(error = %e, "Failed to add item");
                    self.show_toast(e.to_string(), true);
                }
                StoreReply::Reassigned(Ok(item)) => {
                    self.is_reassigning = false;
                    self.show_reassign_modal = false;
                    self.reassign_target = None;
                    info!(id = item.id, categoria = ?item.categoria, "Item reassigned");
                    self.show_toast(
                        format!("{} movido a {}", item.nombre, crate::types::category_label(item.categoria)),
                        false,
                    );
                }
                StoreReply::Reassigned(Err(e)) => {
                    self.is_reassigning = false;
                    warn!(error = %e, "Failed to reassign item");
                    self.show_toast(e.to_string(), true);
                }
            }
        }
    }
}
