//! App module - contains the main application state and logic

mod modals;
mod store_ops;
mod views;

use store_ops::StoreReply;

use crate::settings::Settings;
use crate::store::InventoryStore;
use crate::theme;
use crate::types::{Category, InventoryItem};
use crate::ui::{AddItemModal, CategoryReassignModal};
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) store: Arc<Mutex<InventoryStore>>,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) store_tx: Sender<StoreReply>,
    pub(crate) store_rx: Receiver<StoreReply>,
    pub(crate) store_latency: Duration,
    // Add item modal
    pub(crate) add_modal: AddItemModal,
    pub(crate) show_add_modal: bool,
    pub(crate) add_preselected: Option<Category>,
    pub(crate) is_adding: bool,
    // Category reassign modal
    pub(crate) reassign_modal: CategoryReassignModal,
    pub(crate) show_reassign_modal: bool,
    pub(crate) reassign_target: Option<InventoryItem>,
    pub(crate) is_reassigning: bool,
    // List
    pub(crate) search_query: String,
    pub(crate) show_low_stock_only: bool,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_is_error: bool,
    pub(crate) toast_start: Option<Instant>,
    pub(crate) central_panel_rect: Option<egui::Rect>,
    // Window
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: tokio::runtime::Runtime,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        Self::with_store(InventoryStore::seeded(), runtime, settings, data_dir)
    }

    /// Build the app state around an existing store (no window needed)
    pub fn with_store(
        store: InventoryStore,
        runtime: tokio::runtime::Runtime,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Self {
        let (store_tx, store_rx) = mpsc::channel();
        Self {
            store: Arc::new(Mutex::new(store)),
            runtime,
            store_tx,
            store_rx,
            store_latency: settings.store_latency(),
            add_modal: AddItemModal::new(),
            show_add_modal: false,
            add_preselected: None,
            is_adding: false,
            reassign_modal: CategoryReassignModal::new(),
            show_reassign_modal: false,
            reassign_target: None,
            is_reassigning: false,
            search_query: String::new(),
            show_low_stock_only: settings.show_low_stock_only,
            toast_message: None,
            toast_is_error: false,
            toast_start: None,
            central_panel_rect: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            show_low_stock_only: self.show_low_stock_only,
            store_latency_ms: self.store_latency.as_millis() as u64,
        };
        settings.save(&self.data_dir);
    }

    pub fn show_toast(&mut self, message: impl Into<String>, is_error: bool) {
        self.toast_message = Some(message.into());
        self.toast_is_error = is_error;
        self.toast_start = Some(Instant::now());
    }
}
