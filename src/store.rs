//! In-memory inventory store
//! Owns the item list the main window shows and applies the changes the modals request

use crate::types::{Category, InventoryItem, NewInventoryItem};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Ya existe un item con el código {0}")]
    DuplicateCode(String),
    #[error("No se encontró el item {0}")]
    NotFound(i64),
    #[error("El item ya pertenece a la categoría {0}")]
    SameCategory(Category),
}

/// Items of one category, as shown in the main list
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    pub category: Option<Category>,
    pub items: Vec<InventoryItem>,
}

pub struct InventoryStore {
    items: Vec<InventoryItem>,
    next_id: i64,
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with a handful of demo items
    pub fn seeded() -> Self {
        let mut store = Self::new();
        let demo = [
            ("Repuesto", "Tornillo M6 x 20", "T-001", "A1-03", 120.0, "UNI", Some(Category::TornilleriaFijacion)),
            ("Repuesto", "Correa en V A-42", "TR-014", "B2-01", 4.0, "UNI", Some(Category::Transmision)),
            ("Insumo", "Aceite hidráulico ISO 68", "LU-230", "Pañol", 60.0, "LT", Some(Category::LubricantesFluidos)),
            ("Repuesto", "Rodamiento 6205-2RS", "R-6205", "A3-07", 3.0, "UNI", Some(Category::Rodamientos)),
            ("Repuesto", "Filtro de aire primario", "F-100", "C1-02", 8.0, "UNI", Some(Category::Filtros)),
            ("ERSA", "Sello mecánico bomba P-12", "ERSA-0042", "ERSA-1", 1.0, "UNI", Some(Category::RepuestosErsa)),
            ("Material", "Cable tipo taller 3x2.5", "E-3025", "D4-01", 150.0, "MT", Some(Category::Electricos)),
            ("Material", "Manguera 1/2\" alta presión", "TM-012", "D1-05", 25.0, "MT", None),
        ];
        for (tipo, nombre, codigo, ubicacion, stock, unidad, categoria) in demo {
            let new = NewInventoryItem {
                tipo: tipo.into(),
                nombre: nombre.into(),
                codigo: codigo.into(),
                ubicacion: ubicacion.into(),
                stock,
                unidad: unidad.into(),
                categoria,
                ..NewInventoryItem::default()
            };
            // Demo codes are unique
            let _ = store.add(new);
        }
        store
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn get(&self, id: i64) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Create an item. Codes are unique, ignoring case and surrounding whitespace.
    pub fn add(&mut self, new: NewInventoryItem) -> Result<InventoryItem, StoreError> {
        let code = new.codigo.trim();
        let folded = code.to_lowercase();
        if self.items.iter().any(|i| i.codigo.to_lowercase() == folded) {
            return Err(StoreError::DuplicateCode(code.to_string()));
        }

        let item = InventoryItem::from_new(self.next_id, new);
        self.next_id += 1;
        self.items.push(item.clone());
        debug!(id = item.id, codigo = %item.codigo, "Item stored");
        Ok(item)
    }

    /// Move an item to another category
    pub fn reassign(&mut self, id: i64, category: Category) -> Result<InventoryItem, StoreError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::NotFound(id))?;
        if item.categoria == Some(category) {
            return Err(StoreError::SameCategory(category));
        }
        let previous = item.categoria;
        item.categoria = Some(category);
        debug!(id, from = ?previous, to = %category, "Item reassigned");
        Ok(item.clone())
    }

    /// Items grouped by category in display order, uncategorized last.
    ///
    /// With no filter active every category is listed, even empty ones, so
    /// items can be added straight into it. Otherwise only groups with a
    /// matching item are returned.
    pub fn grouped(&self, query: &str, low_stock_only: bool) -> Vec<CategoryGroup> {
        let query = query.trim().to_lowercase();
        let filtering = !query.is_empty() || low_stock_only;

        let matches = |item: &InventoryItem| {
            (!low_stock_only || item.needs_reorder()) && matches_search(item, &query)
        };

        let categories = Category::ALL.into_iter().map(Some).chain(std::iter::once(None));
        categories
            .filter_map(|category| {
                let mut items: Vec<InventoryItem> = self
                    .items
                    .iter()
                    .filter(|i| i.categoria == category && matches(i))
                    .cloned()
                    .collect();
                items.sort_by_key(|i| i.nombre.to_lowercase());

                let keep = !items.is_empty() || (!filtering && category.is_some());
                keep.then_some(CategoryGroup { category, items })
            })
            .collect()
    }
}

/// Case-insensitive substring match on name or code. `query` must already be lowercase.
fn matches_search(item: &InventoryItem, query: &str) -> bool {
    query.is_empty()
        || item.nombre.to_lowercase().contains(query)
        || item.codigo.to_lowercase().contains(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(codigo: &str, categoria: Option<Category>) -> NewInventoryItem {
        NewInventoryItem {
            tipo: "Repuesto".into(),
            nombre: format!("Item {}", codigo),
            codigo: codigo.into(),
            stock: 10.0,
            categoria,
            ..NewInventoryItem::default()
        }
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let mut store = InventoryStore::new();
        let a = store.add(new_item("A", None)).unwrap();
        let b = store.add(new_item("B", None)).unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.get(2).map(|i| i.codigo.as_str()), Some("B"));
    }

    #[test]
    fn duplicate_code_is_rejected_ignoring_case() {
        let mut store = InventoryStore::new();
        store.add(new_item("T-001", None)).unwrap();
        let err = store.add(new_item(" t-001 ", None)).unwrap_err();
        assert_eq!(err, StoreError::DuplicateCode("t-001".into()));
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn reassign_changes_category() {
        let mut store = InventoryStore::new();
        let item = store.add(new_item("F-1", Some(Category::Filtros))).unwrap();
        let moved = store.reassign(item.id, Category::Rodamientos).unwrap();
        assert_eq!(moved.categoria, Some(Category::Rodamientos));
        assert_eq!(store.get(item.id).unwrap().categoria, Some(Category::Rodamientos));
    }

    #[test]
    fn reassign_rejects_same_category_and_unknown_id() {
        let mut store = InventoryStore::new();
        let item = store.add(new_item("F-1", Some(Category::Filtros))).unwrap();
        assert_eq!(
            store.reassign(item.id, Category::Filtros),
            Err(StoreError::SameCategory(Category::Filtros))
        );
        assert_eq!(store.reassign(99, Category::Otros), Err(StoreError::NotFound(99)));
    }

    #[test]
    fn grouped_lists_every_category_without_filter() {
        let mut store = InventoryStore::new();
        store.add(new_item("F-1", Some(Category::Filtros))).unwrap();
        store.add(new_item("X-1", None)).unwrap();

        let groups = store.grouped("", false);
        assert_eq!(groups.len(), 14);
        assert_eq!(groups[0].category, Some(Category::TornilleriaFijacion));
        assert_eq!(groups.last().unwrap().category, None);
        let filtros = groups.iter().find(|g| g.category == Some(Category::Filtros)).unwrap();
        assert_eq!(filtros.items.len(), 1);
    }

    #[test]
    fn grouped_search_matches_name_or_code() {
        let store = InventoryStore::seeded();
        let groups = store.grouped("rodamiento", false);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items[0].codigo, "R-6205");

        let groups = store.grouped("ersa-00", false);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].items[0].is_ersa());
    }

    #[test]
    fn grouped_low_stock_only_keeps_items_at_reorder_point() {
        let store = InventoryStore::seeded();
        let groups = store.grouped("", true);
        assert!(!groups.is_empty());
        assert!(groups.iter().flat_map(|g| &g.items).all(|i| i.needs_reorder()));
    }

    #[test]
    fn seeded_store_has_unique_codes() {
        let store = InventoryStore::seeded();
        assert_eq!(store.items().len(), 8);
    }

    #[test]
    fn duplicate_code_check_folds_non_ascii_case() {
        let mut store = InventoryStore::new();
        store.add(new_item("Ñ-1", None)).unwrap();
        assert_eq!(
            store.add(new_item("ñ-1", None)),
            Err(StoreError::DuplicateCode("ñ-1".into()))
        );
    }
}
