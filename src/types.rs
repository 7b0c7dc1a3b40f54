//! Common types and data structures

use crate::constants::{DEFAULT_PUNTO_PEDIDO, DEFAULT_UNIDAD, ERSA_TIPO};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Item category. The set is closed: items either carry one of these or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Tornillería y Fijación")]
    TornilleriaFijacion,
    #[serde(rename = "Transmisión")]
    Transmision,
    #[serde(rename = "Lubricantes y Fluidos")]
    LubricantesFluidos,
    #[serde(rename = "Rodamientos")]
    Rodamientos,
    #[serde(rename = "Sellos y Empaques")]
    SellosEmpaques,
    #[serde(rename = "Filtros")]
    Filtros,
    #[serde(rename = "Válvulas y Conexiones")]
    ValvulasConexiones,
    #[serde(rename = "Equipos Rotativos")]
    EquiposRotativos,
    #[serde(rename = "Eléctricos")]
    Electricos,
    #[serde(rename = "Tuberías y Mangueras")]
    TuberiasMangueras,
    #[serde(rename = "Repuestos ERSA")]
    RepuestosErsa,
    #[serde(rename = "Materiales UNBW")]
    MaterialesUnbw,
    #[serde(rename = "Otros")]
    Otros,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 13] = [
        Category::TornilleriaFijacion,
        Category::Transmision,
        Category::LubricantesFluidos,
        Category::Rodamientos,
        Category::SellosEmpaques,
        Category::Filtros,
        Category::ValvulasConexiones,
        Category::EquiposRotativos,
        Category::Electricos,
        Category::TuberiasMangueras,
        Category::RepuestosErsa,
        Category::MaterialesUnbw,
        Category::Otros,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::TornilleriaFijacion => "Tornillería y Fijación",
            Category::Transmision => "Transmisión",
            Category::LubricantesFluidos => "Lubricantes y Fluidos",
            Category::Rodamientos => "Rodamientos",
            Category::SellosEmpaques => "Sellos y Empaques",
            Category::Filtros => "Filtros",
            Category::ValvulasConexiones => "Válvulas y Conexiones",
            Category::EquiposRotativos => "Equipos Rotativos",
            Category::Electricos => "Eléctricos",
            Category::TuberiasMangueras => "Tuberías y Mangueras",
            Category::RepuestosErsa => "Repuestos ERSA",
            Category::MaterialesUnbw => "Materiales UNBW",
            Category::Otros => "Otros",
        }
    }

    pub fn icon(self) -> &'static str {
        use egui_phosphor::regular as icons;
        match self {
            Category::TornilleriaFijacion => icons::WRENCH,
            Category::Transmision => icons::GEAR,
            Category::LubricantesFluidos => icons::DROP,
            Category::Rodamientos => icons::GEAR_SIX,
            Category::SellosEmpaques => icons::LOCK,
            Category::Filtros => icons::FUNNEL,
            Category::ValvulasConexiones => icons::PLUGS,
            Category::EquiposRotativos => icons::FACTORY,
            Category::Electricos => icons::LIGHTNING,
            Category::TuberiasMangueras => icons::CYLINDER,
            Category::RepuestosErsa => icons::CIRCLE,
            Category::MaterialesUnbw => icons::PACKAGE,
            Category::Otros => icons::DOTS_THREE,
        }
    }

    /// Categories a reassignment may target: everything except `current`
    pub fn options_excluding(current: Option<Category>) -> Vec<Category> {
        Self::ALL
            .into_iter()
            .filter(|c| Some(*c) != current)
            .collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string is not one of the known category labels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Label for an optional category
pub fn category_label(category: Option<Category>) -> &'static str {
    category.map(Category::label).unwrap_or("Sin categoría")
}

/// Field values collected by the add-item form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub tipo: String,
    pub nombre: String,
    pub codigo: String,
    pub ubicacion: String,
    pub stock: f64,
    pub unidad: String,
    pub punto_pedido: f64,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default)]
    pub categoria: Option<Category>,
}

impl Default for NewInventoryItem {
    fn default() -> Self {
        Self {
            tipo: String::new(),
            nombre: String::new(),
            codigo: String::new(),
            ubicacion: String::new(),
            stock: 0.0,
            unidad: DEFAULT_UNIDAD.to_string(),
            punto_pedido: DEFAULT_PUNTO_PEDIDO,
            foto: None,
            categoria: None,
        }
    }
}

impl NewInventoryItem {
    pub fn with_category(categoria: Option<Category>) -> Self {
        Self {
            categoria,
            ..Self::default()
        }
    }
}

/// An item owned by the inventory store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: i64,
    pub tipo: String,
    pub nombre: String,
    pub codigo: String,
    pub ubicacion: String,
    pub stock: f64,
    pub unidad: String,
    pub punto_pedido: f64,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default)]
    pub categoria: Option<Category>,
}

impl InventoryItem {
    /// Build a stored item from form values, trimming the text fields
    pub fn from_new(id: i64, new: NewInventoryItem) -> Self {
        Self {
            id,
            tipo: new.tipo.trim().to_string(),
            nombre: new.nombre.trim().to_string(),
            codigo: new.codigo.trim().to_string(),
            ubicacion: new.ubicacion.trim().to_string(),
            stock: new.stock,
            unidad: new.unidad.trim().to_string(),
            punto_pedido: new.punto_pedido,
            foto: new.foto.filter(|f| !f.trim().is_empty()),
            categoria: new.categoria,
        }
    }

    pub fn is_ersa(&self) -> bool {
        self.tipo == ERSA_TIPO
    }

    /// Stock has fallen to or below the reorder point
    pub fn needs_reorder(&self) -> bool {
        self.stock <= self.punto_pedido
    }
}

/// Form fields that carry a validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemField {
    Tipo,
    Nombre,
    Codigo,
    Stock,
    Unidad,
    PuntoPedido,
}

impl ItemField {
    /// Field name as used by the external item contract
    pub fn key(self) -> &'static str {
        match self {
            ItemField::Tipo => "tipo",
            ItemField::Nombre => "nombre",
            ItemField::Codigo => "codigo",
            ItemField::Stock => "stock",
            ItemField::Unidad => "unidad",
            ItemField::PuntoPedido => "puntoPedido",
        }
    }

    pub fn error_message(self) -> &'static str {
        match self {
            ItemField::Tipo => "El tipo es requerido",
            ItemField::Nombre => "El texto breve es requerido",
            ItemField::Codigo => "El código es requerido",
            ItemField::Stock => "El stock no puede ser negativo",
            ItemField::Unidad => "La unidad es requerida",
            ItemField::PuntoPedido => "El punto de pedido no puede ser negativo",
        }
    }
}

/// Field -> message for every field that failed validation
pub type FieldErrors = BTreeMap<ItemField, &'static str>;

/// Check every field constraint of a new item. Empty result means valid.
pub fn validate(item: &NewInventoryItem) -> FieldErrors {
    let required = [
        (ItemField::Tipo, &item.tipo),
        (ItemField::Nombre, &item.nombre),
        (ItemField::Codigo, &item.codigo),
        (ItemField::Unidad, &item.unidad),
    ];
    let non_negative = [
        (ItemField::Stock, item.stock),
        (ItemField::PuntoPedido, item.punto_pedido),
    ];

    let mut errors = FieldErrors::new();
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.insert(field, field.error_message());
        }
    }
    for (field, value) in non_negative {
        // NaN fails both comparisons, so it is rejected here too
        if !(value >= 0.0) || value.is_infinite() {
            errors.insert(field, field.error_message());
        }
    }
    errors
}
