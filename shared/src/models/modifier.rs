//! Modifier Group / Option Models
//!
//! A modifier group is a named set of add-ons or variants ("Size",
//! "Extra toppings") attached to menu items. Options belong to exactly
//! one group; groups attach to many items.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Whether a guest picks exactly one option or a bounded number of them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "selection_type", rename_all = "lowercase"))]
pub enum SelectionType {
    Single,
    Multiple,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "modifier_status", rename_all = "lowercase"))]
pub enum ModifierStatus {
    #[default]
    Active,
    Inactive,
}

impl ModifierStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ModifierStatus::Active)
    }
}

/// Modifier group entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ModifierGroup {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub selection_type: SelectionType,
    pub is_required: bool,
    /// Only meaningful for `Multiple`; always `None` for `Single`
    pub min_selections: Option<i32>,
    /// Only meaningful for `Multiple`; `None` means unlimited
    pub max_selections: Option<i32>,
    pub display_order: i32,
    pub status: ModifierStatus,
    pub created_at: i64,
    pub updated_at: i64,
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub options: Vec<ModifierOption>,
}

/// Modifier option entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ModifierOption {
    pub id: i64,
    pub group_id: i64,
    pub name: String,
    pub price_adjustment: Decimal,
    pub status: ModifierStatus,
    pub created_at: i64,
}

/// Create modifier group payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierGroupCreate {
    pub name: String,
    pub selection_type: SelectionType,
    pub is_required: Option<bool>,
    pub min_selections: Option<i32>,
    pub max_selections: Option<i32>,
    pub display_order: Option<i32>,
    pub status: Option<ModifierStatus>,
}

/// Update modifier group payload (absent fields keep their stored value)
///
/// The selection bounds distinguish absent from `null`: `null` clears the
/// bound (`Some(None)`), absence keeps it (`None`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifierGroupUpdate {
    pub name: Option<String>,
    pub selection_type: Option<SelectionType>,
    pub is_required: Option<bool>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_selections: Option<Option<i32>>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_selections: Option<Option<i32>>,
    pub display_order: Option<i32>,
    pub status: Option<ModifierStatus>,
}

/// Create modifier option payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierOptionCreate {
    pub name: String,
    pub price_adjustment: Option<Decimal>,
    pub status: Option<ModifierStatus>,
}

/// Update modifier option payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifierOptionUpdate {
    pub name: Option<String>,
    pub price_adjustment: Option<Decimal>,
    pub status: Option<ModifierStatus>,
}

/// Full-replace attachment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachModifierGroups {
    #[serde(alias = "modifierGroupIds")]
    pub modifier_group_ids: Vec<i64>,
}

/// A present field, `null` included, deserializes to `Some`
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
