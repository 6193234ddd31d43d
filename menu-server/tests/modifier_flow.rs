use std::sync::Arc;

use menu_server::AppState;
use menu_server::db::MemoryStore;
use menu_server::error::ServiceError;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    MenuItemCreate, ModifierGroupCreate, ModifierGroupUpdate, ModifierOptionCreate,
    ModifierOptionUpdate, ModifierStatus, SelectionType,
};

const RESTAURANT: i64 = 1;

fn state() -> AppState {
    AppState::with_store(Arc::new(MemoryStore::new()), "jwt-secret", "qr-secret", 24)
}

fn app_error(err: ServiceError) -> AppError {
    AppError::from(err)
}

fn group(name: &str) -> ModifierGroupCreate {
    ModifierGroupCreate {
        name: name.into(),
        selection_type: SelectionType::Multiple,
        is_required: None,
        min_selections: None,
        max_selections: Some(3),
        display_order: None,
        status: None,
    }
}

fn option(name: &str) -> ModifierOptionCreate {
    ModifierOptionCreate {
        name: name.into(),
        price_adjustment: Some(Decimal::new(50, 2)),
        status: None,
    }
}

async fn create_item(state: &AppState, name: &str) -> i64 {
    state
        .menu
        .create_item(
            RESTAURANT,
            MenuItemCreate {
                name: name.into(),
                description: None,
                price: Decimal::new(1200, 2),
                status: None,
                is_chef_recommended: None,
            },
        )
        .await
        .unwrap()
        .id
}

fn require() -> ModifierGroupUpdate {
    ModifierGroupUpdate {
        is_required: Some(true),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_required_without_options_rejected() {
    let state = state();
    let g = state
        .modifiers
        .create_group(RESTAURANT, group("Toppings"))
        .await
        .unwrap();

    let err = state
        .modifiers
        .update_group(RESTAURANT, g.id, require())
        .await
        .unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::ModifierRequiresOptions);

    state
        .modifiers
        .add_option(RESTAURANT, g.id, option("Olives"))
        .await
        .unwrap();

    let updated = state
        .modifiers
        .update_group(RESTAURANT, g.id, require())
        .await
        .unwrap();
    assert!(updated.is_required);
    // Required multiple group with no minimum gets one
    assert_eq!(updated.min_selections, Some(1));
    assert_eq!(updated.options.len(), 1);
}

#[tokio::test]
async fn test_create_required_group_rejected() {
    let state = state();
    let err = state
        .modifiers
        .create_group(
            RESTAURANT,
            ModifierGroupCreate {
                is_required: Some(true),
                ..group("Size")
            },
        )
        .await
        .unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::ModifierRequiresOptions);
}

#[tokio::test]
async fn test_invalid_cardinality_never_persisted() {
    let state = state();
    let err = state
        .modifiers
        .create_group(
            RESTAURANT,
            ModifierGroupCreate {
                min_selections: Some(3),
                max_selections: Some(1),
                ..group("Sauces")
            },
        )
        .await
        .unwrap_err();
    let err = app_error(err);
    assert_eq!(err.code, ErrorCode::ModifierCardinalityInvalid);
    assert_eq!(err.message, "min > max");

    assert!(state.modifiers.list_groups(RESTAURANT).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_merges_and_normalizes() {
    let state = state();
    let g = state
        .modifiers
        .create_group(
            RESTAURANT,
            ModifierGroupCreate {
                min_selections: Some(1),
                ..group("Extras")
            },
        )
        .await
        .unwrap();

    // Lowering max below the stored min is caught on the merged config
    let err = state
        .modifiers
        .update_group(
            RESTAURANT,
            g.id,
            ModifierGroupUpdate {
                min_selections: Some(Some(2)),
                max_selections: Some(Some(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::ModifierCardinalityInvalid);

    let single = state
        .modifiers
        .update_group(
            RESTAURANT,
            g.id,
            ModifierGroupUpdate {
                selection_type: Some(SelectionType::Single),
                name: Some("Extra".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(single.name, "Extra");
    assert_eq!(single.selection_type, SelectionType::Single);
    assert_eq!(single.min_selections, None);
    assert_eq!(single.max_selections, None);
}

#[tokio::test]
async fn test_update_null_clears_bound() {
    let state = state();
    let g = state
        .modifiers
        .create_group(
            RESTAURANT,
            ModifierGroupCreate {
                min_selections: Some(1),
                max_selections: Some(2),
                ..group("Sauces")
            },
        )
        .await
        .unwrap();

    let patch: ModifierGroupUpdate =
        serde_json::from_value(serde_json::json!({ "max_selections": null })).unwrap();
    let unlimited = state
        .modifiers
        .update_group(RESTAURANT, g.id, patch)
        .await
        .unwrap();
    assert_eq!(unlimited.max_selections, None);
    assert_eq!(unlimited.min_selections, Some(1));

    // An absent field keeps the stored value
    let renamed = state
        .modifiers
        .update_group(
            RESTAURANT,
            g.id,
            ModifierGroupUpdate {
                name: Some("Dips".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.max_selections, None);
    assert_eq!(renamed.min_selections, Some(1));
}

#[tokio::test]
async fn test_update_unknown_group() {
    let state = state();
    let err = state
        .modifiers
        .update_group(RESTAURANT, 999, ModifierGroupUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::ModifierGroupNotFound);
}

#[tokio::test]
async fn test_attach_replaces_full_set() {
    let state = state();
    let item = create_item(&state, "Burger").await;
    let a = state.modifiers.create_group(RESTAURANT, group("A")).await.unwrap();
    let b = state.modifiers.create_group(RESTAURANT, group("B")).await.unwrap();
    let c = state.modifiers.create_group(RESTAURANT, group("C")).await.unwrap();

    state
        .modifiers
        .attach_groups_to_item(RESTAURANT, item, vec![a.id, b.id])
        .await
        .unwrap();
    let attached = state
        .modifiers
        .attach_groups_to_item(RESTAURANT, item, vec![c.id])
        .await
        .unwrap();

    let ids: Vec<i64> = attached.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![c.id]);
}

#[tokio::test]
async fn test_attach_dedupes_and_empty_clears() {
    let state = state();
    let item = create_item(&state, "Salad").await;
    let a = state.modifiers.create_group(RESTAURANT, group("A")).await.unwrap();

    let attached = state
        .modifiers
        .attach_groups_to_item(RESTAURANT, item, vec![a.id, a.id])
        .await
        .unwrap();
    assert_eq!(attached.len(), 1);

    let cleared = state
        .modifiers
        .attach_groups_to_item(RESTAURANT, item, vec![])
        .await
        .unwrap();
    assert!(cleared.is_empty());
}

#[tokio::test]
async fn test_attach_unresolved_ids_leave_set_unchanged() {
    let state = state();
    let item = create_item(&state, "Pasta").await;
    let g1 = state.modifiers.create_group(RESTAURANT, group("G1")).await.unwrap();
    let g2 = state.modifiers.create_group(RESTAURANT, group("G2")).await.unwrap();
    let other_restaurant = state
        .modifiers
        .create_group(RESTAURANT + 1, group("Elsewhere"))
        .await
        .unwrap();

    state
        .modifiers
        .attach_groups_to_item(RESTAURANT, item, vec![g1.id])
        .await
        .unwrap();

    let missing = 987_654;
    let err = state
        .modifiers
        .attach_groups_to_item(
            RESTAURANT,
            item,
            vec![g1.id, g2.id, missing, other_restaurant.id],
        )
        .await
        .unwrap_err();
    let err = app_error(err);
    assert_eq!(err.code, ErrorCode::ModifierGroupsUnresolved);
    let invalid = err.details.unwrap()["invalid_ids"].clone();
    assert_eq!(invalid, serde_json::json!([missing, other_restaurant.id]));

    let still: Vec<i64> = state
        .modifiers
        .list_item_groups(RESTAURANT, item)
        .await
        .unwrap()
        .iter()
        .map(|g| g.id)
        .collect();
    assert_eq!(still, vec![g1.id]);
}

#[tokio::test]
async fn test_attach_unknown_item() {
    let state = state();
    let err = state
        .modifiers
        .attach_groups_to_item(RESTAURANT, 31337, vec![])
        .await
        .unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::MenuItemNotFound);
}

#[tokio::test]
async fn test_detach() {
    let state = state();
    let item = create_item(&state, "Soup").await;
    let g = state.modifiers.create_group(RESTAURANT, group("Bread")).await.unwrap();
    state
        .modifiers
        .attach_groups_to_item(RESTAURANT, item, vec![g.id])
        .await
        .unwrap();

    state
        .modifiers
        .detach_group_from_item(RESTAURANT, item, g.id)
        .await
        .unwrap();

    // Detaching again is an error, not a no-op
    let err = state
        .modifiers
        .detach_group_from_item(RESTAURANT, item, g.id)
        .await
        .unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::ModifierNotAttached);

    let err = state
        .modifiers
        .detach_group_from_item(RESTAURANT, item, 5555)
        .await
        .unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::ModifierGroupNotFound);
}

#[tokio::test]
async fn test_delete_group_cascades() {
    let state = state();
    let item = create_item(&state, "Pizza").await;
    let g = state.modifiers.create_group(RESTAURANT, group("Crust")).await.unwrap();
    let opt = state
        .modifiers
        .add_option(RESTAURANT, g.id, option("Thin"))
        .await
        .unwrap();
    state
        .modifiers
        .attach_groups_to_item(RESTAURANT, item, vec![g.id])
        .await
        .unwrap();

    state.modifiers.delete_group(RESTAURANT, g.id).await.unwrap();

    assert!(
        state
            .modifiers
            .list_item_groups(RESTAURANT, item)
            .await
            .unwrap()
            .is_empty()
    );
    let err = state
        .modifiers
        .update_option(RESTAURANT, opt.id, ModifierOptionUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::ModifierOptionNotFound);

    let err = state.modifiers.get_group(RESTAURANT, g.id).await.unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::ModifierGroupNotFound);
}

#[tokio::test]
async fn test_option_validation_and_update() {
    let state = state();
    let g = state.modifiers.create_group(RESTAURANT, group("Milk")).await.unwrap();

    let err = state
        .modifiers
        .add_option(
            RESTAURANT,
            g.id,
            ModifierOptionCreate {
                price_adjustment: Some(Decimal::new(-1, 0)),
                ..option("Oat")
            },
        )
        .await
        .unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::ValidationFailed);

    let free = state
        .modifiers
        .add_option(
            RESTAURANT,
            g.id,
            ModifierOptionCreate {
                price_adjustment: None,
                ..option("Whole")
            },
        )
        .await
        .unwrap();
    assert_eq!(free.price_adjustment, Decimal::ZERO);
    assert_eq!(free.status, ModifierStatus::Active);

    let updated = state
        .modifiers
        .update_option(
            RESTAURANT,
            free.id,
            ModifierOptionUpdate {
                status: Some(ModifierStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Whole");
    assert_eq!(updated.status, ModifierStatus::Inactive);

    // Options of other restaurants are invisible
    let err = state
        .modifiers
        .update_option(RESTAURANT + 1, free.id, ModifierOptionUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(app_error(err).code, ErrorCode::ModifierOptionNotFound);
}

#[tokio::test]
async fn test_list_groups_ordered() {
    let state = state();
    for (name, order) in [("Zest", 1), ("Base", 2), ("Acid", 1)] {
        state
            .modifiers
            .create_group(
                RESTAURANT,
                ModifierGroupCreate {
                    display_order: Some(order),
                    ..group(name)
                },
            )
            .await
            .unwrap();
    }

    let names: Vec<String> = state
        .modifiers
        .list_groups(RESTAURANT)
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(names, vec!["Acid", "Zest", "Base"]);
}
