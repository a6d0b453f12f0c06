//! Behaviour shared by every `AssetStore + FavoriteStore` implementation.
//!
//! Each function seeds what it needs through the store itself and asserts on
//! ids rather than whole values, since Postgres truncates timestamps.

#![allow(dead_code)]

use std::collections::HashSet;

use assert_matches::assert_matches;
use assetdeck_core::asset::{Asset, AssetKind, Audience};
use assetdeck_core::error::CoreError;
use assetdeck_core::favorite::{FavoriteAssetParams, UpdateFavoriteParams};
use assetdeck_core::store::{AssetStore, FavoriteStore};
use assetdeck_core::types::{new_id, AssetId};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn chart(title: &str) -> Asset {
    Asset::chart(title, "month", "revenue", vec![1.0, 2.5, 4.0])
}

pub fn insight(text: &str) -> Asset {
    Asset::insight(text)
}

pub fn audience() -> Asset {
    Asset::audience(Audience {
        gender: "female".to_string(),
        birth_country: "Greece".to_string(),
        age_min: 18,
        age_max: 34,
        social_media_hours: 3,
        last_month_purchases: 2,
    })
}

pub fn favorite(user_id: AssetId, asset_id: AssetId, description: &str) -> FavoriteAssetParams {
    FavoriteAssetParams {
        user_id,
        asset_id,
        description: description.to_string(),
    }
}

async fn store_all<S: AssetStore>(store: &S, assets: &[Asset]) {
    for asset in assets {
        store.store_asset(asset).await.unwrap();
    }
}

/// Walk the whole stream with the given page size, returning every id seen.
async fn walk<S: AssetStore>(store: &S, page_size: i64) -> Vec<AssetId> {
    let mut seen = Vec::new();
    let mut cursor = None;
    loop {
        let page = store.list_assets(cursor, page_size).await.unwrap();
        if page.items.is_empty() {
            assert!(page.next_page_token.is_none());
            return seen;
        }
        assert!(page.items.len() as i64 <= page_size);
        seen.extend(page.items.iter().map(Asset::id));
        cursor = page.next_page_token.map(|t| t.parse().unwrap());
    }
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

/// Two of each kind, interleaved in creation order, read three at a time.
pub async fn mixed_kinds_page_in_id_order<S: AssetStore>(store: &S) {
    let assets = vec![
        chart("a"),
        insight("b"),
        audience(),
        chart("c"),
        insight("d"),
        audience(),
    ];
    store_all(store, &assets).await;

    let first = store.list_assets(None, 3).await.unwrap();
    let first_ids: Vec<_> = first.items.iter().map(Asset::id).collect();
    let expected: Vec<_> = assets[..3].iter().map(Asset::id).collect();
    assert_eq!(first_ids, expected);
    assert_eq!(
        first.items.iter().map(Asset::kind).collect::<Vec<_>>(),
        vec![AssetKind::Chart, AssetKind::Insight, AssetKind::Audience]
    );
    assert_eq!(first.next_page_token, Some(assets[2].id().to_string()));

    let second = store.list_assets(Some(assets[2].id()), 3).await.unwrap();
    let second_ids: Vec<_> = second.items.iter().map(Asset::id).collect();
    let expected: Vec<_> = assets[3..].iter().map(Asset::id).collect();
    assert_eq!(second_ids, expected);

    let third = store.list_assets(Some(assets[5].id()), 3).await.unwrap();
    assert!(third.items.is_empty());
    assert!(third.next_page_token.is_none());
}

/// Every stored asset is seen exactly once, in strictly ascending id order.
pub async fn pagination_visits_every_asset_once<S: AssetStore>(store: &S) {
    let assets: Vec<Asset> = (0..17)
        .map(|i| match i % 3 {
            0 => chart(&format!("chart {i}")),
            1 => insight(&format!("insight {i}")),
            _ => audience(),
        })
        .collect();
    store_all(store, &assets).await;

    for page_size in [1, 4, 17, 50] {
        let seen = walk(store, page_size).await;
        assert_eq!(seen.len(), assets.len(), "page size {page_size}");
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        let unique: HashSet<_> = seen.iter().collect();
        assert_eq!(unique.len(), assets.len());
    }
}

/// Assets created after a page was read show up after the cursor, never
/// before it.
pub async fn cursor_is_stable_under_inserts<S: AssetStore>(store: &S) {
    let early = vec![chart("one"), insight("two"), audience()];
    store_all(store, &early).await;

    let first = store.list_assets(None, 2).await.unwrap();
    let cursor = first.items.last().map(Asset::id);

    let late = vec![insight("late one"), chart("late two")];
    store_all(store, &late).await;

    let rest = store.list_assets(cursor, 10).await.unwrap();
    let rest_ids: Vec<_> = rest.items.iter().map(Asset::id).collect();
    assert_eq!(rest_ids, vec![early[2].id(), late[0].id(), late[1].id()]);
}

/// A cursor that matches no stored asset still works as a lower bound.
pub async fn unknown_cursor_is_a_lower_bound<S: AssetStore>(store: &S) {
    let assets = vec![chart("x"), insight("y")];
    store_all(store, &assets).await;

    let between = new_id();
    let late = chart("z");
    store.store_asset(&late).await.unwrap();

    let page = store.list_assets(Some(between), 10).await.unwrap();
    let ids: Vec<_> = page.items.iter().map(Asset::id).collect();
    assert_eq!(ids, vec![late.id()]);
}

pub async fn duplicate_asset_id_conflicts<S: AssetStore>(store: &S) {
    let asset = insight("only once");
    store.store_asset(&asset).await.unwrap();

    let result = store.store_asset(&asset).await;
    assert_matches!(result, Err(CoreError::Conflict(_)));
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

/// Favoriting the same asset twice keeps one row and the latest description.
pub async fn favorite_upsert_is_idempotent<S: AssetStore + FavoriteStore>(store: &S) {
    let asset = audience();
    store.store_asset(&asset).await.unwrap();
    let user = new_id();

    let first = store
        .store_favorite(&favorite(user, asset.id(), "first"))
        .await
        .unwrap();
    assert_eq!(first.asset_type, AssetKind::Audience);
    assert_eq!(first.description, "first");

    let second = store
        .store_favorite(&favorite(user, asset.id(), "second"))
        .await
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.description, "second");
    assert!(second.updated_at >= first.updated_at);

    let all = store.user_favorites(user).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].description, "second");
}

/// A favorite can only point at an asset that exists.
pub async fn favorite_requires_existing_asset<S: FavoriteStore>(store: &S) {
    let user = new_id();
    let missing = new_id();

    let result = store.store_favorite(&favorite(user, missing, "")).await;
    assert_matches!(
        result,
        Err(CoreError::InvalidReference { entity: "asset", ref id }) if *id == missing.to_string()
    );
    assert!(store.user_favorites(user).await.unwrap().is_empty());
}

/// The denormalized tag matches the table the asset lives in.
pub async fn favorite_records_asset_kind<S: AssetStore + FavoriteStore>(store: &S) {
    let user = new_id();
    for asset in [chart("c"), insight("i"), audience()] {
        store.store_asset(&asset).await.unwrap();
        let fav = store
            .store_favorite(&favorite(user, asset.id(), ""))
            .await
            .unwrap();
        assert_eq!(fav.asset_type, asset.kind());
    }
}

/// Users never see, update or delete each other's favorites.
pub async fn favorites_are_isolated_per_user<S: AssetStore + FavoriteStore>(store: &S) {
    let asset = chart("shared");
    store.store_asset(&asset).await.unwrap();
    let alice = new_id();
    let bob = new_id();

    let alice_fav = store
        .store_favorite(&favorite(alice, asset.id(), "alice"))
        .await
        .unwrap();
    let bob_fav = store
        .store_favorite(&favorite(bob, asset.id(), "bob"))
        .await
        .unwrap();
    assert_ne!(alice_fav.id, bob_fav.id);

    let bobs = store.user_favorites(bob).await.unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].id, bob_fav.id);

    let update = UpdateFavoriteParams {
        description: "hijacked".to_string(),
    };
    let result = store.update_favorite(alice_fav.id, bob, &update).await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "favorite", .. }));

    let result = store.delete_favorite(alice_fav.id, bob).await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "favorite", .. }));

    let alices = store.user_favorites(alice).await.unwrap();
    assert_eq!(alices.len(), 1);
    assert_eq!(alices[0].description, "alice");
}

/// Favorites come back newest first.
pub async fn favorites_are_listed_newest_first<S: AssetStore + FavoriteStore>(store: &S) {
    let user = new_id();
    let mut created = Vec::new();
    for asset in [chart("1"), insight("2"), audience()] {
        store.store_asset(&asset).await.unwrap();
        let fav = store
            .store_favorite(&favorite(user, asset.id(), ""))
            .await
            .unwrap();
        created.push(fav.id);
    }

    let listed: Vec<_> = store
        .user_favorites(user)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    created.reverse();
    assert_eq!(listed, created);
}

pub async fn update_and_delete_favorite<S: AssetStore + FavoriteStore>(store: &S) {
    let asset = insight("to edit");
    store.store_asset(&asset).await.unwrap();
    let user = new_id();
    let fav = store
        .store_favorite(&favorite(user, asset.id(), "before"))
        .await
        .unwrap();

    let updated = store
        .update_favorite(
            fav.id,
            user,
            &UpdateFavoriteParams {
                description: "after".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, fav.id);
    assert_eq!(updated.description, "after");
    assert_eq!(updated.asset_id, asset.id());

    store.delete_favorite(fav.id, user).await.unwrap();
    assert!(store.user_favorites(user).await.unwrap().is_empty());

    let again = store.delete_favorite(fav.id, user).await;
    assert_matches!(again, Err(CoreError::NotFound { .. }));
}
