mod harness;

use std::sync::Arc;

use harness::recording_presenter::RecordingPresenter;
use tradepost::adapters::MemoryShopStore;
use tradepost::domain::{
    Actor, ExactMatcher, ItemPayload, ItemStack, Listing, Location, PriceVector,
};
use tradepost::registry::{SearchQuery, ShopRegistry};

async fn marketplace() -> ShopRegistry<MemoryShopStore> {
    let registry = ShopRegistry::new(
        MemoryShopStore::new(),
        Arc::new(RecordingPresenter::new()),
        Arc::new(ExactMatcher),
    );

    let alice = Actor::new("alice");
    let near = registry
        .create_shop(&alice, Location::new("overworld", 10, 64, 0))
        .await
        .unwrap();
    registry
        .add_listing(
            near.id(),
            Listing::new(
                ItemPayload::new("iron_ingot"),
                32,
                PriceVector::new(vec![ItemStack::new(ItemPayload::new("stone"), 4)]),
            ),
            &alice,
        )
        .await
        .unwrap();

    let bob = Actor::new("bobby");
    let far = registry
        .create_shop(&bob, Location::new("overworld", 500, 64, 0))
        .await
        .unwrap();
    registry
        .add_listing(
            far.id(),
            Listing::new(
                ItemPayload::new("iron_sword").with_display_name("Orc Cleaver"),
                1,
                PriceVector::free(),
            ),
            &bob,
        )
        .await
        .unwrap();

    let carol = Actor::new("carol");
    let elsewhere = registry
        .create_shop(&carol, Location::new("nether", 0, 64, 0))
        .await
        .unwrap();
    registry
        .add_listing(
            elsewhere.id(),
            Listing::new(ItemPayload::new("iron_ingot"), 5, PriceVector::free()),
            &carol,
        )
        .await
        .unwrap();

    registry
}

#[tokio::test]
async fn name_search_matches_kind_and_display_name() {
    let registry = marketplace().await;

    let hits = registry.search(&SearchQuery::by_name("iron")).await;
    assert_eq!(hits.len(), 3);

    let hits = registry.search(&SearchQuery::by_name("cleaver")).await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].item, "Orc Cleaver");
    assert_eq!(hits[0].price, "Free");
}

#[tokio::test]
async fn seller_filter_narrows_results() {
    let registry = marketplace().await;

    let hits = registry.search(&SearchQuery::by_seller("bob")).await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].owner_name, "bobby");
}

#[tokio::test]
async fn origin_sorts_nearest_first_and_drops_other_worlds() {
    let registry = marketplace().await;
    let origin = Location::new("overworld", 0, 64, 0);

    let hits = registry
        .search(&SearchQuery::by_name("iron").near(origin.clone()))
        .await;

    // The nether shop is out; the near shop sorts first.
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].owner_name, "alice");
    assert!(hits[0].distance.unwrap() < hits[1].distance.unwrap());

    let close_only = registry
        .search(&SearchQuery::by_name("iron").near(origin).within(50.0))
        .await;
    assert_eq!(close_only.len(), 1);
    assert_eq!(close_only[0].owner_name, "alice");
}

#[tokio::test]
async fn unavailable_listings_never_match() {
    let registry = ShopRegistry::new(
        MemoryShopStore::new(),
        Arc::new(RecordingPresenter::new()),
        Arc::new(ExactMatcher),
    );
    let owner = Actor::new("dora");
    let shop = registry
        .create_shop(&owner, Location::new("overworld", 0, 64, 0))
        .await
        .unwrap();
    registry
        .add_listing(
            shop.id(),
            Listing::new(ItemPayload::new("amethyst"), 3, PriceVector::free()),
            &owner,
        )
        .await
        .unwrap();
    let listing = registry.shop_by_id(shop.id()).await.unwrap().items()[0].id();

    assert_eq!(registry.search(&SearchQuery::by_name("amethyst")).await.len(), 1);

    registry
        .set_listing_available(shop.id(), listing, false, &owner)
        .await
        .unwrap();
    assert!(registry.search(&SearchQuery::by_name("amethyst")).await.is_empty());
}
