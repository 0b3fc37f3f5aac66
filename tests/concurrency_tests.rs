mod harness;

use std::sync::Arc;

use harness::fake_inventory::FakeInventory;
use harness::recording_presenter::RecordingPresenter;
use tradepost::adapters::MemoryShopStore;
use tradepost::domain::{
    Actor, ExactMatcher, ItemPayload, ItemStack, Listing, ListingId, Location, PriceVector, ShopId,
};
use tradepost::registry::ShopRegistry;

fn stone() -> ItemPayload {
    ItemPayload::new("stone")
}

async fn shop_with_stock(
    stock: u32,
) -> (Arc<ShopRegistry<MemoryShopStore>>, ShopId, ListingId) {
    let registry = Arc::new(ShopRegistry::new(
        MemoryShopStore::new(),
        Arc::new(RecordingPresenter::new()),
        Arc::new(ExactMatcher),
    ));
    let owner = Actor::new("alice");
    let shop = registry
        .create_shop(&owner, Location::new("overworld", 0, 64, 0))
        .await
        .unwrap();
    registry
        .add_listing(
            shop.id(),
            Listing::new(
                ItemPayload::new("emerald"),
                stock,
                PriceVector::new(vec![ItemStack::new(stone(), 2)]),
            ),
            &owner,
        )
        .await
        .unwrap();
    let listing = registry.shop_by_id(shop.id()).await.unwrap().items()[0].id();
    (registry, shop.id(), listing)
}

#[tokio::test]
async fn two_buyers_racing_the_last_unit_get_one_winner() {
    let (registry, shop, listing) = shop_with_stock(1).await;
    let oracle = Arc::new(FakeInventory::new());
    let buyer_a = Actor::new("bob");
    let buyer_b = Actor::new("carol");
    oracle.stock(buyer_a.id, &stone(), 10);
    oracle.stock(buyer_b.id, &stone(), 10);

    let (first, second) = tokio::join!(
        registry.purchase(&buyer_a, shop, listing, 1, oracle.as_ref()),
        registry.purchase(&buyer_b, shop, listing, 1, oracle.as_ref()),
    );

    let outcomes = [first, second];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    let validation_losses = outcomes
        .iter()
        .filter(|r| matches!(r, Err(e) if e.is_validation()))
        .count();
    assert_eq!(wins, 1);
    assert_eq!(validation_losses, 1);

    // Exactly one payment was taken and one emerald handed out.
    let paid_a = 10 - oracle.count(buyer_a.id, &stone());
    let paid_b = 10 - oracle.count(buyer_b.id, &stone());
    assert_eq!(paid_a + paid_b, 2);
    assert_eq!(
        oracle.count(buyer_a.id, &ItemPayload::new("emerald"))
            + oracle.count(buyer_b.id, &ItemPayload::new("emerald")),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stock_never_oversells_under_concurrent_buyers() {
    let (registry, shop, listing) = shop_with_stock(5).await;
    let oracle = Arc::new(FakeInventory::new());

    let mut handles = Vec::new();
    for i in 0..10 {
        let registry = Arc::clone(&registry);
        let oracle = Arc::clone(&oracle);
        let buyer = Actor::new(format!("buyer-{i}"));
        oracle.stock(buyer.id, &stone(), 2);
        handles.push(tokio::spawn(async move {
            registry
                .purchase(&buyer, shop, listing, 1, oracle.as_ref())
                .await
                .is_ok()
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }

    // Five units existed; exactly five buyers can have won them.
    assert_eq!(successes, 5);
    let shop_state = registry.shop_by_id(shop).await.unwrap();
    assert!(shop_state.listing(listing).is_none());
    assert_eq!(shop_state.total_revenue_items(), 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn revenue_is_never_lost_to_concurrent_updates() {
    let (registry, shop, listing) = shop_with_stock(100).await;
    let oracle = Arc::new(FakeInventory::new());

    let mut handles = Vec::new();
    for i in 0..20 {
        let registry = Arc::clone(&registry);
        let oracle = Arc::clone(&oracle);
        let buyer = Actor::new(format!("buyer-{i}"));
        oracle.stock(buyer.id, &stone(), 10);
        handles.push(tokio::spawn(async move {
            registry
                .purchase(&buyer, shop, listing, 2, oracle.as_ref())
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // 20 buyers x 2 units x 2 stone = 80 stone, none lost.
    let shop_state = registry.shop_by_id(shop).await.unwrap();
    assert_eq!(shop_state.total_revenue_items(), 80);
    assert_eq!(shop_state.listing(listing).unwrap().quantity(), 60);
}
