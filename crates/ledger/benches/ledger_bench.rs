use std::num::{NonZeroU32, NonZeroU64};

use common::{ItemName, OrderId};
use criterion::{Criterion, criterion_group, criterion_main};
use ledger::{Contents, InventoryLedger, ItemRecord, OrderLedger, OrderRecord};

fn stocked_inventory(rt: &tokio::runtime::Runtime, items: usize) -> (InventoryLedger, Vec<ItemName>) {
    let inventory = InventoryLedger::new();
    let names: Vec<ItemName> = (0..items).map(|i| ItemName::new(format!("item-{i:04}"))).collect();
    rt.block_on(async {
        for name in &names {
            inventory
                .add_item(name.clone(), ItemRecord::new("bench", "", 1_000_000))
                .await
                .unwrap();
        }
    });
    (inventory, names)
}

fn bench_stock_round_trip(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (inventory, names) = stocked_inventory(&rt, 1);
    let delta = NonZeroU64::new(3).unwrap();

    c.bench_function("ledger/increase_then_decrease", |b| {
        b.iter(|| {
            rt.block_on(async {
                inventory.increase_stock(&names[0], delta).await.unwrap();
                inventory.decrease_stock(&names[0], delta).await.unwrap();
            });
        });
    });
}

fn bench_query_counts(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (inventory, names) = stocked_inventory(&rt, 1_000);
    let query: Vec<ItemName> = names.iter().step_by(10).cloned().collect();

    c.bench_function("ledger/query_counts_100_of_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                inventory.query_counts(&query).await.unwrap();
            });
        });
    });
}

fn bench_create_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let orders = OrderLedger::new();
    let contents: Contents = (0..10)
        .map(|i| (ItemName::new(format!("item-{i}")), NonZeroU32::new(2).unwrap()))
        .collect();
    let mut next = 0u64;

    c.bench_function("ledger/create_order_10_items", |b| {
        b.iter(|| {
            next += 1;
            let id = OrderId::new(format!("O{next}"));
            rt.block_on(async {
                orders
                    .create_order(id, OrderRecord::new(contents.clone()))
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_stock_round_trip,
    bench_query_counts,
    bench_create_order
);
criterion_main!(benches);
