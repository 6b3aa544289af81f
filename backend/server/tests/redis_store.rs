//! Runs against a live redis. `REDIS_URL=redis://127.0.0.1:6379 cargo test -- --ignored`
use std::env;

use anika_blue::{
    color::Rgb,
    database::{
        RedisStore,
        migrations::{latest_version, run_migrations},
        redis_store::init_redis,
    },
    session::new_user_id,
};

fn redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

/// A color derived from a fresh user id, unlikely to collide with earlier runs.
fn unique_color(user_id: &str) -> Rgb {
    Rgb::parse_hex(&user_id[..6]).unwrap()
}

#[tokio::test]
#[ignore]
async fn test_migrations_are_idempotent() {
    let mut connection = init_redis(&redis_url()).await.unwrap();

    assert_eq!(run_migrations(&mut connection).await.unwrap(), latest_version());
    assert_eq!(run_migrations(&mut connection).await.unwrap(), latest_version());
}

#[tokio::test]
#[ignore]
async fn test_votes_and_averages() {
    let store = RedisStore::connect(&redis_url()).await.unwrap();
    let user_id = new_user_id();

    assert_eq!(store.user_average(&user_id).await.unwrap(), None);

    store.record_vote(&user_id, Rgb::new(0, 0, 0xff), true).await.unwrap();
    store.record_vote(&user_id, Rgb::new(0, 0, 0x99), true).await.unwrap();
    store.record_vote(&user_id, Rgb::new(0xff, 0, 0), false).await.unwrap();

    let average = store.user_average(&user_id).await.unwrap().unwrap();
    assert_eq!(average.count, 2);
    assert_eq!(average.color, Rgb::new(0, 0, 204));

    let votes = store.user_votes(&user_id).await.unwrap();
    assert_eq!(votes.len(), 3);
    assert_eq!(votes[0].hex_color, "#0000ff");
    assert!(!votes[2].is_anika_blue);

    assert!(store.global_average().await.unwrap().unwrap().count >= 2);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_votes_are_not_lost() {
    let store = RedisStore::connect(&redis_url()).await.unwrap();
    let user_id = new_user_id();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let store = store.clone();
            let user_id = user_id.clone();
            tokio::spawn(async move {
                store
                    .record_vote(&user_id, Rgb::new(0, 0, 200), true)
                    .await
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.user_average(&user_id).await.unwrap().unwrap().count, 50);
    assert_eq!(store.user_votes(&user_id).await.unwrap().len(), 50);
}

#[tokio::test]
#[ignore]
async fn test_base_colors() {
    let store = RedisStore::connect(&redis_url()).await.unwrap();
    let user_id = new_user_id();
    let first = unique_color(&user_id);
    let second = Rgb::new(!first.r, !first.g, !first.b);

    assert_eq!(store.get_base_color(&user_id).await.unwrap(), None);

    store.set_base_color(&user_id, first).await.unwrap();
    assert_eq!(
        store.find_user_by_base_color(&first.to_hex()).await.unwrap(),
        Some(user_id.clone())
    );

    store.set_base_color(&user_id, second).await.unwrap();
    assert_eq!(
        store.get_base_color(&user_id).await.unwrap(),
        Some(second.to_hex())
    );
    assert_ne!(
        store.find_user_by_base_color(&first.to_hex()).await.unwrap(),
        Some(user_id.clone())
    );
}

#[tokio::test]
#[ignore]
async fn test_votes_keep_base_color_at_average() {
    let store = RedisStore::connect(&redis_url()).await.unwrap();
    let user_id = new_user_id();

    let recorded = store.record_vote(&user_id, Rgb::new(0, 0, 0xff), false).await.unwrap();
    assert_eq!(recorded.user_average, None);
    assert_eq!(store.get_base_color(&user_id).await.unwrap(), None);

    for color in [Rgb::new(0, 0, 0xff), Rgb::new(0x11, 0x22, 0x99), Rgb::new(0x05, 0x40, 0xd0)] {
        let recorded = store.record_vote(&user_id, color, true).await.unwrap();
        let average = store.user_average(&user_id).await.unwrap();

        assert_eq!(recorded.user_average, average);
        assert_eq!(
            store.get_base_color(&user_id).await.unwrap(),
            average.map(|average| average.color.to_hex())
        );
    }

    let handles: Vec<_> = (0..20u8)
        .map(|i| {
            let store = store.clone();
            let user_id = user_id.clone();
            tokio::spawn(async move {
                store
                    .record_vote(&user_id, Rgb::new(i * 10, i, 200), true)
                    .await
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    let average = store.user_average(&user_id).await.unwrap().unwrap();
    assert_eq!(average.count, 23);
    assert_eq!(
        store.get_base_color(&user_id).await.unwrap(),
        Some(average.color.to_hex())
    );
    assert_eq!(
        store.save_base_color(&user_id).await.unwrap(),
        Some(average)
    );
}

#[tokio::test]
#[ignore]
async fn test_shown_shades() {
    let store = RedisStore::connect(&redis_url()).await.unwrap();
    let user_id = new_user_id();

    store.record_shown(&user_id, Rgb::new(0, 0, 200)).await.unwrap();
    store.record_shown(&user_id, Rgb::new(0, 0, 201)).await.unwrap();

    assert_eq!(store.shown_count(&user_id).await.unwrap(), 2);
}
