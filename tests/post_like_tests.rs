mod helpers;

use blog_server::database::repositories::post_likes_cache::PostLikesCacheRepository;
use blog_server::database::table_names::POST_LIKES_CACHE_TABLE_NAME;
use blog_server::interfaces::map_cache::MapCacheInterface;
use blog_server::interfaces::repositories::like::LikesRepositoryInterface;
use blog_server::interfaces::repositories::post::PostsRepositoryInterface;
use helpers::post_helpers::{create_fake_post, post_service};

test_with_db!(like_twice_is_idempotent, |ctx_state, config| {
    let post = create_fake_post(&ctx_state, 1).await;
    let service = post_service(&ctx_state, 100);

    assert!(service.like_post(post.id, 10).await.unwrap());
    assert!(!service.like_post(post.id, 10).await.unwrap());
    assert_eq!(service.get_likes_by_post(post.id).await.unwrap(), vec![10]);

    let post = service.get_post(post.id).await.unwrap();
    assert_eq!(post.likes, 0);
});

test_with_db!(no_likes_is_empty, |ctx_state, config| {
    let post = create_fake_post(&ctx_state, 1).await;
    let service = ctx_state.post_service();
    assert!(service.get_likes_by_post(post.id).await.unwrap().is_empty());
    assert!(service.get_likes_by_post(424242).await.unwrap().is_empty());
});

test_with_db!(threshold_flushes_once, |ctx_state, config| {
    let post = create_fake_post(&ctx_state, 1).await;
    let service = post_service(&ctx_state, config.likes_sync_threshold);

    assert!(service.like_post(post.id, 1).await.unwrap());
    assert!(service.like_post(post.id, 2).await.unwrap());
    assert_eq!(service.get_likes_by_post(post.id).await.unwrap(), vec![1, 2]);
    let stored = ctx_state.db.likes.list_likes_by_post(post.id).await.unwrap();
    assert!(stored.is_empty());

    assert!(service.like_post(post.id, 3).await.unwrap());
    assert!(service.get_likes_by_post(post.id).await.unwrap().is_empty());

    let stored = ctx_state.db.likes.list_likes_by_post(post.id).await.unwrap();
    assert_eq!(stored.len(), 3);
    let post = service.get_post(post.id).await.unwrap();
    assert_eq!(post.likes, 3);
});

test_with_db!(repeat_like_after_flush_is_not_double_counted, |ctx_state, config| {
    let post = create_fake_post(&ctx_state, 1).await;
    let service = post_service(&ctx_state, 2);
    let (user_a, user_b) = (100, 200);

    assert!(service.like_post(post.id, user_a).await.unwrap());
    assert_eq!(service.get_likes_by_post(post.id).await.unwrap(), vec![user_a]);

    assert!(service.like_post(post.id, user_b).await.unwrap());
    assert!(service.get_likes_by_post(post.id).await.unwrap().is_empty());
    assert_eq!(service.get_post(post.id).await.unwrap().likes, 2);

    // the cache forgot user_a after the flush
    assert!(service.like_post(post.id, user_a).await.unwrap());
    assert_eq!(service.get_likes_by_post(post.id).await.unwrap(), vec![user_a]);

    assert_eq!(service.sync_likes(post.id).await.unwrap(), 2);
    let stored = ctx_state.db.likes.list_likes_by_post(post.id).await.unwrap();
    assert_eq!(stored.len(), 2);
});

test_with_db!(sync_heals_counter, |ctx_state, config| {
    let post = create_fake_post(&ctx_state, 1).await;
    let service = post_service(&ctx_state, 100);

    service.like_post(post.id, 5).await.unwrap();
    service.like_post(post.id, 6).await.unwrap();
    assert!(ctx_state.db.posts.set_likes(post.id, 999).await.unwrap());

    assert_eq!(service.sync_likes(post.id).await.unwrap(), 2);
    assert_eq!(service.get_post(post.id).await.unwrap().likes, 2);

    // sync without clear stays stable
    assert_eq!(service.sync_likes(post.id).await.unwrap(), 2);
    assert_eq!(
        ctx_state.db.likes.list_likes_by_post(post.id).await.unwrap().len(),
        2
    );
    assert_eq!(service.get_likes_by_post(post.id).await.unwrap(), vec![5, 6]);

    service.clear_cache(post.id).await.unwrap();
    assert!(service.get_likes_by_post(post.id).await.unwrap().is_empty());
});

test_with_db!(sync_skips_already_stored_likes, |ctx_state, config| {
    let post = create_fake_post(&ctx_state, 1).await;
    let service = post_service(&ctx_state, 100);

    ctx_state.db.likes.insert_like(post.id, 7).await.unwrap();
    service.like_post(post.id, 7).await.unwrap();
    service.like_post(post.id, 8).await.unwrap();

    assert_eq!(service.sync_likes(post.id).await.unwrap(), 2);
    let mut users = ctx_state
        .db
        .likes
        .list_likes_by_post(post.id)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.user_id)
        .collect::<Vec<i64>>();
    users.sort();
    assert_eq!(users, vec![7, 8]);
});

test_with_db!(concurrent_likes_are_not_lost, |ctx_state, config| {
    let post = create_fake_post(&ctx_state, 1).await;
    let service = post_service(&ctx_state, 100);

    let results = futures::future::join_all(
        (1..=20i64).map(|user_id| service.like_post(post.id, user_id)),
    )
    .await;
    assert!(results.into_iter().all(|r| r.unwrap()));

    let mut pending = service.get_likes_by_post(post.id).await.unwrap();
    pending.sort();
    assert_eq!(pending, (1..=20).collect::<Vec<i64>>());
    assert!(ctx_state.like_locks.is_empty());
});

test_with_db!(concurrent_likes_cross_threshold_once, |ctx_state, config| {
    let post = create_fake_post(&ctx_state, 1).await;
    let service = post_service(&ctx_state, 5);

    let results = futures::future::join_all(
        (1..=12i64).map(|user_id| service.like_post(post.id, user_id)),
    )
    .await;
    assert!(results.into_iter().all(|r| r.unwrap()));

    // two full batches stored, two likes pending
    let stored = ctx_state.db.likes.list_likes_by_post(post.id).await.unwrap();
    assert_eq!(stored.len(), 10);
    assert_eq!(service.get_likes_by_post(post.id).await.unwrap().len(), 2);
    assert_eq!(service.get_post(post.id).await.unwrap().likes, 10);
});

test_with_db!(flush_pending_stores_every_post, |ctx_state, config| {
    let first = create_fake_post(&ctx_state, 1).await;
    let second = create_fake_post(&ctx_state, 2).await;
    let service = post_service(&ctx_state, 100);

    service.like_post(first.id, 1).await.unwrap();
    service.like_post(second.id, 1).await.unwrap();
    service.like_post(second.id, 2).await.unwrap();

    assert_eq!(service.flush_pending().await.unwrap(), 2);
    assert_eq!(service.get_post(first.id).await.unwrap().likes, 1);
    assert_eq!(service.get_post(second.id).await.unwrap().likes, 2);

    let cache = PostLikesCacheRepository::new(&ctx_state.cache);
    assert!(cache.pending_posts().await.unwrap().is_empty());
    assert_eq!(service.flush_pending().await.unwrap(), 0);
});

test_with_db!(likes_of_missing_post_still_stored, |ctx_state, config| {
    let service = post_service(&ctx_state, 1);

    assert!(service.like_post(5555, 1).await.unwrap());
    assert!(service.get_likes_by_post(5555).await.unwrap().is_empty());
    let stored = ctx_state.db.likes.list_likes_by_post(5555).await.unwrap();
    assert_eq!(stored.len(), 1);
});

test_with_db!(flush_pending_skips_unreadable_rows, |ctx_state, config| {
    let first = create_fake_post(&ctx_state, 1).await;
    let second = create_fake_post(&ctx_state, 2).await;
    let service = post_service(&ctx_state, 100);

    service.like_post(first.id, 1).await.unwrap();
    service.like_post(second.id, 1).await.unwrap();
    service.like_post(second.id, 2).await.unwrap();
    ctx_state
        .cache
        .set_row(POST_LIKES_CACHE_TABLE_NAME, "999", "garbage")
        .await
        .unwrap();

    assert_eq!(service.flush_pending().await.unwrap(), 2);
    assert_eq!(service.get_post(first.id).await.unwrap().likes, 1);
    assert_eq!(service.get_post(second.id).await.unwrap().likes, 2);
    let stored = ctx_state.db.likes.list_likes_by_post(second.id).await.unwrap();
    assert_eq!(stored.len(), 2);

    let raw = ctx_state
        .cache
        .get_row(POST_LIKES_CACHE_TABLE_NAME, "999")
        .await
        .unwrap();
    assert_eq!(raw, "garbage");
});
