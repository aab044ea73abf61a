mod common;

use std::collections::HashSet;
use url_alias::application::services::{LinkError, MAX_ALIAS_ATTEMPTS};

fn is_generated_alias(alias: &str) -> bool {
    alias.len() == 8 && alias.bytes().all(|b| b.is_ascii_lowercase())
}

#[tokio::test]
async fn test_create_generates_lowercase_alias() {
    let pool = common::test_pool().await;
    let service = common::create_test_service(pool);

    let alias = service
        .create_short_link("https://example.com", Some(""))
        .await
        .unwrap();

    assert!(is_generated_alias(&alias), "unexpected alias {alias}");
}

#[tokio::test]
async fn test_create_returns_existing_alias_for_known_url() {
    let pool = common::test_pool().await;
    let service = common::create_test_service(pool.clone());

    let first = service
        .create_short_link("https://a.com", Some("x1"))
        .await
        .unwrap();
    let second = service
        .create_short_link("https://a.com", Some(""))
        .await
        .unwrap();

    assert_eq!(first, "x1");
    assert_eq!(second, "x1");
    assert_eq!(common::count_links(&pool).await, 1);
}

#[tokio::test]
async fn test_create_twice_without_alias_is_idempotent() {
    let pool = common::test_pool().await;
    let service = common::create_test_service(pool.clone());

    let first = service
        .create_short_link("https://example.com", None)
        .await
        .unwrap();
    let second = service
        .create_short_link("https://example.com", None)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(
        common::count_links_for_url(&pool, "https://example.com").await,
        1
    );
}

#[tokio::test]
async fn test_create_with_taken_alias_conflicts() {
    let pool = common::test_pool().await;
    let service = common::create_test_service(pool.clone());

    service
        .create_short_link("https://a.com", Some("dup"))
        .await
        .unwrap();
    let result = service.create_short_link("https://b.com", Some("dup")).await;

    assert_eq!(result, Err(LinkError::Conflict("dup".to_string())));
    assert_eq!(common::count_links(&pool).await, 1);
}

#[tokio::test]
async fn test_explicit_alias_skips_idempotent_lookup() {
    let pool = common::test_pool().await;
    let service = common::create_test_service(pool.clone());

    service
        .create_short_link("https://a.com", Some("one"))
        .await
        .unwrap();
    let second = service
        .create_short_link("https://a.com", Some("two"))
        .await
        .unwrap();

    assert_eq!(second, "two");
    assert_eq!(common::count_links_for_url(&pool, "https://a.com").await, 2);
}

#[tokio::test]
async fn test_resolve_unknown_alias() {
    let pool = common::test_pool().await;
    let service = common::create_test_service(pool);

    let result = service.resolve_short_link("nope").await;

    assert_eq!(result, Err(LinkError::NotFound));
}

#[tokio::test]
async fn test_remove_then_resolve() {
    let pool = common::test_pool().await;
    let service = common::create_test_service(pool);

    service
        .create_short_link("https://a.com", Some("dup"))
        .await
        .unwrap();
    service.remove_short_link("dup").await.unwrap();

    assert_eq!(
        service.resolve_short_link("dup").await,
        Err(LinkError::NotFound)
    );
}

#[tokio::test]
async fn test_remove_unknown_alias() {
    let pool = common::test_pool().await;
    let service = common::create_test_service(pool);

    assert_eq!(
        service.remove_short_link("nope").await,
        Err(LinkError::NotFound)
    );
}

#[tokio::test]
async fn test_removed_alias_can_be_reused() {
    let pool = common::test_pool().await;
    let service = common::create_test_service(pool);

    service
        .create_short_link("https://a.com", Some("reuse"))
        .await
        .unwrap();
    service.remove_short_link("reuse").await.unwrap();

    let alias = service
        .create_short_link("https://b.com", Some("reuse"))
        .await
        .unwrap();

    assert_eq!(alias, "reuse");
    assert_eq!(
        service.resolve_short_link("reuse").await,
        Ok("https://b.com".to_string())
    );
}

#[tokio::test]
async fn test_removed_url_gets_fresh_alias() {
    let pool = common::test_pool().await;
    let service = common::create_test_service(pool.clone());

    let first = service
        .create_short_link("https://a.com", Some("old"))
        .await
        .unwrap();
    service.remove_short_link(&first).await.unwrap();

    let second = service
        .create_short_link("https://a.com", None)
        .await
        .unwrap();

    assert_ne!(second, "old");
    assert_eq!(common::count_links(&pool).await, 1);
}

#[tokio::test]
async fn test_resolve_returns_stored_url_exactly() {
    let pool = common::test_pool().await;
    let service = common::create_test_service(pool);

    let urls = [
        "https://example.com",
        "https://example.com/",
        "https://Example.com/Path?b=2&a=1#frag",
        "http://localhost:8080/über/%20space",
    ];

    for url in urls {
        let alias = service.create_short_link(url, None).await.unwrap();
        assert_eq!(service.resolve_short_link(&alias).await, Ok(url.to_string()));
    }
}

#[tokio::test]
async fn test_collision_retries_with_next_candidate() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "taken", "https://a.com").await;

    let service = common::create_scripted_service(pool, &["taken", "free"]);

    let alias = service
        .create_short_link("https://b.com", None)
        .await
        .unwrap();

    assert_eq!(alias, "free");
}

#[tokio::test]
async fn test_reserved_candidate_is_never_assigned() {
    let pool = common::test_pool().await;
    let service = common::create_scripted_service(pool.clone(), &["health", "target"]);

    let alias = service
        .create_short_link("https://target.com", None)
        .await
        .unwrap();

    assert_eq!(alias, "target");
    assert_eq!(
        service.resolve_short_link("health").await,
        Err(LinkError::NotFound)
    );
}

#[tokio::test]
async fn test_only_reserved_candidates_exhausts() {
    let pool = common::test_pool().await;
    let service = common::create_scripted_service(pool.clone(), &["url"]);

    let result = service.create_short_link("https://target.com", None).await;

    assert_eq!(
        result,
        Err(LinkError::Exhausted {
            attempts: MAX_ALIAS_ATTEMPTS
        })
    );
    assert_eq!(common::count_links(&pool).await, 0);
}

#[tokio::test]
async fn test_exhausted_when_every_candidate_is_taken() {
    let pool = common::test_pool().await;
    common::create_test_link(&pool, "taken", "https://a.com").await;

    let service = common::create_scripted_service(pool.clone(), &["taken"]);

    let result = service.create_short_link("https://b.com", None).await;

    assert_eq!(
        result,
        Err(LinkError::Exhausted {
            attempts: MAX_ALIAS_ATTEMPTS
        })
    );
    assert_eq!(common::count_links(&pool).await, 1);
}

#[tokio::test]
async fn test_concurrent_creates_never_share_an_alias() {
    let pool = common::test_pool().await;
    let service = common::create_test_service(pool.clone());

    let mut handles = Vec::new();
    for i in 0..20 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .create_short_link(&format!("https://example.com/{i}"), None)
                .await
        }));
    }

    let mut aliases = HashSet::new();
    for handle in handles {
        let alias = handle.await.unwrap().unwrap();
        assert!(aliases.insert(alias), "alias handed out twice");
    }

    assert_eq!(common::count_links(&pool).await, 20);
}

#[tokio::test]
async fn test_concurrent_same_alias_single_winner() {
    let pool = common::test_pool().await;
    let service = common::create_test_service(pool.clone());

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .create_short_link(&format!("https://example.com/{i}"), Some("race"))
                .await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(alias) => {
                assert_eq!(alias, "race");
                winners += 1;
            }
            Err(e) => assert_eq!(e, LinkError::Conflict("race".to_string())),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(common::count_links(&pool).await, 1);
}
