// Integration tests for Propane Search

mod common;

use actix_web::{test, web, App};
use common::{create_catalog, FailingStore, RecordingStore, StoreCall};
use propane_search::core::{FuzzyMatcher, ProductSearch, SearchError};
use propane_search::models::{SearchResponse, SearchExpression};
use propane_search::routes::{configure_routes, products::AppState};
use propane_search::services::{CatalogStore, InMemoryCatalog, StoreError};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn create_search() -> ProductSearch<RecordingStore> {
    ProductSearch::with_defaults(RecordingStore::new(create_catalog()))
}

#[tokio::test]
async fn test_super_search_without_tag_is_union_of_filters_and_fuzzy() {
    let search = create_search();
    let cancel = CancellationToken::new();

    let result = search
        .super_search(0.0, 20.0, None, "the dragon shield", &cancel)
        .await
        .unwrap();

    // Recompute both halves directly against the store
    let expr = SearchExpression::new(vec!["dragon".to_string(), "shield".to_string()]);
    let structural = search
        .store()
        .price_range_and_text_search(0.0, 20.0, &expr)
        .await
        .unwrap();
    let fuzzy = FuzzyMatcher::sequential()
        .filter(search.store().list_all().await.unwrap(), "dragon shield", &cancel)
        .unwrap();

    let mut expected: Vec<i32> = structural.iter().map(|p| p.id).chain(fuzzy.ids()).collect();
    expected.sort();
    expected.dedup();

    assert_eq!(result.ids(), expected);
    assert_eq!(result.ids(), vec![1, 6]);
}

#[tokio::test]
async fn test_fuzzy_matches_bypass_price_filter() {
    let search = create_search();

    let result = search
        .super_search(0.0, 20.0, None, "metl dice", &CancellationToken::new())
        .await
        .unwrap();

    // "Metal Dice Set" costs 45.0 but is within edit distance of the query
    assert_eq!(result.ids(), vec![5]);
}

#[tokio::test]
async fn test_super_search_with_tag_uses_tagged_primitive_only() {
    let search = create_search();

    let result = search
        .super_search(0.0, 50.0, Some("dice"), "dice", &CancellationToken::new())
        .await
        .unwrap();

    assert!(search.store().called(StoreCall::PriceTagText));
    assert!(!search.store().called(StoreCall::PriceText));
    assert!(!search.store().called(StoreCall::Containment));
    assert_eq!(result.ids(), vec![2, 5]);
}

#[tokio::test]
async fn test_super_search_without_tag_uses_untagged_primitive_only() {
    let search = create_search();

    search
        .super_search(0.0, 50.0, None, "dice", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        search.store().calls(),
        vec![StoreCall::PriceText, StoreCall::ListAll]
    );
}

#[tokio::test]
async fn test_similar_search_queries_name_and_description() {
    let search = create_search();

    let result = search
        .find_by_similar_name_description("dragn sheild", &CancellationToken::new())
        .await
        .unwrap();

    let calls = search.store().calls();
    assert!(calls.contains(&StoreCall::NameSimilarity));
    assert!(calls.contains(&StoreCall::Containment));
    assert!(calls.contains(&StoreCall::ListAll));
    assert_eq!(result.ids(), vec![1]);
}

#[tokio::test]
async fn test_empty_expression_reaches_store_and_matches_all() {
    let search = create_search();

    // Every word is dropped, so the store receives "()"
    let products = search.find_by_description("the a of ?!").await.unwrap();
    assert_eq!(products.len(), create_catalog().len());

    // The fuzzy pass adds nothing for an empty query
    let result = search
        .super_search(0.0, 10.0, None, "--", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(result.ids(), vec![3]);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let search = ProductSearch::with_defaults(FailingStore);

    let err = search
        .super_search(0.0, 10.0, None, "dragon", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Store(StoreError::Unavailable(_))));

    let err = search.search_by_tag("dice").await.unwrap_err();
    assert!(matches!(err, SearchError::Store(_)));
}

#[tokio::test]
async fn test_cancelled_search_returns_no_partial_results() {
    let search = create_search();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = search.super_search(0.0, 50.0, None, "dice", &cancel).await;
    assert!(matches!(result, Err(SearchError::Cancelled)));
}

#[tokio::test]
async fn test_price_and_tag_lookups() {
    let search = ProductSearch::with_defaults(InMemoryCatalog::new(create_catalog()));

    let priced = search.search_by_price_range(11.99, 22.0).await.unwrap();
    let ids: Vec<i32> = priced.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 4, 6]);

    let tagged = search.search_by_tag("accessories").await.unwrap();
    let ids: Vec<i32> = tagged.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3, 6]);
}

fn app_state<S>(store: S) -> (AppState<S>, Arc<ProductSearch<S>>)
where
    S: CatalogStore,
{
    let search = Arc::new(ProductSearch::new(
        store,
        Default::default(),
        FuzzyMatcher::new(true),
    ));
    let state = AppState {
        search: Arc::clone(&search),
        search_timeout: None,
    };
    (state, search)
}

#[actix_web::test]
async fn test_route_super_search_null_tag_means_no_tag() {
    let (state, search) = app_state(RecordingStore::new(create_catalog()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes::<RecordingStore>),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/products/super-search")
        .set_json(serde_json::json!({
            "minPrice": 0.0,
            "maxPrice": 20.0,
            "tag": "NULL",
            "query": "dragon shield"
        }))
        .to_request();
    let resp: SearchResponse = test::call_and_read_body_json(&app, req).await;

    let ids: Vec<i32> = resp.products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 6]);
    assert_eq!(resp.total_results, 2);
    assert!(search.store().called(StoreCall::PriceText));
    assert!(!search.store().called(StoreCall::PriceTagText));
}

#[actix_web::test]
async fn test_route_similar_search() {
    let (state, _) = app_state(InMemoryCatalog::new(create_catalog()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes::<InMemoryCatalog>),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/products/similar?q=playmatt")
        .to_request();
    let resp: SearchResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.products.len(), 1);
    assert_eq!(resp.products[0].name, "Playmat");
}

#[actix_web::test]
async fn test_route_rejects_inverted_price_range() {
    let (state, _) = app_state(InMemoryCatalog::new(create_catalog()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes::<InMemoryCatalog>),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/products/price?min=30&max=10")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_route_tag_search() {
    let (state, _) = app_state(InMemoryCatalog::new(create_catalog()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes::<InMemoryCatalog>),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/products/tag/dice").to_request();
    let resp: SearchResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.total_results, 2);
}

#[actix_web::test]
async fn test_route_store_failure_is_500_and_health_degraded() {
    let (state, _) = app_state(FailingStore);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes::<FailingStore>),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/products/search?q=dragon")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 500);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "degraded");
}
