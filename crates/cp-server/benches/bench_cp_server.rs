use axum::body::Body;
use axum::http::Request;
use cp_codec::PuzzleCodec;
use cp_core::fallback_puzzle;
use cp_server::{app_with_state, state::AppState};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokio::runtime::Runtime;
use tower::ServiceExt;

fn bench_http_health(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    c.bench_function("http_health_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                let state = AppState::new();
                for _ in 0..1000 {
                    let app = app_with_state(state.clone());
                    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
                    let resp = app.oneshot(req).await.unwrap();
                    black_box(resp.status());
                }
            })
        })
    });
}

fn bench_http_links(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let puzzle = fallback_puzzle();
    let payload = PuzzleCodec::default().encode(&puzzle);
    let body = serde_json::to_vec(&serde_json::json!({ "puzzle": puzzle })).unwrap();

    c.bench_function("http_create_link_100", |b| {
        b.iter(|| {
            rt.block_on(async {
                let state = AppState::new();
                for _ in 0..100 {
                    let app = app_with_state(state.clone());
                    let req = Request::builder()
                        .method("POST")
                        .uri("/api/v1/links")
                        .header("content-type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap();
                    let resp = app.oneshot(req).await.unwrap();
                    black_box(resp.status());
                }
            })
        })
    });

    c.bench_function("http_resolve_100", |b| {
        let uri = format!("/api/v1/resolve?p={payload}");
        b.iter(|| {
            rt.block_on(async {
                let state = AppState::new();
                for _ in 0..100 {
                    let app = app_with_state(state.clone());
                    let req = Request::builder().uri(&uri).body(Body::empty()).unwrap();
                    let resp = app.oneshot(req).await.unwrap();
                    black_box(resp.status());
                }
            })
        })
    });
}

criterion_group!(benches, bench_http_health, bench_http_links);
criterion_main!(benches);
