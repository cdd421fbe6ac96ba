use cp_core::{fallback_puzzle, Palette};
use cp_session::{GameSession, SessionManager};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn play_to_win(session: &mut GameSession) {
    let categories = session.puzzle().categories.len();
    for c in 0..categories {
        let ids: Vec<usize> = session.tiles().iter().filter(|t| t.category == c).map(|t| t.id).collect();
        for id in ids {
            let _ = session.toggle(id);
        }
        let _ = session.submit();
    }
}

fn bench_session_play(c: &mut Criterion) {
    let puzzle = fallback_puzzle();
    c.bench_function("session_new", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| black_box(GameSession::new(puzzle.clone(), &mut rng)))
    });

    c.bench_function("session_play_to_win", |b| {
        let mut rng = StdRng::seed_from_u64(2);
        b.iter(|| {
            let Ok(mut session) = GameSession::new(puzzle.clone(), &mut rng) else {
                return;
            };
            play_to_win(&mut session);
            black_box(session.share_text(&Palette::default()));
        })
    });

    c.bench_function("session_shuffle_100", |b| {
        let mut rng = StdRng::seed_from_u64(3);
        let Ok(mut session) = GameSession::new(puzzle.clone(), &mut rng) else {
            return;
        };
        b.iter(|| {
            for _ in 0..100 {
                session.shuffle(&mut rng);
            }
            black_box(session.tiles().len());
        })
    });
}

fn bench_manager(c: &mut Criterion) {
    let puzzle = fallback_puzzle();
    let palette = Palette::default();
    c.bench_function("manager_create_1000", |b| {
        b.iter(|| {
            let mgr = SessionManager::new();
            for _ in 0..1000 {
                let _ = black_box(mgr.create(puzzle.clone(), &palette));
            }
        })
    });
}

criterion_group!(benches, bench_session_play, bench_manager);
criterion_main!(benches);
