use chess::board::{KIWIPETE_FEN, Position, START_FEN, init_magic_tables};
use chess::utils::perft;
use criterion::{Criterion, criterion_group, criterion_main};

fn perft_benches(c: &mut Criterion) {
    init_magic_tables();

    let start = Position::from_fen(START_FEN).unwrap();
    let kiwipete = Position::from_fen(KIWIPETE_FEN).unwrap();

    c.bench_function("perft startpos d3", |b| {
        b.iter(|| perft(std::hint::black_box(&start), 3))
    });

    c.bench_function("perft kiwipete d2", |b| {
        b.iter(|| perft(std::hint::black_box(&kiwipete), 2))
    });
}

criterion_group!(benches, perft_benches);
criterion_main!(benches);
