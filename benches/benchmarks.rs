use flotilla::engine::constants::Constants;
use flotilla::game::frame::Frame;
use flotilla::game::player::Player;
use flotilla::game::ship::Ship;
use flotilla::grid::direction::Direction;
use flotilla::grid::position::Position;
use flotilla::grid::torus::Torus;
use flotilla::model::world::WorldModel;
use flotilla::search::penalty::PenaltyFactor;
use std::collections::BTreeMap;
use std::time::Duration;
use std::time::Instant;

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(Duration::from_secs(2));
    targets =
        searching_a_quarter_board,
        reconciling_a_crowded_row,
}

/// 32x32 board speckled with halite, deterministic layout
fn frame(ships: Vec<Ship>) -> Frame {
    let torus = Torus::new(32, 32);
    let halite = (0..torus.area())
        .map(|cell| ((cell * 73) % 997) as flotilla::Halite)
        .collect::<Vec<_>>();
    let players = vec![
        Player::new(0, Position { x: 8, y: 8 }),
        Player::new(1, Position { x: 24, y: 24 }),
    ];
    Frame::new(Constants::default(), torus, 1, 0, halite, players, ships)
}

fn searching_a_quarter_board(c: &mut criterion::Criterion) {
    c.bench_function("plan one unit to depth 32", |b| {
        let ship = Ship {
            id: 1,
            owner: 0,
            position: Position { x: 8, y: 8 },
            halite: 0,
        };
        let frame = frame(vec![ship]);
        let model = WorldModel::from(&frame);
        let home = Position { x: 8, y: 8 };
        b.iter(|| {
            let deadline = Instant::now() + Duration::from_secs(60);
            model.optimal_path(&ship, 0, PenaltyFactor::Decaying, home, deadline, 32, 0)
        })
    });
}

fn reconciling_a_crowded_row(c: &mut criterion::Criterion) {
    c.bench_function("reconcile 32 units shoving east", |b| {
        let ships = (0..32)
            .map(|i| Ship {
                id: i,
                owner: 0,
                position: Position { x: i as i32, y: 16 },
                halite: 0,
            })
            .collect::<Vec<_>>();
        let frame = frame(ships);
        let moves = (0..32)
            .map(|i| (i, Direction::East))
            .collect::<BTreeMap<_, _>>();
        b.iter(|| frame.reconcile(&moves, false, false))
    });
}
