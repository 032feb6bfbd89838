use minesweep_core::*;

#[test]
fn winning_game_lands_in_its_bucket() {
    let config = GameConfig::new(2, 2, 1).unwrap();
    let mut game = Game::with_generator(
        GameSettings::classic(config),
        FixedGenerator::new([(1, 1)]),
        0,
    );
    game.reveal((0, 0));
    for _ in 0..3 {
        game.tick();
    }
    game.reveal((0, 1));
    game.reveal((1, 0));
    assert_eq!(game.phase(), Phase::Won);

    let bucket = Bucket::new(game.mode().kind(), Difficulty::Easy);
    let mut store = MemoryStore::default();
    let entry = HighScoreEntry::new("Grace Hopper", game.elapsed_secs().into(), 1_700_000_000);

    assert_eq!(store.record(bucket, entry), Ok(Some(0)));

    let table = store.load();
    assert_eq!(table.entries(bucket)[0].time, 3);
    assert_eq!(table.entries(bucket)[0].initials, "GH");
}

#[test]
fn many_insertions_keep_ten_sorted_entries_per_bucket() {
    let mut store = MemoryStore::default();
    let times = [41, 7, 93, 7, 12, 88, 3, 55, 19, 70, 64, 2, 31, 99, 15];

    for bucket in Bucket::all() {
        for (i, &time) in times.iter().enumerate() {
            let entry = HighScoreEntry::new("player", time, i as i64);
            store.record(bucket, entry).unwrap();
        }
    }

    let table = store.load();
    for bucket in Bucket::all() {
        let entries = table.entries(bucket);
        assert_eq!(entries.len(), MAX_ENTRIES);
        assert!(entries.windows(2).all(|pair| pair[0].time <= pair[1].time));
        assert_eq!(entries[0].time, 2);
        assert_eq!(entries[MAX_ENTRIES - 1].time, 55);
    }
}

#[test]
fn slow_time_on_full_bucket_does_not_rewrite_store() {
    let bucket = Bucket::new(ModeKind::TimeAttack, Difficulty::Medium);
    let mut store = MemoryStore::default();
    for time in 1..=10 {
        store.record(bucket, HighScoreEntry::new("p", time, 0)).unwrap();
    }
    let before = store.blob().map(str::to_owned);

    assert_eq!(store.record(bucket, HighScoreEntry::new("late", 500, 0)), Ok(None));
    assert_eq!(store.blob().map(str::to_owned), before);
}
