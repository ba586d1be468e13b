use leaguedb::{Analytics, Competition, Foot, LeagueStore, Match, Player, ReturnValue, Stadium};

fn code<T>(result: leaguedb::Result<T>) -> ReturnValue {
    ReturnValue::from_result(&result)
}

fn store_with_teams(ids: &[i64]) -> LeagueStore {
    let store = LeagueStore::open_in_memory().unwrap();
    for &id in ids {
        store.add_team(id).unwrap();
    }
    store
}

#[test]
fn duplicate_keys_are_already_exists() {
    let store = store_with_teams(&[1, 2, 3]);

    assert_eq!(code(store.add_team(1)), ReturnValue::AlreadyExists);

    store.add_player(&Player::new(1, 1, 20, 180, Foot::Left)).unwrap();
    let other_fields = Player::new(1, 2, 31, 201, Foot::Right);
    assert_eq!(code(store.add_player(&other_fields)), ReturnValue::AlreadyExists);

    store.add_match(&Match::new(1, Competition::Domestic, 1, 2)).unwrap();
    let other_match = Match::new(1, Competition::International, 2, 3);
    assert_eq!(code(store.add_match(&other_match)), ReturnValue::AlreadyExists);

    store.add_stadium(&Stadium::new(1, 1000, Some(1))).unwrap();
    let other_stadium = Stadium::new(1, 2000, None);
    assert_eq!(code(store.add_stadium(&other_stadium)), ReturnValue::AlreadyExists);
}

#[test]
fn home_equals_away_is_bad_params() {
    let store = store_with_teams(&[1]);
    for competition in Competition::all() {
        let m = Match::new(7, *competition, 1, 1);
        assert_eq!(code(store.add_match(&m)), ReturnValue::BadParams);
    }
    assert!(store.get_match_profile(7).unwrap().is_none());
}

#[test]
fn missing_team_reference() {
    let store = store_with_teams(&[1]);

    let player = Player::new(1, 99, 20, 180, Foot::Left);
    assert_eq!(code(store.add_player(&player)), ReturnValue::BadParams);

    let stadium = Stadium::new(1, 1000, Some(99));
    assert_eq!(code(store.add_stadium(&stadium)), ReturnValue::BadParams);

    let away_missing = Match::new(1, Competition::Domestic, 1, 99);
    assert_eq!(code(store.add_match(&away_missing)), ReturnValue::BadParams);
    let both_missing = Match::new(2, Competition::International, 98, 99);
    assert_eq!(code(store.add_match(&both_missing)), ReturnValue::BadParams);

    // relationship tables report the missing side instead
    store.add_player(&Player::new(1, 1, 20, 180, Foot::Left)).unwrap();
    let ghost_match = Match::new(42, Competition::Domestic, 1, 2);
    let player = store.get_player_profile(1).unwrap().unwrap();
    assert_eq!(
        code(store.player_scored_in_match(&ghost_match, &player, 1)),
        ReturnValue::NotExists
    );
    assert_eq!(
        code(store.match_in_stadium(&ghost_match, &Stadium::new(5, 100, None), 10)),
        ReturnValue::NotExists
    );
}

#[test]
fn delete_then_get_is_not_found() {
    let store = store_with_teams(&[1, 2]);
    let player = Player::new(1, 1, 20, 180, Foot::Right);
    let m = Match::new(1, Competition::International, 1, 2);
    let stadium = Stadium::new(1, 30_000, Some(2));

    assert_eq!(code(store.delete_player(&player)), ReturnValue::NotExists);
    assert_eq!(code(store.delete_match(&m)), ReturnValue::NotExists);
    assert_eq!(code(store.delete_stadium(&stadium)), ReturnValue::NotExists);
    assert_eq!(code(store.delete_team(3)), ReturnValue::NotExists);

    store.add_player(&player).unwrap();
    store.add_match(&m).unwrap();
    store.add_stadium(&stadium).unwrap();

    assert_eq!(code(store.delete_player(&player)), ReturnValue::Ok);
    assert_eq!(code(store.delete_match(&m)), ReturnValue::Ok);
    assert_eq!(code(store.delete_stadium(&stadium)), ReturnValue::Ok);

    assert!(store.get_player_profile(1).unwrap().is_none());
    assert!(store.get_match_profile(1).unwrap().is_none());
    assert!(store.get_stadium_profile(1).unwrap().is_none());
}

#[test]
fn deleting_team_cascades() {
    let store = store_with_teams(&[1, 2]);
    store.add_player(&Player::new(1, 1, 20, 180, Foot::Left)).unwrap();
    store.add_stadium(&Stadium::new(1, 30_000, Some(1))).unwrap();

    store.delete_team(1).unwrap();

    assert!(store.get_team(1).unwrap().is_none());
    assert!(store.get_player_profile(1).unwrap().is_none());
    assert!(store.get_stadium_profile(1).unwrap().is_none());
}

#[test]
fn round_trip_profiles() {
    let store = store_with_teams(&[1, 2]);
    let player = Player::new(3, 2, 27, 191, Foot::Right);
    let m = Match::new(4, Competition::International, 2, 1);
    let owned = Stadium::new(5, 60_000, Some(1));
    let unowned = Stadium::new(6, 8_000, None);

    store.add_player(&player).unwrap();
    store.add_match(&m).unwrap();
    store.add_stadium(&owned).unwrap();
    store.add_stadium(&unowned).unwrap();

    assert_eq!(store.get_player_profile(3).unwrap(), Some(player));
    assert_eq!(store.get_match_profile(4).unwrap(), Some(m));
    assert_eq!(store.get_stadium_profile(5).unwrap(), Some(owned));
    assert_eq!(store.get_stadium_profile(6).unwrap(), Some(unowned));
}

#[test]
fn clear_keeps_schema() {
    let store = store_with_teams(&[1, 2]);
    let player = Player::new(1, 1, 20, 180, Foot::Left);
    let m = Match::new(1, Competition::Domestic, 1, 2);
    let stadium = Stadium::new(1, 10_000, Some(1));
    store.add_player(&player).unwrap();
    store.add_match(&m).unwrap();
    store.add_stadium(&stadium).unwrap();
    store.player_scored_in_match(&m, &player, 2).unwrap();
    store.match_in_stadium(&m, &stadium, 9_000).unwrap();

    store.clear_schema().unwrap();

    assert!(store.schema_exists().unwrap());
    assert!(store.get_team(1).unwrap().is_none());
    assert!(store.get_player_profile(1).unwrap().is_none());
    assert!(store.get_match_profile(1).unwrap().is_none());
    assert!(store.get_stadium_profile(1).unwrap().is_none());
    let stats = store.stats().unwrap();
    assert_eq!(stats.rows().iter().map(|(_, n)| n).sum::<usize>(), 0);

    store.add_team(1).unwrap();
    store.add_team(2).unwrap();
    assert_eq!(code(store.add_player(&player)), ReturnValue::Ok);
    assert_eq!(code(store.add_match(&m)), ReturnValue::Ok);
    assert_eq!(code(store.add_stadium(&stadium)), ReturnValue::Ok);
}

#[test]
fn popular_includes_hosts_without_attendance() {
    let store = store_with_teams(&[1, 2]);
    store.add_match(&Match::new(1, Competition::Domestic, 1, 2)).unwrap();

    assert_eq!(Analytics::new(&store).popular_teams().unwrap(), vec![2, 1]);
}

#[test]
fn active_tall_teams_only_counts_both() {
    let store = store_with_teams(&[1, 2, 3, 4, 5]);
    // team 1: tall and active
    store.add_player(&Player::new(1, 1, 20, 191, Foot::Left)).unwrap();
    store.add_player(&Player::new(2, 1, 20, 195, Foot::Left)).unwrap();
    // team 2: active only
    store.add_player(&Player::new(3, 2, 20, 191, Foot::Left)).unwrap();
    store.add_player(&Player::new(4, 2, 20, 190, Foot::Left)).unwrap();
    // team 3: tall only
    store.add_player(&Player::new(5, 3, 20, 200, Foot::Right)).unwrap();
    store.add_player(&Player::new(6, 3, 20, 201, Foot::Right)).unwrap();
    // team 4: neither
    store.add_player(&Player::new(7, 4, 20, 170, Foot::Right)).unwrap();

    store.add_match(&Match::new(1, Competition::Domestic, 1, 5)).unwrap();
    store.add_match(&Match::new(2, Competition::Domestic, 5, 2)).unwrap();

    let analytics = Analytics::new(&store);
    assert_eq!(analytics.active_tall_teams().unwrap(), vec![1]);
}

#[test]
fn winner_loses_to_bigger_score() {
    let store = store_with_teams(&[1, 2]);
    let first = Player::new(1, 1, 20, 180, Foot::Left);
    let second = Player::new(2, 2, 20, 180, Foot::Left);
    let m = Match::new(1, Competition::Domestic, 1, 2);
    store.add_player(&first).unwrap();
    store.add_player(&second).unwrap();
    store.add_match(&m).unwrap();
    let analytics = Analytics::new(&store);

    assert!(!analytics.player_is_winner(1, 1).unwrap());

    store.player_scored_in_match(&m, &first, 2).unwrap();
    assert!(analytics.player_is_winner(1, 1).unwrap());

    // an equal share still satisfies 2 * goals >= total
    store.player_scored_in_match(&m, &second, 2).unwrap();
    assert!(analytics.player_is_winner(1, 1).unwrap());

    store.player_didnt_score_in_match(&m, &second).unwrap();
    store.player_scored_in_match(&m, &second, 3).unwrap();
    assert!(!analytics.player_is_winner(1, 1).unwrap());
    assert!(analytics.player_is_winner(2, 1).unwrap());
}

#[test]
fn attractive_stadiums_include_zero_goal() {
    let store = store_with_teams(&[1, 2]);
    let scorer = Player::new(1, 1, 20, 180, Foot::Left);
    store.add_player(&scorer).unwrap();
    // stadiums A..E are 1..5
    for id in 1..=5 {
        store.add_stadium(&Stadium::new(id, 10_000, None)).unwrap();
    }
    let goals = [(1, 1, 3), (2, 2, 4), (3, 3, 3)];
    for (match_id, stadium_id, amount) in goals {
        let m = Match::new(match_id, Competition::Domestic, 1, 2);
        store.add_match(&m).unwrap();
        store.match_in_stadium(&m, &Stadium::new(stadium_id, 1, None), 500).unwrap();
        store.player_scored_in_match(&m, &scorer, amount).unwrap();
    }
    let scoreless = Match::new(4, Competition::Domestic, 2, 1);
    store.add_match(&scoreless).unwrap();
    store.match_in_stadium(&scoreless, &Stadium::new(5, 1, None), 500).unwrap();

    let analytics = Analytics::new(&store);
    assert_eq!(analytics.most_attractive_stadiums().unwrap(), vec![2, 1, 3, 4, 5]);
    assert_eq!(analytics.stadium_total_goals(2).unwrap(), 4);
    assert_eq!(analytics.stadium_total_goals(4).unwrap(), 0);
}

#[test]
fn file_backed_store_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("league.db");

    {
        let store = LeagueStore::open(&path).unwrap();
        store.add_team(1).unwrap();
        store.add_team(2).unwrap();
        store.add_match(&Match::new(1, Competition::International, 1, 2)).unwrap();
    }

    let store = LeagueStore::open(&path).unwrap();
    assert!(store.get_team(2).unwrap().is_some());
    assert_eq!(
        store.get_match_profile(1).unwrap().map(|m| m.competition),
        Some(Competition::International)
    );
    assert_eq!(code(store.create_schema()), ReturnValue::AlreadyExists);
}

#[test]
fn setup_teardown_cycle_on_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("league.db");
    let store = LeagueStore::connect(&path, 2).unwrap();

    assert!(!store.schema_exists().unwrap());
    assert_eq!(code(store.create_schema()), ReturnValue::Ok);
    assert!(store.schema_exists().unwrap());
    assert_eq!(code(store.drop_schema()), ReturnValue::Ok);
    assert!(!store.schema_exists().unwrap());
    assert_eq!(code(store.add_team(1)), ReturnValue::Error);
}

#[test]
fn store_is_shared_across_threads() {
    let dir = tempfile::tempdir().unwrap();
    let store = LeagueStore::open(&dir.path().join("league.db")).unwrap();

    let handles: Vec<_> = (1..=4)
        .map(|id| {
            let store = store.clone();
            std::thread::spawn(move || store.add_team(id))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert_eq!(store.stats().unwrap().teams, 4);
}
