mod helpers;

use helpers::CliRunner;
use serial_test::serial;

#[test]
#[serial]
fn blackjack_prints_rates_and_bust_table() {
    let res = CliRunner::new().run(&["blackjack", "--iterations", "2000", "--seed", "42"]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.starts_with("Blackjack (basic strategy)\n"));
    for label in [
        "Win rate:",
        "Blackjack rate:",
        "Push rate:",
        "Loss rate:",
        "Average net win:",
        "House edge:",
        "Dealer bust probability by up card",
    ] {
        assert!(res.stdout.contains(label), "missing {label}");
    }
    assert!(res.stdout.contains("   A: "));
    assert!(res.stdout.contains("  10: "));
    assert!(res.stderr.is_empty());
}

#[test]
#[serial]
fn blackjack_json_is_reproducible() {
    let cli = CliRunner::new();
    let args = [
        "blackjack",
        "--iterations",
        "1500",
        "--seed",
        "7",
        "--decks",
        "2",
        "--hit-soft-17",
        "--json",
    ];
    let a = cli.run(&args).json();
    let b = cli.run(&args).json();
    assert_eq!(a["rounds"]["counts"], b["rounds"]["counts"]);
    assert_eq!(a["rounds"]["fields"], b["rounds"]["fields"]);
    assert_eq!(a["dealer_bust"]["fields"], b["dealer_bust"]["fields"]);
    assert_eq!(a["rules"]["num_decks"].as_u64(), Some(2));
    assert_eq!(a["rules"]["dealer_hits_soft_17"].as_bool(), Some(true));

    let pct: f64 = a["rounds"]["percentages"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_f64().unwrap())
        .sum();
    assert!((pct - 100.0).abs() < 1e-9);
}

#[test]
#[serial]
fn surrender_flag_adds_surrender_rate() {
    let res = CliRunner::new().run(&[
        "blackjack",
        "--iterations",
        "500",
        "--seed",
        "1",
        "--surrender",
    ]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Surrender rate:"));
    assert!(res.stdout.contains("late surrender"));
}

#[test]
#[serial]
fn dealer_strategy_is_selectable() {
    let res = CliRunner::new().run(&[
        "blackjack",
        "--iterations",
        "300",
        "--seed",
        "2",
        "--strategy",
        "dealer",
    ]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.starts_with("Blackjack (dealer strategy)"));
}

#[test]
#[serial]
fn rtb_single_strategy_has_no_ranking() {
    let res = CliRunner::new().run(&[
        "rtb",
        "--iterations",
        "1000",
        "--seed",
        "3",
        "--strategy",
        "cashout-after-color",
    ]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Strategy: cashout-after-color"));
    assert!(res.stdout.contains("Expected value:"));
    assert!(!res.stdout.contains("Ranking"));
}

#[test]
#[serial]
fn rtb_json_ranks_all_strategies() {
    let res = CliRunner::new().run(&["rtb", "--iterations", "3000", "--seed", "11", "--json"]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    let v = res.json();
    assert_eq!(v["runs"].as_array().unwrap().len(), 3);
    let ranking = v["ranking"].as_array().unwrap();
    assert_eq!(ranking.len(), 3);

    let ev = |name: &str| {
        v["runs"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["strategy"] == name)
            .and_then(|r| r["ev_percent"].as_f64())
            .unwrap()
    };
    let first = ranking[0].as_str().unwrap();
    let last = ranking[2].as_str().unwrap();
    assert!(ev(first) >= ev(last));
}

#[test]
#[serial]
fn slots_reports_categories_and_rtp() {
    let res = CliRunner::new().run(&[
        "slots",
        "--iterations",
        "2000",
        "--seed",
        "5",
        "--reels",
        "3",
        "--symbols",
        "8",
    ]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.starts_with("Slot Machine\n"));
    assert_eq!(res.stdout.matches("Reel ").count(), 3);
    assert!(res.stdout.contains("Return to player:"));
}

#[test]
#[serial]
fn slots_payout_matches_bet_scale() {
    let cli = CliRunner::new();
    let one = cli
        .run(&["slots", "--iterations", "800", "--seed", "6", "--json"])
        .json();
    let five = cli
        .run(&["slots", "--iterations", "800", "--seed", "6", "--bet", "5", "--json"])
        .json();
    assert_eq!(one["stats"]["counts"], five["stats"]["counts"]);
    let p1 = one["stats"]["fields"]["payout"]["mean"].as_f64().unwrap();
    let p5 = five["stats"]["fields"]["payout"]["mean"].as_f64().unwrap();
    assert!((p5 - 5.0 * p1).abs() < 1e-9);
}

#[test]
#[serial]
fn all_runs_every_game_with_separators() {
    let res = CliRunner::new().run(&["all", "--iterations", "300", "--seed", "99"]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.starts_with("Seed: 99\n"));
    let separator = format!("\n{}\n", "=".repeat(60));
    assert_eq!(res.stdout.matches(&separator).count(), 2);
    let bj = res.stdout.find("Blackjack (basic strategy)").unwrap();
    let rtb = res.stdout.find("Ride the Bus").unwrap();
    let slots = res.stdout.find("Slot Machine").unwrap();
    assert!(bj < rtb && rtb < slots);
}

#[test]
fn version_flag_prints_name() {
    let res = CliRunner::new().run(&["--version"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.starts_with("croupier"));
}
