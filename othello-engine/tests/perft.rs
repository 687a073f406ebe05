use othello_engine::test_utils::run_perft;

#[test]
fn perft_5() {
    assert_eq!(run_perft(5), 1396);
}

#[test]
fn perft_6() {
    assert_eq!(run_perft(6), 8200);
}

#[test]
fn perft_7() {
    assert_eq!(run_perft(7), 55092);
}

#[test]
#[ignore = "slow without optimizations"]
fn perft_8() {
    assert_eq!(run_perft(8), 390216);
}

// Passing moves begin here.
#[test]
#[ignore = "slow without optimizations"]
fn perft_9() {
    assert_eq!(run_perft(9), 3005288);
}
