use std::str::from_utf8;

use teller::{bank::Bank, bin_utils::Shell};

/// Runs one menu session over in-memory IO and returns everything the
/// shell printed.
fn run_session(bank: Bank, script: &str) -> String {
    let mut output = Vec::new();
    let shell = Shell {
        input: script.as_bytes(),
        output: &mut output,
        bank,
    };
    shell.run().unwrap();
    from_utf8(&output).unwrap().to_owned()
}

#[test]
fn menu_session_covers_all_operations() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("bank_state.csv");
    let bank = Bank::open(&state_path).unwrap();

    let script = "\
1
Alice
100.0
1
Bob
25.0
3
1
200.0
2
2
10.0
4
1
2
40.0
5
1
5
2
9
5
77
4
1
1
5.0
1
Mallory
-5.0
exit
";
    let output = run_session(bank, script);

    assert!(output.contains("Account created: ID 1"));
    assert!(output.contains("Account created: ID 2"));
    assert!(output.contains("Error: Insufficient funds"));
    assert!(output.contains("Deposit successful."));
    assert!(output.contains("Transfer successful."));
    assert!(output.contains("Current balance: 60.0"));
    assert!(output.contains("Current balance: 75.0"));
    assert!(output.contains("Invalid option. Please choose 1-6, or type 'exit' to quit."));
    assert!(output.contains("Error: Account `77` not found"));
    assert!(output.contains("Error: Cannot transfer to the same account"));
    assert!(output.contains("Error: Amount must not be negative"));
    assert!(output.contains("Goodbye!"));

    // the rejected operations left no trace in the state file
    let state = std::fs::read_to_string(&state_path).unwrap();
    assert_eq!(
        state,
        "account_id,owner_name,balance\n1,Alice,60.0\n2,Bob,75.0\n"
    );
}

#[test]
fn state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let state_path = dir.path().join("bank_state.csv");

    let bank = Bank::open(&state_path).unwrap();
    run_session(bank, "1\nAlice\n100.0\n1\nBob\n25.0\n6\n");

    // a fresh process over the same file sees the same ledger
    let bank = Bank::open(&state_path).unwrap();
    assert_eq!(bank.check_balance("1").unwrap().to_string(), "100.0");
    assert_eq!(bank.check_balance("2").unwrap().to_string(), "25.0");

    let output = run_session(bank, "1\nCarol\n0\nquit\n");
    assert!(output.contains("Account created: ID 3"));
    assert!(output.contains("Goodbye!"));
}

#[test]
fn bad_amount_input_keeps_the_session_alive() {
    let dir = tempfile::tempdir().unwrap();
    let bank = Bank::open(dir.path().join("bank_state.csv")).unwrap();

    let output = run_session(bank, "1\nAlice\n100.0\n2\n1\nlots\n5\n1\n6\n");
    assert!(!output.contains("Deposit successful."));
    assert!(output.contains("Error: "));
    assert!(output.contains("Current balance: 100.0"));
}

#[test]
fn end_of_input_ends_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let bank = Bank::open(dir.path().join("bank_state.csv")).unwrap();

    // input runs out mid-prompt
    let output = run_session(bank, "1\nAlice\n");
    assert!(output.contains("Owner Name: "));
    assert!(!output.contains("Goodbye!"));
}
