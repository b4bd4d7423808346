use ntm::{MachineBuilder, Machine, Move, NtmError, Outcome, Rule, BLANK};

fn single_rule_machine() -> Machine {
    MachineBuilder::new("Single rule", "q0")
        .states(["qf"])
        .input_alphabet("ab")
        .accept(["qf"])
        .rule(Rule::new("q0", 'a', "qf", 'a', Move::Right))
        .build()
        .unwrap()
}

#[test]
fn single_rule_accepts() {
    let run = single_rule_machine().simulate("a", 10).unwrap();

    assert_eq!(run.outcome(), Outcome::Accepted);
    assert_eq!(run.max_depth_reached(), 1);
    assert_eq!(run.total_transitions_explored(), 1);

    let path = run.path().unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path[0].state, "q0");
    assert_eq!(path[1].state, "qf");
    assert_eq!(path[1].tape.read(), BLANK);
}

#[test]
fn no_matching_rule_rejects() {
    let run = single_rule_machine().simulate("b", 10).unwrap();

    assert_eq!(run.outcome(), Outcome::Rejected);
    assert_eq!(run.max_depth_reached(), 0);
    assert_eq!(run.stats().dead_ends, 1);
    assert_eq!(run.stats().rejected, 0);
    assert_eq!(run.path(), Err(NtmError::NoWitness));
}

#[test]
fn zero_budget_is_inconclusive() {
    let run = single_rule_machine().simulate("a", 0).unwrap();

    assert_eq!(run.outcome(), Outcome::Inconclusive);
    assert_eq!(run.total_transitions_explored(), 0);
    assert_eq!(run.max_depth_reached(), 0);
    assert!(run.witness().is_none());
}

#[test]
fn branching_finds_acceptance_despite_looping_branch() {
    // The looping branch is declared first, so it is expanded first.
    let machine = MachineBuilder::new("Branching", "q0")
        .states(["loop", "qf"])
        .input_alphabet("a")
        .accept(["qf"])
        .rules([
            Rule::new("q0", 'a', "loop", 'a', Move::Right),
            Rule::new("q0", 'a', "qf", 'a', Move::Right),
            Rule::new("loop", BLANK, "loop", BLANK, Move::Right),
        ])
        .build()
        .unwrap();

    let run = machine.simulate("a", 10).unwrap();

    assert_eq!(run.outcome(), Outcome::Accepted);
    assert_eq!(run.max_depth_reached(), 1);
    assert_eq!(run.witness().unwrap().state, "qf");
}

#[test]
fn looping_machine_runs_out_of_budget() {
    let machine = MachineBuilder::new("Loop", "q0")
        .input_alphabet("a")
        .rules([
            Rule::new("q0", 'a', "q0", 'a', Move::Right),
            Rule::new("q0", BLANK, "q0", BLANK, Move::Left),
        ])
        .build()
        .unwrap();

    let run = machine.simulate("a", 25).unwrap();

    assert_eq!(run.outcome(), Outcome::Inconclusive);
    assert_eq!(run.total_transitions_explored(), 25);
    assert_eq!(run.max_depth_reached(), 25);
}

#[test]
fn input_outside_alphabet_is_refused() {
    let result = single_rule_machine().simulate("abc", 10);

    assert!(matches!(
        result,
        Err(NtmError::InvalidInput {
            symbol: 'c',
            position: 2
        })
    ));
}
