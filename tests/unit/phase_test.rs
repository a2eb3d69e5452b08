//! Unit tests for journey phases.

use matmind::progression::{get_phase, journey_stage_message, phase_in, validate_phases, Phase};

fn ladder() -> Vec<Phase> {
    vec![
        Phase { id: 1, name: "One", description: "", start: 0, goal: Some(10) },
        Phase { id: 2, name: "Two", description: "", start: 10, goal: Some(50) },
        Phase { id: 3, name: "Three", description: "", start: 50, goal: Some(100) },
    ]
}

#[test]
fn test_boundary_stays_in_phase_at_full_progress() {
    let phases = ladder();
    let phase = phase_in(&phases, 10).unwrap();
    assert_eq!(phase.current.goal, Some(10));
    assert_eq!(phase.progress_percent, 100);
    assert_eq!(phase.next.unwrap().goal, Some(50));
}

#[test]
fn test_mid_phase_progress_rounds() {
    let phases = ladder();
    let phase = phase_in(&phases, 25).unwrap();
    assert_eq!(phase.current.goal, Some(50));
    assert_eq!(phase.progress_percent, 38);
}

#[test]
fn test_zero_and_negative() {
    let phases = ladder();
    let zero = phase_in(&phases, 0).unwrap();
    assert_eq!(zero.current.id, 1);
    assert_eq!(zero.progress_percent, 0);
    assert_eq!(phase_in(&phases, -3).unwrap(), zero);
}

#[test]
fn test_beyond_last_goal() {
    let phases = ladder();
    let phase = phase_in(&phases, 250).unwrap();
    assert_eq!(phase.current.id, 3);
    assert!(phase.next.is_none());
    assert_eq!(phase.progress_percent, 100);
}

#[test]
fn test_builtin_phases() {
    assert_eq!(validate_phases(&ladder()), Ok(()));
    assert_eq!(get_phase(1).current.name, "The Baseline");
    assert_eq!(get_phase(11).current.name, "The Grind");
    assert_eq!(get_phase(51).current.name, "The Competitor");
    assert_eq!(get_phase(11).progress_percent, 3);
}

#[test]
fn test_phase_json_shape() {
    let json = serde_json::to_value(get_phase(25)).unwrap();
    assert_eq!(json["progressPercent"], 38);
    assert_eq!(json["current"]["id"], 2);
    assert_eq!(json["next"]["id"], 3);
}

#[test]
fn test_stage_messages_change_with_volume() {
    let messages: Vec<&str> = [0, 5, 20, 80, 200]
        .into_iter()
        .map(journey_stage_message)
        .collect();
    for pair in messages.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}
