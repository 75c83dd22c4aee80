use hallseat::allotment::{assign, interleave, validate, CapacityCheck};
use hallseat::error::CapacityError;
use hallseat::models::{BenchAssignment, Room, SeatsPerBench, Student};
use hallseat::{generate_plan, generate_plan_with_policy, SwapPolicy};
use std::collections::BTreeSet;

fn st(usn: &str, branch: &str) -> Student {
    Student::new(usn, format!("Student {}", usn), branch)
}

fn roster(branches: &[(&str, usize)]) -> Vec<Student> {
    let mut out = Vec::new();
    for (branch, n) in branches {
        for i in 1..=*n {
            out.push(st(&format!("{}{:03}", branch, i), branch));
        }
    }
    out
}

fn seated_usns(plan: &[BenchAssignment]) -> Vec<String> {
    plan.iter().flat_map(|a| a.students()).map(|s| s.usn.clone()).collect()
}

#[test]
fn every_student_is_seated_exactly_once() {
    let students = roster(&[("CSE", 17), ("ECE", 9), ("ME", 4), ("", 3)]);
    let rooms = vec![Room::new("A101", 10), Room::new("A102", 6), Room::new("B201", 8)];

    for seats in [SeatsPerBench::One, SeatsPerBench::Two] {
        for policy in [SwapPolicy::SingleLookahead, SwapPolicy::ScanAhead] {
            let rooms = if seats == SeatsPerBench::One {
                vec![Room::new("A101", 20), Room::new("A102", 15)]
            } else {
                rooms.clone()
            };
            let plan = generate_plan_with_policy(&students, &rooms, seats, policy).unwrap();
            let seated = seated_usns(&plan);
            let unique: BTreeSet<_> = seated.iter().cloned().collect();
            let expected: BTreeSet<_> = students.iter().map(|s| s.usn.clone()).collect();
            assert_eq!(seated.len(), students.len(), "{:?} {:?}", seats, policy);
            assert_eq!(unique, expected, "{:?} {:?}", seats, policy);
        }
    }
}

#[test]
fn capacity_gate_matches_seat_arithmetic() {
    let rooms = vec![Room::new("A", 2), Room::new("B", 3)];
    for n in 0..=12usize {
        for seats in [SeatsPerBench::One, SeatsPerBench::Two] {
            let capacity = 5 * seats.get();
            let res = validate(n, &rooms, seats);
            assert_eq!(res.is_err(), capacity < n, "n={} seats={:?}", n, seats);
        }
    }
}

#[test]
fn capacity_error_reports_all_counts() {
    let students = roster(&[("CSE", 7)]);
    let err = generate_plan(&students, &[Room::new("A", 3)], SeatsPerBench::Two).unwrap_err();
    assert_eq!(err, CapacityError { total_students: 7, total_benches: 3, total_capacity: 6 });
    assert!(err.to_string().contains('7'));
}

#[test]
fn interleave_visits_branches_in_first_seen_order() {
    let students = vec![st("A1", "A"), st("A2", "A"), st("B1", "B"), st("C1", "C"), st("A3", "A"), st("C2", "C")];
    let order: Vec<String> = interleave(&students).into_iter().map(|s| s.usn).collect();
    assert_eq!(order, ["A1", "B1", "C1", "A2", "C2", "A3"]);
}

#[test]
fn one_seat_per_bench_numbers_benches_in_order() {
    let students = roster(&[("CSE", 3)]);
    let plan = generate_plan(&students, &[Room::new("A101", 3)], SeatsPerBench::One).unwrap();
    let benches: Vec<u32> = plan.iter().map(|a| a.bench).collect();
    assert_eq!(benches, [1, 2, 3]);
    assert!(plan.iter().all(|a| a.room == "A101" && a.seat2.is_none()));
}

#[test]
fn same_branch_partner_is_swapped_with_the_next_student() {
    let queue = vec![st("X", "csA"), st("Y", "csA"), st("Z", "csB")];

    let plan = assign(queue.clone(), &[Room::new("R", 1)], SeatsPerBench::Two, SwapPolicy::SingleLookahead);
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].seat1.usn, "X");
    assert_eq!(plan[0].seat2.as_ref().map(|s| s.usn.as_str()), Some("Z"));

    let plan = assign(queue, &[Room::new("R", 2)], SeatsPerBench::Two, SwapPolicy::SingleLookahead);
    assert_eq!(plan.len(), 2);
    assert_eq!(plan[1].bench, 2);
    assert_eq!(plan[1].seat1.usn, "Y");
    assert!(plan[1].seat2.is_none());
}

#[test]
fn interleaved_two_branch_roster_never_pairs_a_branch_with_itself() {
    let students = roster(&[("CSE", 6), ("ECE", 6)]);
    let plan = generate_plan(&students, &[Room::new("A101", 6)], SeatsPerBench::Two).unwrap();
    for a in &plan {
        let s2 = a.seat2.as_ref().unwrap();
        assert_ne!(a.seat1.branch, s2.branch, "bench {}", a.bench);
    }
}

#[test]
fn rooms_fill_in_input_order_and_spare_rooms_stay_empty() {
    let students = roster(&[("CSE", 3), ("ECE", 2)]);
    let rooms = vec![Room::new("Z9", 2), Room::new("A1", 2), Room::new("M5", 4)];
    let plan = generate_plan(&students, &rooms, SeatsPerBench::One).unwrap();
    let used: Vec<(&str, u32)> = plan.iter().map(|a| (a.room.as_str(), a.bench)).collect();
    assert_eq!(used, [("Z9", 1), ("Z9", 2), ("A1", 1), ("A1", 2), ("M5", 1)]);
    let serials: Vec<usize> = plan.iter().map(|a| a.serial).collect();
    assert_eq!(serials, [1, 2, 3, 4, 5]);
}

#[test]
fn validation_has_no_side_effects() {
    let rooms = vec![Room::new("A", 4)];
    let first = validate(7, &rooms, SeatsPerBench::Two);
    let second = validate(7, &rooms, SeatsPerBench::Two);
    assert_eq!(first, second);
    assert_eq!(first, Ok(CapacityCheck { total_students: 7, total_benches: 4, total_capacity: 8 }));
    assert_eq!(rooms, vec![Room::new("A", 4)]);
}

#[test]
fn empty_inputs() {
    let plan = assign(Vec::new(), &[Room::new("A", 5)], SeatsPerBench::Two, SwapPolicy::default());
    assert!(plan.is_empty());
    assert!(validate(0, &[], SeatsPerBench::One).is_ok());
    assert_eq!(generate_plan(&[], &[], SeatsPerBench::Two), Ok(Vec::new()));
}

#[test]
fn generation_is_deterministic() {
    let students = roster(&[("CSE", 5), ("ECE", 3), ("CIV", 4)]);
    let rooms = vec![Room::new("A", 4), Room::new("B", 4)];
    let a = generate_plan(&students, &rooms, SeatsPerBench::Two).unwrap();
    let b = generate_plan(&students, &rooms, SeatsPerBench::Two).unwrap();
    assert_eq!(a, b);
}
