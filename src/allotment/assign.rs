use crate::allotment::SwapPolicy;
use crate::models::{BenchAssignment, Room, SeatsPerBench, Student};

/// Walk the mixed queue over rooms (input order) and benches `1..=benches`.
///
/// Caller must have validated capacity first; rooms left over once the queue is exhausted are
/// not touched. With two seats per bench, a partner from seat 1's branch is swapped with a
/// later queued student chosen by `policy`. The bumped student keeps its place in the queue
/// and is seated on a later bench.
pub fn assign(
    mut queue: Vec<Student>,
    rooms: &[Room],
    seats_per_bench: SeatsPerBench,
    policy: SwapPolicy,
) -> Vec<BenchAssignment> {
    let total = queue.len();
    let mut plan: Vec<BenchAssignment> = Vec::new();
    let mut idx = 0usize;
    let mut serial = 1usize;
    let mut swaps = 0usize;

    'rooms: for room in rooms {
        for bench in 1..=room.benches {
            if idx >= total {
                break 'rooms;
            }

            let first = idx;
            idx += 1;

            let mut second: Option<usize> = None;
            if seats_per_bench == SeatsPerBench::Two && idx < total {
                let pos = idx;
                idx += 1;
                if queue[first].branch_key() == queue[pos].branch_key() {
                    if let Some(src) = policy.swap_source(&queue, first, idx) {
                        queue.swap(pos, src);
                        swaps += 1;
                    }
                }
                second = Some(pos);
            }

            plan.push(BenchAssignment {
                serial,
                room: room.name.clone(),
                bench,
                seat1: queue[first].clone(),
                seat2: second.map(|p| queue[p].clone()),
            });
            serial += 1;
        }
    }

    tracing::debug!(benches = plan.len(), swaps, "benches assigned");
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(usn: &str, branch: &str) -> Student {
        Student::new(usn, usn, branch)
    }

    fn seat2_usn(a: &BenchAssignment) -> Option<&str> {
        a.seat2.as_ref().map(|s| s.usn.as_str())
    }

    #[test]
    fn one_per_bench_numbers_benches_from_one() {
        let queue = vec![st("1", "A"), st("2", "B"), st("3", "A")];
        let plan = assign(queue, &[Room::new("H1", 3)], SeatsPerBench::One, SwapPolicy::default());
        assert_eq!(plan.len(), 3);
        for (i, a) in plan.iter().enumerate() {
            assert_eq!(a.bench as usize, i + 1);
            assert_eq!(a.serial, i + 1);
            assert_eq!(a.room, "H1");
            assert!(a.seat2.is_none());
        }
    }

    #[test]
    fn same_branch_partner_is_swapped_with_next() {
        let queue = vec![st("X", "csA"), st("Y", "csA"), st("Z", "csB")];
        let plan = assign(queue, &[Room::new("R", 2)], SeatsPerBench::Two, SwapPolicy::SingleLookahead);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].seat1.usn, "X");
        assert_eq!(seat2_usn(&plan[0]), Some("Z"));
        assert_eq!(plan[1].seat1.usn, "Y");
        assert_eq!(plan[1].seat2, None);
    }

    #[test]
    fn same_branch_pair_is_kept_when_queue_is_exhausted() {
        let queue = vec![st("X", "csA"), st("Y", "csA")];
        let plan = assign(queue, &[Room::new("R", 1)], SeatsPerBench::Two, SwapPolicy::SingleLookahead);
        assert_eq!(seat2_usn(&plan[0]), Some("Y"));
    }

    #[test]
    fn lookahead_does_not_recheck_swapped_in_student() {
        // Z shares X's branch as well; the single lookahead still pulls it in.
        let queue = vec![st("X", "A"), st("Y", "A"), st("Z", "A"), st("W", "B")];
        let plan = assign(queue, &[Room::new("R", 2)], SeatsPerBench::Two, SwapPolicy::SingleLookahead);
        assert_eq!(seat2_usn(&plan[0]), Some("Z"));
        assert_eq!(plan[1].seat1.usn, "Y");
        assert_eq!(seat2_usn(&plan[1]), Some("W"));
    }

    #[test]
    fn scan_ahead_finds_first_other_branch() {
        let queue = vec![st("X", "A"), st("Y", "A"), st("Z", "A"), st("W", "B")];
        let plan = assign(queue, &[Room::new("R", 2)], SeatsPerBench::Two, SwapPolicy::ScanAhead);
        assert_eq!(seat2_usn(&plan[0]), Some("W"));
        assert_eq!(plan[1].seat1.usn, "Z");
        assert_eq!(seat2_usn(&plan[1]), Some("Y"));
    }

    #[test]
    fn stops_before_untouched_rooms() {
        let queue = vec![st("1", "A"), st("2", "B"), st("3", "C")];
        let rooms = vec![Room::new("R1", 2), Room::new("R2", 5), Room::new("R3", 5)];
        let plan = assign(queue, &rooms, SeatsPerBench::One, SwapPolicy::default());
        assert_eq!(plan.len(), 3);
        assert_eq!((plan[2].room.as_str(), plan[2].bench, plan[2].serial), ("R2", 1, 3));
        assert!(plan.iter().all(|a| a.room != "R3"));
    }

    #[test]
    fn empty_queue_yields_empty_plan() {
        let plan = assign(Vec::new(), &[Room::new("R", 4)], SeatsPerBench::Two, SwapPolicy::default());
        assert!(plan.is_empty());
    }
}
