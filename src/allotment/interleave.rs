use std::collections::HashMap;

use crate::models::Student;

/// Round-robin the roster across branches.
///
/// Students are grouped by branch (keeping their relative order) and branches are visited in
/// the order they first appear. Round `i` takes the `i`-th student of every branch that still
/// has one, so short branches simply drop out of later rounds.
pub fn interleave(students: &[Student]) -> Vec<Student> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Student>> = Vec::new();

    for s in students {
        let slot = *index.entry(s.branch_key()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(s);
    }

    let max_len = groups.iter().map(Vec::len).max().unwrap_or(0);
    let mut mixed = Vec::with_capacity(students.len());
    for i in 0..max_len {
        for group in &groups {
            if let Some(s) = group.get(i) {
                mixed.push((*s).clone());
            }
        }
    }

    tracing::debug!(branches = groups.len(), students = mixed.len(), "interleaved roster");
    mixed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(usn: &str, branch: &str) -> Student {
        Student::new(usn, usn, branch)
    }

    fn usns(v: &[Student]) -> Vec<&str> {
        v.iter().map(|s| s.usn.as_str()).collect()
    }

    #[test]
    fn round_robin_in_first_seen_order() {
        let input = vec![
            st("A1", "A"), st("A2", "A"), st("B1", "B"),
            st("C1", "C"), st("A3", "A"), st("C2", "C"),
        ];
        assert_eq!(usns(&interleave(&input)), vec!["A1", "B1", "C1", "A2", "C2", "A3"]);
    }

    #[test]
    fn single_branch_is_unchanged() {
        let input = vec![st("1", "CSE"), st("2", "CSE"), st("3", "CSE")];
        assert_eq!(interleave(&input), input);
    }

    #[test]
    fn empty_roster() {
        assert!(interleave(&[]).is_empty());
    }

    #[test]
    fn blank_branches_share_a_group() {
        let input = vec![st("x1", ""), st("e1", "ECE"), st("x2", " "), st("e2", "ECE")];
        assert_eq!(usns(&interleave(&input)), vec!["x1", "e1", "x2", "e2"]);
        // the record itself keeps its original (blank) branch
        assert_eq!(interleave(&input)[0].branch, "");
    }
}
