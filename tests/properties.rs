//! Property-based tests for reporting structure counts.
//!
//! Random report graphs are loaded into a fresh database and the calculator
//! is checked against a plain reachability oracle.

#![allow(clippy::unwrap_used)]

use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;

use employee_directory::models::Employee;
use employee_directory::services::{ReportingStructureCalculator, count_reports};
use employee_directory::store::{Database, EmployeeStore};

/// Adjacency lists indexed by employee number.
type Graph = Vec<Vec<usize>>;

fn id(index: usize) -> String {
    format!("emp_{:03}", index)
}

fn load(graph: &Graph) -> Database {
    let db = Database::new();
    let employees = db.employees();
    for (index, reports) in graph.iter().enumerate() {
        employees
            .add(Employee {
                id: id(index),
                first_name: format!("First{}", index),
                last_name: format!("Last{}", index),
                department: "Engineering".to_string(),
                position: "Developer".to_string(),
                direct_reports: reports.iter().map(|&r| id(r)).collect(),
            })
            .unwrap();
    }
    employees.save().unwrap();
    db
}

/// Distinct employees reachable from `root`, excluding `root` itself.
fn reachable(graph: &Graph, root: usize) -> usize {
    let mut seen = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        for &next in &graph[node] {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len() - 1
}

/// Generates a tree as a parent vector: node `i > 0` reports to a lower node.
fn arb_tree() -> impl Strategy<Value = Graph> {
    (1usize..60).prop_flat_map(|n| {
        prop::collection::vec(any::<prop::sample::Index>(), n - 1).prop_map(move |parents| {
            let mut graph = vec![Vec::new(); n];
            for (offset, parent) in parents.iter().enumerate() {
                let child = offset + 1;
                graph[parent.index(child)].push(child);
            }
            graph
        })
    })
}

/// Generates an arbitrary directed graph; shared reports, cycles and
/// self-loops are all allowed.
fn arb_graph() -> impl Strategy<Value = Graph> {
    (1usize..40).prop_flat_map(|n| {
        prop::collection::vec(
            prop::collection::vec(any::<prop::sample::Index>(), 0..4),
            n,
        )
        .prop_map(move |edges| {
            edges
                .into_iter()
                .map(|targets| targets.iter().map(|t| t.index(n)).collect())
                .collect()
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn tree_root_counts_every_other_employee(graph in arb_tree()) {
        let db = load(&graph);
        let calculator = ReportingStructureCalculator::new(db.employees());

        let structure = calculator.compute(&id(0)).unwrap().unwrap();

        prop_assert_eq!(structure.number_of_reports, graph.len() - 1);
        prop_assert_eq!(structure.employee.id, id(0));
    }

    #[test]
    fn tree_leaves_have_no_reports(graph in arb_tree()) {
        let db = load(&graph);
        let calculator = ReportingStructureCalculator::new(db.employees());

        for (index, reports) in graph.iter().enumerate() {
            if reports.is_empty() {
                let structure = calculator.compute(&id(index)).unwrap().unwrap();
                prop_assert_eq!(structure.number_of_reports, 0);
            }
        }
    }

    #[test]
    fn count_matches_distinct_reachable_employees(graph in arb_graph()) {
        let db = load(&graph);
        let employees = db.employees();

        for index in 0..graph.len() {
            let root = employees.get_by_id(&id(index)).unwrap().unwrap();
            let count = count_reports(&employees, &root).unwrap();
            prop_assert_eq!(count, reachable(&graph, index));
        }
    }

    #[test]
    fn count_never_exceeds_other_employees(graph in arb_graph(), pick in any::<prop::sample::Index>()) {
        let db = load(&graph);
        let root = pick.index(graph.len());

        let structure = ReportingStructureCalculator::new(db.employees())
            .compute(&id(root))
            .unwrap()
            .unwrap();

        prop_assert!(structure.number_of_reports < graph.len());
    }
}
