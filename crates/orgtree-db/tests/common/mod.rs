//! Backend-independent checks for the `NodeRepository` contract.
//!
//! Each check takes a fresh, empty repository. The backend test files run
//! every check against their own repository type.

#![allow(dead_code)]

use orgtree_core::{
    CityAscent, ForestIndex, LoadOutcome, Lookup, NodeId, NodeKind, NodeRepository, OrgDirectory,
    OrgNode, OrgSummary, OrgTreeError, QueryEngine, resolve,
};

pub fn node(id: NodeId, parent: Option<NodeId>, name: &str, kind: NodeKind) -> OrgNode {
    OrgNode::new(id, parent, name, kind)
}

pub fn scenario_a() -> Vec<OrgNode> {
    vec![
        node(1, None, "Paris", NodeKind::City),
        node(2, Some(1), "Sales", NodeKind::Department),
        node(3, Some(2), "Alice", NodeKind::Employee),
    ]
}

/// Several cities, nested departments, a city nested under a department,
/// a city-less root department and an employee directly under a city.
pub fn sample_forest() -> Vec<OrgNode> {
    vec![
        node(1, None, "Paris", NodeKind::City),
        node(2, Some(1), "Sales", NodeKind::Department),
        node(3, Some(2), "Inside Sales", NodeKind::Department),
        node(4, Some(2), "Alice", NodeKind::Employee),
        node(5, Some(3), "Bob", NodeKind::Employee),
        node(6, Some(3), "Carol", NodeKind::Employee),
        node(7, None, "Lyon", NodeKind::City),
        node(8, Some(7), "Support", NodeKind::Department),
        node(9, Some(8), "Dave", NodeKind::Employee),
        node(10, Some(8), "Annecy", NodeKind::City),
        node(11, Some(10), "Ops", NodeKind::Department),
        node(12, Some(11), "Eve", NodeKind::Employee),
        node(13, None, "Remote", NodeKind::Department),
        node(14, Some(13), "Frank", NodeKind::Employee),
        node(15, Some(1), "Gina", NodeKind::Employee),
    ]
}

fn ids(nodes: &[OrgNode]) -> Vec<NodeId> {
    nodes.iter().map(|n| n.id).collect()
}

pub async fn check_scenario_a<R: NodeRepository>(repo: R) {
    let directory = OrgDirectory::new(repo);
    let outcome = directory.initialize(scenario_a()).await.unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded { nodes: 3 });

    let engine = directory.engine();
    let alice = engine.find_entity(3).await.unwrap();
    assert_eq!(alice.kind, NodeKind::Employee);
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.city_id, Some(1));

    let siblings = engine.siblings_of(2).await.unwrap();
    assert_eq!(siblings, vec![alice.clone()]);

    let colleagues = engine.colleagues_in_city(2).await.unwrap().unwrap();
    assert_eq!(colleagues.city_name(), "Paris");
    assert_eq!(colleagues.employees, vec![alice]);
}

pub async fn check_scenario_b<R: NodeRepository>(repo: R) {
    let directory = OrgDirectory::new(repo);
    directory
        .initialize(vec![
            node(1, None, "Remote", NodeKind::Department),
            node(2, Some(1), "Eve", NodeKind::Employee),
        ])
        .await
        .unwrap();

    let engine = directory.engine();
    assert_eq!(engine.find_entity(2).await.unwrap().city_id, None);
    assert_eq!(engine.colleagues_in_city(1).await.unwrap(), None);

    match directory.lookup(2).await.unwrap() {
        Lookup::Employee { city, department, .. } => {
            assert_eq!(city, None);
            assert_eq!(ids(&department), vec![2]);
        }
        other => panic!("expected employee lookup, got {other:?}"),
    }
}

pub async fn check_scenario_c<R: NodeRepository>(repo: R) {
    let directory = OrgDirectory::new(repo);
    let err = directory
        .initialize(vec![
            node(1, Some(2), "A", NodeKind::Department),
            node(2, Some(1), "B", NodeKind::Department),
        ])
        .await
        .unwrap_err();

    assert_eq!(err, OrgTreeError::CycleDetected { members: vec![1, 2] });
    assert!(err.is_resolution_error());

    let repo = directory.engine().repository();
    assert!(!repo.exists().await.unwrap());
    assert!(repo.all_nodes().await.unwrap().is_empty());
}

pub async fn check_scenario_d<R: NodeRepository>(repo: R) {
    let directory = OrgDirectory::new(repo);
    let mut seed = scenario_a();
    seed.push(node(5, Some(999), "Bob", NodeKind::Employee));

    let err = directory.initialize(seed).await.unwrap_err();
    assert_eq!(err, OrgTreeError::MissingNode { id: 999 });

    let repo = directory.engine().repository();
    assert!(!repo.exists().await.unwrap());
    assert!(matches!(
        repo.find_by_id(1).await,
        Err(OrgTreeError::NotFound { id: 1 })
    ));
}

pub async fn check_load_once<R: NodeRepository>(repo: R) {
    let directory = OrgDirectory::new(repo);
    assert!(!directory.engine().repository().exists().await.unwrap());

    directory.initialize(scenario_a()).await.unwrap();
    assert!(directory.engine().repository().exists().await.unwrap());

    let again = directory.initialize(sample_forest()).await.unwrap();
    assert_eq!(again, LoadOutcome::AlreadyInitialized);

    let resolved = resolve(sample_forest()).unwrap();
    let err = directory
        .engine()
        .repository()
        .bulk_load(resolved)
        .await
        .unwrap_err();
    assert_eq!(err, OrgTreeError::AlreadyExists);

    // The first load is untouched.
    let all = directory.engine().repository().all_nodes().await.unwrap();
    assert_eq!(ids(&all), vec![1, 2, 3]);
}

/// A repeated id is rejected as invalid input and nothing is written.
pub async fn check_duplicate_ids_rejected<R: NodeRepository>(repo: R) {
    let mut nodes = resolve(scenario_a()).unwrap();
    nodes.push(node(2, None, "Duplicate", NodeKind::City));

    let err = repo.bulk_load(nodes).await.unwrap_err();
    assert_eq!(
        err,
        OrgTreeError::Validation {
            message: "duplicate node id 2".into()
        }
    );
    assert!(!repo.exists().await.unwrap());
    assert!(repo.all_nodes().await.unwrap().is_empty());
}

pub async fn check_filters_are_exact<R: NodeRepository>(repo: R) {
    let resolved = resolve(sample_forest()).unwrap();
    repo.bulk_load(resolved.clone()).await.unwrap();

    assert_eq!(repo.all_nodes().await.unwrap(), resolved);

    for id in 0..=16 {
        let expected_siblings: Vec<NodeId> = resolved
            .iter()
            .filter(|n| n.parent_id == Some(id))
            .map(|n| n.id)
            .collect();
        assert_eq!(
            ids(&repo.siblings_of(id).await.unwrap()),
            expected_siblings,
            "siblings_of({id})"
        );

        let expected_city: Vec<NodeId> = resolved
            .iter()
            .filter(|n| n.city_id == Some(id))
            .map(|n| n.id)
            .collect();
        assert_eq!(
            ids(&repo.employees_of_city(id).await.unwrap()),
            expected_city,
            "employees_of_city({id})"
        );
    }

    assert_eq!(ids(&repo.employees_of_city(1).await.unwrap()), vec![4, 5, 6, 15]);
    assert_eq!(ids(&repo.employees_of_city(7).await.unwrap()), vec![9]);
    assert_eq!(ids(&repo.employees_of_city(10).await.unwrap()), vec![12]);
}

pub async fn check_not_found<R: NodeRepository>(repo: R) {
    let directory = OrgDirectory::new(repo);
    directory.initialize(sample_forest()).await.unwrap();

    assert_eq!(
        directory.engine().find_entity(404).await.unwrap_err(),
        OrgTreeError::NotFound { id: 404 }
    );
    assert_eq!(
        directory.lookup(404).await.unwrap(),
        Lookup::NotFound { id: 404 }
    );
}

pub async fn check_lookup_kinds<R: NodeRepository>(repo: R) {
    let directory = OrgDirectory::new(repo);
    directory.initialize(sample_forest()).await.unwrap();

    assert!(matches!(directory.lookup(7).await.unwrap(), Lookup::City(c) if c.name == "Lyon"));
    assert!(
        matches!(directory.lookup(3).await.unwrap(), Lookup::Department(d) if d.name == "Inside Sales")
    );

    match directory.lookup(5).await.unwrap() {
        Lookup::Employee {
            employee,
            department,
            city,
        } => {
            assert_eq!(employee.name, "Bob");
            assert_eq!(ids(&department), vec![5, 6]);
            let city = city.expect("Bob works in Paris");
            assert_eq!(city.city_name(), "Paris");
            assert_eq!(ids(&city.employees), vec![4, 5, 6, 15]);
        }
        other => panic!("expected employee lookup, got {other:?}"),
    }

    assert_eq!(
        directory.summary().await.unwrap(),
        OrgSummary {
            cities: 3,
            departments: 5,
            employees: 7,
        }
    );
}

/// The store-driven ascent agrees with the resolver and with the in-memory
/// ascent for every employee.
pub async fn check_ascent_agreement<R: NodeRepository>(repo: R, seed: Vec<OrgNode>) {
    let resolved = resolve(seed).unwrap();
    let index = ForestIndex::build(resolved.clone()).unwrap();
    repo.bulk_load(resolved.clone()).await.unwrap();
    let engine = QueryEngine::new(repo);

    for employee in resolved.iter().filter(|n| n.is_employee()) {
        let Some(parent_id) = employee.parent_id else {
            assert_eq!(employee.city_id, None);
            continue;
        };
        let from_store = engine.ascend_to_city(parent_id).await.unwrap().map(|c| c.id);
        let from_index = index.ascend_to_city(parent_id).await.unwrap().map(|c| c.id);

        assert_eq!(from_store, employee.city_id, "employee {}", employee.id);
        assert_eq!(from_index, employee.city_id, "employee {}", employee.id);
    }
}

/// A store loaded without resolution can hold a parent cycle; both ascents
/// report the same members.
pub async fn check_query_time_cycle<R: NodeRepository>(repo: R) {
    let raw = vec![
        node(1, None, "Paris", NodeKind::City),
        node(2, Some(4), "A", NodeKind::Department),
        node(3, Some(2), "B", NodeKind::Department),
        node(4, Some(3), "C", NodeKind::Department),
        node(5, Some(3), "Ivy", NodeKind::Employee),
    ];
    let index = ForestIndex::build(raw.clone()).unwrap();
    repo.bulk_load(raw).await.unwrap();
    let engine = QueryEngine::new(repo);

    let expected = OrgTreeError::CycleDetected {
        members: vec![2, 3, 4],
    };
    assert_eq!(engine.ascend_to_city(3).await.unwrap_err(), expected);
    assert_eq!(index.ascend_to_city(3).await.unwrap_err(), expected);
    assert_eq!(engine.colleagues_in_city(3).await.unwrap_err(), expected);
}

pub async fn check_query_time_dangling<R: NodeRepository>(repo: R) {
    let raw = vec![
        node(2, Some(999), "Orphaned", NodeKind::Department),
        node(3, Some(2), "Jack", NodeKind::Employee),
    ];
    let build_err = ForestIndex::build(raw.clone()).unwrap_err();
    repo.bulk_load(raw).await.unwrap();
    let engine = QueryEngine::new(repo);

    let expected = OrgTreeError::MissingNode { id: 999 };
    assert_eq!(build_err, expected);
    assert_eq!(engine.ascend_to_city(2).await.unwrap_err(), expected);
    assert_eq!(engine.ascend_to_city(50).await.unwrap_err(), OrgTreeError::MissingNode { id: 50 });
}
