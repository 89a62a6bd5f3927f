//! Plan composition scenario tests: append/prepend, dynamic expansion, and
//! precomputed bindings across a full execution.

use lockstep_tests::prelude::*;

fn signup() -> Plan<MemStore> {
    Plan::new()
        .insert("account", Draft::valid("alice"), ())
        .unwrap()
        .put("plan_tier", Val::Rec("trial".to_string()))
        .unwrap()
}

fn cleanup() -> Plan<MemStore> {
    Plan::<MemStore>::new()
        .delete_all("sessions", "sessions.stale", ())
        .unwrap()
        .run("note", |_, results| Ok(results["account"].clone()))
        .unwrap()
}

fn names_of(plan: &Plan<MemStore>) -> Vec<&str> {
    plan.to_list().into_iter().map(|(name, _)| name).collect()
}

#[test]
fn test_append_lists_and_executes_in_joined_order() {
    // GIVEN
    let lhs = signup();
    let rhs = cleanup();
    let joined = lhs.append(&rhs).unwrap();

    // THEN the listing is the concatenation of both listings
    let mut expected = names_of(&lhs);
    expected.extend(names_of(&rhs));
    assert_eq!(names_of(&joined), expected);

    // WHEN executed
    let mut store = MemStore::new().with_deleted(5);
    let results = execute(&joined, &mut store).unwrap();

    // THEN the cleanup steps read the signup results
    assert_eq!(results["note"], Val::Rec("alice-record".to_string()));
    assert_eq!(results["sessions"], Val::Count(5));
    assert_eq!(results.len(), 4);
}

#[test]
fn test_prepend_runs_the_other_plan_first() {
    // GIVEN a cleanup that does not read signup results
    let purge = Plan::<MemStore>::new()
        .delete_all("sessions", "sessions.stale", ())
        .unwrap();

    // WHEN signup is prepended with the purge
    let joined = signup().prepend(&purge).unwrap();
    let mut store = MemStore::new();
    execute(&joined, &mut store).unwrap();

    // THEN the purge's store call happened before the persist
    let delete_at = store
        .calls
        .iter()
        .position(|call| call.starts_with("delete_all"))
        .unwrap();
    let persist_at = store
        .calls
        .iter()
        .position(|call| call.starts_with("persist"))
        .unwrap();
    assert!(delete_at < persist_at);
}

#[test]
fn test_collision_leaves_both_plans_usable() {
    // GIVEN two plans sharing two names
    let lhs = signup();
    let rhs = signup();

    // WHEN
    let result = lhs.append(&rhs);

    // THEN every colliding name is listed
    assert_eq!(
        result.unwrap_err(),
        PlanError::name_collision(vec!["account".to_string(), "plan_tier".to_string()])
    );

    // AND both inputs still execute on their own
    let mut store = MemStore::new();
    assert!(execute(&lhs, &mut store).is_ok());
    let mut store = MemStore::new();
    assert!(execute(&rhs, &mut store).is_ok());
}

#[test]
fn test_expanded_sub_plan_reads_prior_results() {
    // GIVEN a plan whose tail is derived from the signup results
    let plan = signup()
        .expand("offboard", |results| {
            let Val::Rec(account) = &results["account"] else {
                return Plan::new();
            };
            Plan::new()
                .delete_all("sessions", format!("sessions.{account}"), ())
                .unwrap()
        })
        .unwrap();
    let mut store = MemStore::new().with_deleted(1);

    // WHEN
    let results = execute(&plan, &mut store).unwrap();

    // THEN the derived bulk delete targeted the persisted record
    assert_eq!(results["sessions"], Val::Count(1));
    assert!(store
        .calls
        .contains(&"delete_all sessions.alice-record".to_string()));
    assert!(store.committed());
}
