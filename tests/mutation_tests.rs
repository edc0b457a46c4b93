mod common;

use common::TestResult;
use common::fixtures::{letters, org_vdc_list};
use jxpath::visitors::{DistinctTextVisitor, RemoveFieldVisitor, ReplaceTextVisitor};
use jxpath::{Slot, VisitFlow, evaluate, from_fn, select, values};
use serde_json::json;

#[test]
fn test_remove_element_from_array() -> TestResult {
    common::init_logger();
    let mut tree = letters();
    let mut visitor = RemoveFieldVisitor::new();
    let result = evaluate(&mut tree, "/arr[value.asText() == 'y']", &mut visitor)?;

    assert_eq!(values(&result), vec![&json!("y")]);
    assert_eq!(tree, json!({ "arr": ["x", "z"] }));
    assert_eq!(visitor.removed(), &["\"y\"".to_string()]);
    assert_eq!(values(&select(&tree, "/arr")?), vec![&json!("x"), &json!("z")]);
    Ok(())
}

#[test]
fn test_remove_object_fields() -> TestResult {
    common::init_logger();
    let mut tree = org_vdc_list();
    let mut visitor = RemoveFieldVisitor::new();
    let result = evaluate(&mut tree, "//orgVdcs/status[value.asText() == 'Retired']", &mut visitor)?;

    assert_eq!(result.len(), 2);
    assert_eq!(visitor.removed().len(), 2);
    assert_eq!(
        tree["clouds"][0]["vcloud"]["orgs"][0]["orgVdcs"][1],
        json!({ "id": "orgVdc-1000-1-02", "name": "vdc-a2" })
    );
    assert!(select(&tree, "//status[value.asText() == 'Retired']")?.is_empty());
    assert_eq!(select(&tree, "//status")?.len(), 3);
    Ok(())
}

#[test]
fn test_replace_object_fields_in_place() -> TestResult {
    common::init_logger();
    let mut tree = org_vdc_list();
    let mut visitor = ReplaceTextVisitor::from_json(&json!({ "Retired": "Decommissioned", "Unused": 1 }));
    evaluate(&mut tree, "//status", &mut visitor)?;

    assert_eq!(visitor.replaced(), 2);
    let vdc = &tree["clouds"][1]["vcloud"]["orgs"][0]["orgVdcs"][1];
    assert_eq!(vdc["status"], json!("Decommissioned"));
    let keys: Vec<&String> = vdc.as_object().map(|m| m.keys().collect()).unwrap_or_default();
    assert_eq!(keys, vec!["id", "name", "status"]);
    assert_eq!(tree["clouds"][0]["vcloud"]["orgs"][0]["orgVdcs"][0]["status"], json!("Active"));
    Ok(())
}

#[test]
fn test_replace_inside_array() -> TestResult {
    common::init_logger();
    let mut tree = json!({ "tags": ["old", "keep"] });
    let mut visitor = ReplaceTextVisitor::new([("old".to_string(), "new".to_string())].into());
    evaluate(&mut tree, "/tags", &mut visitor)?;

    assert_eq!(visitor.replaced(), 1);
    assert_eq!(tree, json!({ "tags": ["keep", "new"] }));
    Ok(())
}

#[test]
fn test_distinct_texts_in_first_seen_order() -> TestResult {
    common::init_logger();
    let mut tree = org_vdc_list();
    let before = tree.clone();
    let mut visitor = DistinctTextVisitor::new();
    let result = evaluate(&mut tree, "//orgName", &mut visitor)?;

    assert_eq!(result.len(), 4);
    assert_eq!(
        visitor.into_values().into_iter().collect::<Vec<_>>(),
        vec!["OrgName-1000-A", "OrgName-1000-B", "OrgName-1000-X"]
    );
    assert_eq!(tree, before);
    Ok(())
}

fn items() -> serde_json::Value {
    json!({ "items": [{ "n": 1 }, { "n": 2 }, { "n": 3 }] })
}

#[test]
fn test_skip_moves_on_to_the_next_pair() -> TestResult {
    common::init_logger();
    let mut tree = items();
    let mut visitor = from_fn(|_, visit| {
        let Slot::Index(i) = *visit.slot else {
            return VisitFlow::skip("not an element");
        };
        if i == 1 {
            return VisitFlow::skip("second item is left alone");
        }
        visit.parent[i]["seen"] = json!(true);
        VisitFlow::Continue
    });
    let result = evaluate(&mut tree, "/items", &mut visitor)?;

    assert_eq!(result.len(), 3);
    assert_eq!(
        tree,
        json!({ "items": [{ "n": 1, "seen": true }, { "n": 2 }, { "n": 3, "seen": true }] })
    );
    Ok(())
}

#[test]
fn test_stop_ends_the_visits() -> TestResult {
    common::init_logger();
    let mut tree = items();
    let mut visits = 0;
    let mut visitor = from_fn(|_, visit| {
        visits += 1;
        if visits == 2 {
            return VisitFlow::Stop;
        }
        if let Slot::Index(i) = *visit.slot {
            visit.parent[i]["seen"] = json!(true);
        }
        VisitFlow::Continue
    });
    let result = evaluate(&mut tree, "/items", &mut visitor)?;

    // Results are still the whole scan.
    assert_eq!(result.len(), 3);
    assert_eq!(visits, 2);
    assert_eq!(tree, json!({ "items": [{ "n": 1, "seen": true }, { "n": 2 }, { "n": 3 }] }));
    Ok(())
}

#[test]
fn test_results_are_scan_time_snapshots() -> TestResult {
    common::init_logger();
    let mut tree = letters();
    let mut visitor = from_fn(|_, visit| {
        if let Some(items) = visit.parent.as_array_mut() {
            items.clear();
        }
        VisitFlow::Continue
    });
    let result = evaluate(&mut tree, "/arr", &mut visitor)?;

    assert_eq!(values(&result), vec![&json!("x"), &json!("y"), &json!("z")]);
    assert_eq!(tree, json!({ "arr": [] }));
    Ok(())
}

#[test]
fn test_slots_follow_earlier_removals() -> TestResult {
    common::init_logger();
    let mut tree = letters();
    let mut seen = Vec::new();
    let mut visitor = from_fn(|_, visit| {
        let Slot::Index(i) = *visit.slot else {
            return VisitFlow::skip("not an element");
        };
        seen.push((i, visit.matched.clone(), visit.parent.get(i).cloned()));
        if *visit.matched != "y" {
            if let Some(items) = visit.parent.as_array_mut() {
                items.remove(i);
            }
        }
        VisitFlow::Continue
    });
    evaluate(&mut tree, "/arr", &mut visitor)?;

    assert_eq!(
        seen,
        vec![
            (0, json!("x"), Some(json!("x"))),
            (0, json!("y"), Some(json!("y"))),
            (1, json!("z"), Some(json!("z"))),
        ]
    );
    assert_eq!(tree, json!({ "arr": ["y"] }));
    Ok(())
}

#[test]
fn test_vanished_elements_are_not_visited() -> TestResult {
    common::init_logger();
    let mut tree = json!({ "arr": ["x", "y", "y"] });
    let mut visitor = RemoveFieldVisitor::new();
    let result = evaluate(&mut tree, "/arr[value.asText() == 'y']", &mut visitor)?;

    // The first visit removes both "y"s, so the second has nothing left to remove.
    assert_eq!(result.len(), 2);
    assert_eq!(visitor.removed().len(), 2);
    assert_eq!(tree, json!({ "arr": ["x"] }));
    Ok(())
}

fn filtered_items() -> serde_json::Value {
    json!({ "items": [{ "n": 1 }, { "n": -1 }, { "n": 2 }, { "n": 3 }] })
}

#[test]
fn test_skip_within_filtered_matches() -> TestResult {
    common::init_logger();
    let mut tree = filtered_items();
    let mut visitor = from_fn(|_, visit| {
        let Slot::Index(i) = *visit.slot else {
            return VisitFlow::skip("not an element");
        };
        if visit.matched["n"] == 2 {
            return VisitFlow::skip("second match is left alone");
        }
        visit.parent[i]["seen"] = json!(true);
        VisitFlow::Continue
    });
    let result = evaluate(&mut tree, "/items[value.get('n') > 0]", &mut visitor)?;

    assert_eq!(result.len(), 3);
    assert_eq!(
        tree,
        json!({ "items": [{ "n": 1, "seen": true }, { "n": -1 }, { "n": 2 }, { "n": 3, "seen": true }] })
    );
    Ok(())
}

#[test]
fn test_stop_within_filtered_matches() -> TestResult {
    common::init_logger();
    let mut tree = filtered_items();
    let mut visits = 0;
    let mut visitor = from_fn(|_, visit| {
        visits += 1;
        if visits == 2 {
            return VisitFlow::Stop;
        }
        if let Slot::Index(i) = *visit.slot {
            visit.parent[i]["seen"] = json!(true);
        }
        VisitFlow::Continue
    });
    let result = evaluate(&mut tree, "/items[value.get('n') > 0]", &mut visitor)?;

    assert_eq!(result.len(), 3);
    assert_eq!(visits, 2);
    assert_eq!(
        tree,
        json!({ "items": [{ "n": 1, "seen": true }, { "n": -1 }, { "n": 2 }, { "n": 3 }] })
    );
    Ok(())
}
