use super::*;

use client_core::{ManualClock, Settings};

fn driver() -> Driver<Vec<u8>> {
    Driver::new(Settings::default(), ManualClock::new(), 50, Vec::new())
}

fn events(driver: Driver<Vec<u8>>) -> Vec<serde_json::Value> {
    let out = String::from_utf8(driver.into_output()).expect("utf8 output");
    out.lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect()
}

#[test]
fn parses_camel_case_steps() {
    let steps = parse(
        r#"[
            {"step": "navigate", "path": "/booking"},
            {"step": "back"},
            {"step": "dispatch", "action": {"type": "setScrolled", "value": true}},
            {"step": "advance", "ms": 600},
            {"step": "scroll", "px": 30},
            {"step": "submitDetails"},
            {"step": "frame"}
        ]"#,
    )
    .expect("valid script");
    assert_eq!(steps.len(), 7);
    assert_eq!(steps[0], Step::Navigate { path: "/booking".into() });
    assert_eq!(steps[3], Step::Advance { ms: 600 });
    assert_eq!(steps[5], Step::SubmitDetails);
}

#[test]
fn unknown_action_kind_aborts_the_script() {
    let mut driver = driver();
    let steps = parse(r#"[{"step": "dispatch", "action": {"type": "launchRocket"}}, {"step": "frame"}]"#)
        .expect("valid script");
    let err = run(&mut driver, steps).expect_err("unknown kind");
    assert!(format!("{err:#}").contains("launchRocket"));
    assert!(events(driver).iter().all(|event| event["event"] != "frame"));
}

#[test]
fn redirect_and_phase_events_are_printed() {
    let mut driver = driver();
    let steps = parse(r#"[{"step": "navigate", "path": "/boarding-pass"}, {"step": "frame"}]"#)
        .expect("valid script");
    run(&mut driver, steps).expect("script runs");

    let events = events(driver);
    let navigation = events
        .iter()
        .find(|event| event["event"] == "navigation")
        .expect("navigation event");
    assert_eq!(navigation["outcome"], "redirected");
    assert_eq!(navigation["reason"], "missing_departure_flight");
    assert!(events
        .iter()
        .any(|event| event["event"] == "phase" && event["key"] == "screen:" && event["to"] == "entered"));
    assert!(events.iter().any(|event| event["event"] == "frame"));
}

#[test]
fn failed_details_gate_is_reported_not_fatal() {
    let mut driver = driver();
    let steps = parse(
        r#"[{"step": "navigate", "path": "/booking"}, {"step": "submitDetails"}, {"step": "frame"}]"#,
    )
    .expect("valid script");
    run(&mut driver, steps).expect("script runs");

    let events = events(driver);
    let rejected = events
        .iter()
        .find(|event| event["event"] == "rejected")
        .expect("rejection");
    assert_eq!(rejected["step"], "submitDetails");
}

#[test]
fn clearing_the_departure_on_the_boarding_pass_prints_a_redirect() {
    let mut driver = driver();
    let steps = parse(
        r#"[
            {"step": "dispatch", "action": {"type": "setDepartureFlight", "value": {
                "id": "f1",
                "price": 477,
                "stops": 0,
                "from": {"city": "Sydney", "airport": "SYD", "time": "10:30"},
                "to": {"city": "San Francisco", "airport": "SFO", "time": "23:40"}
            }}},
            {"step": "navigate", "path": "/boarding-pass"},
            {"step": "settle"},
            {"step": "dispatch", "action": {"type": "setDepartureFlight", "value": null}}
        ]"#,
    )
    .expect("valid script");
    run(&mut driver, steps).expect("script runs");

    let events = events(driver);
    let navigations: Vec<_> = events
        .iter()
        .filter(|event| event["event"] == "navigation")
        .collect();
    assert_eq!(navigations.len(), 2);
    assert_eq!(navigations[0]["outcome"], "shown");
    assert_eq!(navigations[1]["outcome"], "redirected");
    assert_eq!(navigations[1]["reason"], "missing_departure_flight");
    assert_eq!(navigations[1]["location"], "/");
}
