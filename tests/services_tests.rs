use chrono::NaiveDate;
use rsala::api::Method;
use rsala::core::layout::reconcile_assignments;
use rsala::errors::AppError;
use rsala::models::working_day::FlagPolarity;
use rsala::models::{Shift, TableStatus, Zone, ZoneType};
use rsala::services::{Activation, Services};

mod common;
use common::FakeApi;

const CONFIG_PATH: &str = "/api/sala/configurazioni/Main%20Hall/2024-05-01/PRANZO";
const TABLES_PATH: &str = "/api/sala/tavoli/Main%20Hall/2024-05-01/CENA";

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn services(api: &FakeApi) -> Services {
    Services::new(api.client(1), FlagPolarity::Open)
}

#[test]
fn test_missing_configuration_is_none_not_error() {
    let api = FakeApi::new();
    api.on(Method::Get, CONFIG_PATH, 404, r#"{"message":"Configurazione non trovata"}"#);
    let mut s = services(&api);

    assert!(s.configurations().get("Main Hall", date(), Shift::Pranzo).unwrap().is_none());
    assert!(!s.configurations().exists("Main Hall", date(), Shift::Pranzo).unwrap());

    let err = s
        .configurations()
        .require("Main Hall", date(), Shift::Pranzo)
        .unwrap_err();
    assert!(matches!(err, AppError::NotConfigured { .. }));

    // 404 is an answer: no retry, and the cached `None` is reused
    assert_eq!(api.count(Method::Get, CONFIG_PATH), 1);
}

#[test]
fn test_duplicate_activation_counts_as_success() {
    let api = FakeApi::new();
    api.on(
        Method::Post,
        "/api/sala/configurazioni",
        409,
        r#"{"message":"Configurazione già esistente","status":409}"#,
    );
    api.on(
        Method::Get,
        CONFIG_PATH,
        200,
        r#"{"nomeSala":"Main Hall","data":"2024-05-01","turno":"PRANZO"}"#,
    );
    let mut s = services(&api);

    let outcome = s
        .configurations()
        .activate("Main Hall", date(), Shift::Pranzo)
        .unwrap();
    assert_eq!(outcome, Activation::AlreadyActive);

    // the seeded entry is stale: the next probe goes to the server
    assert!(s.configurations().exists("Main Hall", date(), Shift::Pranzo).unwrap());
    assert_eq!(api.count(Method::Get, CONFIG_PATH), 1);
}

#[test]
fn test_other_activation_errors_propagate() {
    let api = FakeApi::new();
    api.on(Method::Post, "/api/sala/configurazioni", 400, "");
    let mut s = services(&api);

    let err = s
        .configurations()
        .activate("Main Hall", date(), Shift::Pranzo)
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("rejected by the server"));
}

#[test]
fn test_reads_are_retried_once() {
    let api = FakeApi::new();
    api.on(Method::Get, "/api/sala", 503, "");
    api.on(Method::Get, "/api/sala", 200, r#"[{"nome":"Main Hall","zone":[]}]"#);
    let mut s = services(&api);

    let rooms = s.rooms().list().unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(api.count(Method::Get, "/api/sala"), 2);
}

#[test]
fn test_reads_give_up_after_the_retry() {
    let api = FakeApi::new();
    api.on(Method::Get, "/api/sala", 500, r#"{"message":"boom"}"#);
    let mut s = services(&api);

    let err = s.rooms().list().unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(api.count(Method::Get, "/api/sala"), 2);
}

#[test]
fn test_mutations_are_never_retried() {
    let api = FakeApi::new();
    api.on(Method::Post, "/api/sala", 503, "");
    let mut s = services(&api);

    assert!(s.rooms().create("Veranda").is_err());
    assert_eq!(api.count(Method::Post, "/api/sala"), 1);
}

#[test]
fn test_assignment_patches_cache_and_invalidates() {
    let api = FakeApi::new();
    api.on(Method::Get, TABLES_PATH, 200, r#"[{"x":4,"y":4,"stato":"FREE"}]"#);
    // every refetch after the mutation fails
    api.on(Method::Get, TABLES_PATH, 500, "");
    api.on(
        Method::Post,
        &format!("{TABLES_PATH}/4/4/assegna-prenotazione/Rossi"),
        200,
        "",
    );
    let mut s = services(&api);

    let before = s.tables().list("Main Hall", date(), Shift::Cena).unwrap();
    assert_eq!(before[0].status, TableStatus::Free);

    s.tables()
        .assign("Main Hall", date(), Shift::Cena, 4, 4, "Rossi")
        .unwrap();

    // refetch is attempted, fails, and the patched entry is served
    let after = s.tables().list("Main Hall", date(), Shift::Cena).unwrap();
    assert_eq!(after[0].status, TableStatus::Reserved);
    assert_eq!(after[0].reservation.as_deref(), Some("Rossi"));
    assert_eq!(api.count(Method::Get, TABLES_PATH), 3);
    assert_eq!(s.cache().stats().stale_served, 1);
}

#[test]
fn test_saved_zones_are_visible_in_room_list() {
    let api = FakeApi::new();
    api.on(Method::Get, "/api/sala", 200, r#"[{"nome":"Main Hall","zone":[]}]"#);
    api.on(Method::Get, "/api/sala", 503, "");
    api.on(Method::Put, "/api/sala/Main%20Hall/zone", 204, "");
    let mut s = services(&api);

    assert!(s.rooms().list().unwrap()[0].zones.is_empty());

    let zones = vec![Zone::new(0, 0, 8, 6, ZoneType::Livable)];
    let saved = s.rooms().save_zones("Main Hall", &zones).unwrap();
    assert_eq!(saved.zones, zones);

    let put = api
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Put)
        .unwrap();
    assert_eq!(put.body.unwrap()[0]["larghezza"], 8);

    let rooms = s.rooms().list().unwrap();
    assert_eq!(rooms[0].zones, zones);
}

#[test]
fn test_reservations_filtered_by_date_and_shift() {
    let api = FakeApi::new();
    api.on(
        Method::Get,
        "/api/prenotazioni",
        200,
        r#"[
            {"nome":"Verdi","numeroPersone":2,"data":"2024-05-01","ora":"20:00"},
            {"nome":"Rossi","numeroPersone":4,"data":"2024-05-01","ora":"12:30"},
            {"nome":"Bianchi","numeroPersone":3,"data":"2024-05-02","ora":"12:30"}
        ]"#,
    );
    let mut s = services(&api);

    let day = s.reservations().list_by_date(date()).unwrap();
    assert_eq!(
        day.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        ["Rossi", "Verdi"]
    );
    let lunch = s.reservations().list_by_shift(date(), Shift::Pranzo).unwrap();
    assert_eq!(lunch.len(), 1);
    assert_eq!(api.count(Method::Get, "/api/prenotazioni"), 1);
}

#[test]
fn test_slots_follow_special_day_first() {
    let api = FakeApi::new();
    api.on(
        Method::Get,
        "/api/working-days",
        200,
        r#"[
            {"tipo":"WEEKDAY","pranzo":{"aperto":true,"apertura":"12:00","chiusura":"14:00"},
             "cena":{"aperto":true,"apertura":"19:00","chiusura":"22:00"}},
            {"tipo":"SPECIAL","data":"2024-05-01",
             "pranzo":{"aperto":true,"apertura":"12:00","chiusura":"12:30"},
             "cena":{"aperto":false}}
        ]"#,
    );
    let mut s = services(&api);

    let slots = s.working_days().slots(date()).unwrap();
    assert_eq!(slots.len(), 3);
    assert!(slots.iter().all(|(shift, _)| *shift == Shift::Pranzo));

    let next = date().succ_opt().unwrap();
    let weekday = s.working_days().slots(next).unwrap();
    assert_eq!(weekday.len(), 9 + 13);
}

#[test]
fn test_invalidate_slot_forces_a_refetch() {
    let api = FakeApi::new();
    api.on(Method::Get, TABLES_PATH, 200, "[]");
    api.on(Method::Get, TABLES_PATH, 200, r#"[{"x":2,"y":2,"stato":"FREE"}]"#);
    let mut s = services(&api);

    assert!(s.tables().list("Main Hall", date(), Shift::Cena).unwrap().is_empty());
    // cached: no second GET
    assert!(s.tables().list("Main Hall", date(), Shift::Cena).unwrap().is_empty());
    assert_eq!(api.count(Method::Get, TABLES_PATH), 1);

    s.invalidate_slot("Main Hall", date(), Shift::Cena);
    let tables = s.tables().list("Main Hall", date(), Shift::Cena).unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(api.count(Method::Get, TABLES_PATH), 2);
}

#[test]
fn test_ungroup_patches_cached_table_and_group() {
    let api = FakeApi::new();
    let group_path = format!("{TABLES_PATH}/4/4/prenotazioni-gruppo");
    api.on(
        Method::Get,
        TABLES_PATH,
        200,
        r#"[{"x":4,"y":4,"stato":"RESERVED","nomePrenotazione":"Rossi"}]"#,
    );
    api.on(Method::Get, TABLES_PATH, 503, "");
    api.on(
        Method::Get,
        &group_path,
        200,
        r#"[{"nome":"Rossi","numeroPersone":4,"data":"2024-05-01","ora":"20:00"}]"#,
    );
    api.on(Method::Get, &group_path, 503, "");
    api.on(Method::Delete, &format!("{group_path}/Rossi"), 204, "");
    let mut s = services(&api);

    s.tables().list("Main Hall", date(), Shift::Cena).unwrap();
    s.tables().group("Main Hall", date(), Shift::Cena, 4, 4).unwrap();
    s.tables()
        .ungroup("Main Hall", date(), Shift::Cena, 4, 4, "Rossi")
        .unwrap();
    assert_eq!(api.count(Method::Delete, &format!("{group_path}/Rossi")), 1);

    // the refetch fails: the patched entries are what the editor sees
    let tables = s.tables().list("Main Hall", date(), Shift::Cena).unwrap();
    assert_eq!(tables[0].reservation, None);
    assert_eq!(tables[0].status, TableStatus::Free);
    let members = s.tables().group("Main Hall", date(), Shift::Cena, 4, 4).unwrap();
    assert!(members.is_empty());

    let assigned = reconcile_assignments(&tables, &[]);
    assert!(!assigned.contains_key("Rossi"));
}

#[test]
fn test_load_layout_merges_group_members() {
    let api = FakeApi::new();
    api.on(
        Method::Get,
        TABLES_PATH,
        200,
        r#"[{"x":4,"y":4,"stato":"RESERVED","nomePrenotazione":"Rossi"},
            {"x":2,"y":2,"stato":"FREE"}]"#,
    );
    api.on(
        Method::Get,
        &format!("{TABLES_PATH}/4/4/prenotazioni-gruppo"),
        200,
        r#"[{"nome":"Rossi","numeroPersone":4,"data":"2024-05-01","ora":"20:00"},
            {"nome":"Bianchi","numeroPersone":2,"data":"2024-05-01","ora":"20:15"}]"#,
    );
    // a broken group listing is skipped, not fatal
    api.on(Method::Get, &format!("{TABLES_PATH}/2/2/prenotazioni-gruppo"), 500, "");
    let mut s = services(&api);

    let data = s.tables().load_layout("Main Hall", date(), Shift::Cena).unwrap();
    assert_eq!(data.tables.len(), 2);
    assert_eq!(
        data.groups,
        vec![((4, 4), vec!["Rossi".to_string(), "Bianchi".to_string()])]
    );

    let assigned = reconcile_assignments(&data.tables, &data.groups);
    assert_eq!(assigned.get("Rossi"), Some(&(4, 4)));
    assert_eq!(assigned.get("Bianchi"), Some(&(4, 4)));
    assert_eq!(assigned.len(), 2);
}

#[test]
fn test_template_create_apply_delete() {
    let api = FakeApi::new();
    let list_path = "/api/sala/template/Main%20Hall";
    api.on(Method::Get, list_path, 200, r#"[{"nome":"Sabato","nomeSala":"Main Hall"}]"#);
    api.on(
        Method::Get,
        list_path,
        200,
        r#"[{"nome":"Sabato","nomeSala":"Main Hall"},{"nome":"Estate","nomeSala":"Main Hall"}]"#,
    );
    api.on(Method::Get, list_path, 200, r#"[{"nome":"Estate","nomeSala":"Main Hall"}]"#);
    api.on(Method::Post, "/api/sala/template", 201, "");
    api.on(Method::Post, "/api/sala/template/Main%20Hall/Sabato/applica", 200, "");
    api.on(Method::Delete, "/api/sala/template/Main%20Hall/Sabato", 204, "");
    api.on(Method::Get, TABLES_PATH, 200, "[]");
    let mut s = services(&api);

    assert_eq!(s.templates().list("Main Hall").unwrap().len(), 1);

    s.templates()
        .create("Main Hall", "Estate", date(), Shift::Pranzo)
        .unwrap();
    let created = api
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Post && r.path == "/api/sala/template")
        .unwrap();
    let body = created.body.unwrap();
    assert_eq!(body["nomeSala"], "Main Hall");
    assert_eq!(body["nomeTemplate"], "Estate");
    assert_eq!(body["data"], "2024-05-01");
    assert_eq!(body["turno"], "PRANZO");
    assert_eq!(s.templates().list("Main Hall").unwrap().len(), 2);

    // applying lays out tables: the target slot is refetched
    s.tables().list("Main Hall", date(), Shift::Cena).unwrap();
    s.templates()
        .apply("Main Hall", "Sabato", date(), Shift::Cena)
        .unwrap();
    s.tables().list("Main Hall", date(), Shift::Cena).unwrap();
    assert_eq!(api.count(Method::Get, TABLES_PATH), 2);

    s.templates().delete("Main Hall", "Sabato").unwrap();
    let left = s.templates().list("Main Hall").unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].name, "Estate");
    assert_eq!(api.count(Method::Get, list_path), 3);
}
