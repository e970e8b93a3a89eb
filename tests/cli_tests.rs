use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{rsala, setup_home, setup_test_db};

#[test]
fn test_init_creates_database() {
    let home = setup_home("init_creates_db");
    let db_path = setup_test_db("init_creates_db");

    rsala(&home)
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"))
        .stdout(contains("3 migrations (latest 20250302_0003_session_default_room)"))
        .stdout(contains("initialization completed"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_login_whoami_logout() {
    let home = setup_home("session_cycle");
    let db_path = setup_test_db("session_cycle");

    rsala(&home)
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    rsala(&home)
        .args(["--db", &db_path, "whoami"])
        .assert()
        .success()
        .stdout(contains("Not logged in"));

    rsala(&home)
        .args(["--db", &db_path, "login", "giulia"])
        .assert()
        .success()
        .stdout(contains("Logged in as giulia"));

    rsala(&home)
        .args(["--db", &db_path, "whoami"])
        .assert()
        .success()
        .stdout(contains("giulia"));

    rsala(&home)
        .args(["--db", &db_path, "logout"])
        .assert()
        .success()
        .stdout(contains("Goodbye, giulia"));

    rsala(&home)
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("login"))
        .stdout(contains("logout"));
}

#[test]
fn test_mutations_need_a_session() {
    let home = setup_home("mutation_needs_login");
    let db_path = setup_test_db("mutation_needs_login");

    rsala(&home)
        .args([
            "--db",
            &db_path,
            "reservation",
            "add",
            "Rossi",
            "--people",
            "4",
            "--date",
            "2024-05-01",
            "--time",
            "12:30",
        ])
        .assert()
        .failure()
        .stderr(contains("Not logged in"));
}

#[test]
fn test_config_print_and_check() {
    let home = setup_home("config_print");

    rsala(&home)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("api_base_url"))
        .stdout(contains("shift_flag_polarity"));

    rsala(&home)
        .args(["config", "--check"])
        .assert()
        .success()
        .stdout(contains("No configuration file"));
}

#[test]
fn test_init_writes_config_with_api_url() {
    let home = setup_home("config_written");

    rsala(&home)
        .args(["--api", "https://booking.example", "init"])
        .assert()
        .success();

    rsala(&home)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("https://booking.example"));

    rsala(&home)
        .args(["config", "--check"])
        .assert()
        .success()
        .stdout(contains("complete"));
}

#[test]
fn test_invalid_api_url_is_rejected() {
    let home = setup_home("bad_api_url");

    rsala(&home)
        .args(["--api", "localhost:8080", "room", "list"])
        .assert()
        .failure()
        .stderr(contains("api_base_url"));
}

#[test]
fn test_invalid_shift_fails_before_any_request() {
    let home = setup_home("invalid_shift");
    let db_path = setup_test_db("invalid_shift");

    rsala(&home)
        .args([
            "--db",
            &db_path,
            "--api",
            "http://127.0.0.1:9",
            "table",
            "list",
            "--room",
            "Main Hall",
            "--shift",
            "brunch",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid shift"))
        .stderr(contains("retry").not());
}

#[test]
fn test_unreachable_api_exits_with_error() {
    let home = setup_home("unreachable_api");
    let db_path = setup_test_db("unreachable_api");

    rsala(&home)
        .args(["--db", &db_path, "--api", "http://127.0.0.1:9", "room", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Error:"))
        .stderr(contains("retry with the same command"));
}

#[test]
fn test_invalid_date_is_reported() {
    let home = setup_home("invalid_date");

    rsala(&home)
        .args(["--api", "http://127.0.0.1:9", "slots", "--date", "01/05/2024"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}
