use campus_core::directory::CampusDirectory;
use campus_core::domain::location::Location;
use campus_db::{connect_with_settings, migrations, CampusSeedDataset, SqlDirectoryRepository};

async fn seeded_directory() -> SqlDirectoryRepository {
    let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
    migrations::run_pending(&pool).await.expect("run migrations");
    CampusSeedDataset::load(&pool).await.expect("load seed");
    SqlDirectoryRepository::new(pool)
}

#[tokio::test]
async fn every_named_location_has_a_navigation_card() {
    let directory = seeded_directory().await;
    let points = directory.navigation_points().await.expect("navigation points");

    for location in Location::ALL {
        assert!(
            points.iter().any(|point| point.tag == location.tag()),
            "no navigation card for {}",
            location.tag()
        );
    }
}

#[tokio::test]
async fn every_seeded_teacher_is_a_complete_roster_record() {
    let directory = seeded_directory().await;
    let teachers = directory.teachers().await.expect("teachers");

    assert!(!teachers.is_empty());
    for teacher in &teachers {
        let fields = teacher.roster_fields();
        assert_eq!(fields.len(), 3);
        assert!(fields.iter().all(|field| !field.trim().is_empty()), "{fields:?}");
        assert!(!teacher.disciplines.is_empty(), "{} teaches nothing", teacher.surname);
    }
}

#[test]
fn seed_file_only_upserts() {
    for statement in CampusSeedDataset::SQL.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let body = statement
            .lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        if body.trim().is_empty() {
            continue;
        }
        assert!(body.trim_start().starts_with("INSERT OR REPLACE"), "unexpected statement: {body}");
    }
}
