//! Tests for the admin service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::{Clock, MockClock};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{ReportPeriod, ReportValidationError, UserRole};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn service(repo: MockUserRepository, now: DateTime<Utc>) -> AdminService<MockUserRepository> {
    AdminService::new(Arc::new(repo), Arc::new(FixtureClock { utc_now: now }))
}

fn user(id: i64, role: Option<UserRole>, is_active: bool, created_at: DateTime<Utc>) -> UserView {
    UserView {
        id: UserId::new(id).expect("positive id"),
        email: format!("user{id}@example.com"),
        username: format!("user{id}"),
        first_name: Some("Ada".to_owned()),
        last_name: None,
        role,
        is_active,
        created_at,
        updated_at: created_at,
        deleted_at: None,
    }
}

fn id(value: i64) -> UserId {
    UserId::new(value).expect("positive id")
}

#[rstest]
#[tokio::test]
async fn list_users_returns_store_users_in_id_order(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_list_active().times(1).return_once(move || {
        Ok(vec![
            user(3, Some(UserRole::User), true, now),
            user(1, Some(UserRole::Admin), true, now),
        ])
    });

    let users = service(repo, now).list_users().await.expect("list users");

    let ids: Vec<i64> = users.iter().map(|user| user.id.as_i64()).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[rstest]
#[tokio::test]
async fn list_users_drops_soft_deleted_records(now: DateTime<Utc>) {
    let mut deleted = user(2, None, false, now);
    deleted.deleted_at = Some(now);
    let mut repo = MockUserRepository::new();
    repo.expect_list_active()
        .return_once(move || Ok(vec![user(1, None, true, now), deleted]));

    let users = service(repo, now).list_users().await.expect("list users");

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, id(1));
}

#[rstest]
#[tokio::test]
async fn get_user_returns_matching_user(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_active_by_id()
        .withf(|requested| requested.as_i64() == 7)
        .times(1)
        .return_once(move |_| Ok(Some(user(7, Some(UserRole::Moderator), true, now))));

    let found = service(repo, now).get_user(id(7)).await.expect("user found");

    assert_eq!(found.id, id(7));
    assert_eq!(found.role, Some(UserRole::Moderator));
}

#[rstest]
#[tokio::test]
async fn get_user_reports_missing_user(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_active_by_id().return_once(|_| Ok(None));

    let err = service(repo, now)
        .get_user(id(999))
        .await
        .expect_err("missing user");

    assert_eq!(err, AdminError::UserNotFound { id: id(999) });
}

#[rstest]
#[tokio::test]
async fn get_user_hides_soft_deleted_user(now: DateTime<Utc>) {
    let mut deleted = user(5, Some(UserRole::User), true, now);
    deleted.deleted_at = Some(now);
    let mut repo = MockUserRepository::new();
    repo.expect_find_active_by_id()
        .return_once(move |_| Ok(Some(deleted)));

    let err = service(repo, now)
        .get_user(id(5))
        .await
        .expect_err("deleted user is hidden");

    assert_eq!(err, AdminError::UserNotFound { id: id(5) });
}

#[rstest]
#[tokio::test]
async fn get_user_propagates_store_timeout(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_active_by_id()
        .return_once(|_| Err(UserPersistenceError::timeout("pool checkout")));

    let err = service(repo, now)
        .get_user(id(1))
        .await
        .expect_err("timeout");

    assert_eq!(
        err,
        AdminError::Persistence(UserPersistenceError::timeout("pool checkout"))
    );
}

#[rstest]
#[tokio::test]
async fn week_report_counts_recent_users_only(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_active_created_within()
        .withf(move |interval| interval.end() == now && interval.start() == now - Duration::days(7))
        .times(1)
        .return_once(move |_| {
            // A store that ignores the window must not skew the totals.
            Ok(vec![
                user(1, Some(UserRole::Admin), true, now - Duration::days(3)),
                user(2, Some(UserRole::User), false, now - Duration::days(10)),
            ])
        });

    let report = service(repo, now)
        .generate_report(ReportFilter::new("week"))
        .await
        .expect("report");

    assert_eq!(report.total_users, 1);
    assert_eq!(report.active_users, 1);
    assert_eq!(report.inactive_users, 0);
    assert_eq!(report.users_by_role.get("admin"), Some(&1));
    assert_eq!(report.users_by_role.len(), 1);
    assert_eq!(report.period, ReportPeriod::Week);
    assert_eq!(report.generated_at, now);
}

#[rstest]
#[tokio::test]
async fn custom_report_echoes_bounds(now: DateTime<Utc>) {
    let start = Utc
        .with_ymd_and_hms(2023, 1, 1, 0, 0, 0)
        .single()
        .expect("start");
    let end = Utc
        .with_ymd_and_hms(2023, 12, 31, 0, 0, 0)
        .single()
        .expect("end");
    let mut repo = MockUserRepository::new();
    repo.expect_find_active_created_within()
        .withf(move |interval| interval.start() == start && interval.end() == end)
        .return_once(move |_| {
            Ok(vec![
                user(1, Some(UserRole::User), true, start + Duration::days(40)),
                user(2, None, false, start + Duration::days(200)),
            ])
        });

    let report = service(repo, now)
        .generate_report(ReportFilter::new("custom").with_range("2023-01-01", "2023-12-31"))
        .await
        .expect("report");

    assert_eq!(report.period, ReportPeriod::Custom);
    assert_eq!(report.start_date, Some(start));
    assert_eq!(report.end_date, Some(end));
    assert_eq!(report.total_users, 2);
    assert_eq!(report.users_by_role.get("undefined"), Some(&1));
}

#[rstest]
#[case::unknown_period(ReportFilter::new("daily"))]
#[case::missing_bounds(ReportFilter::new("custom"))]
#[case::reversed_bounds(ReportFilter::new("custom").with_range("2023-12-31", "2023-01-01"))]
#[tokio::test]
async fn invalid_filters_never_reach_the_store(now: DateTime<Utc>, #[case] filter: ReportFilter) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_active_created_within().times(0);

    let err = service(repo, now)
        .generate_report(filter)
        .await
        .expect_err("invalid filter");

    assert!(matches!(err, AdminError::Validation(_)));
}

#[rstest]
#[tokio::test]
async fn invalid_period_error_names_the_value(now: DateTime<Utc>) {
    let repo = MockUserRepository::new();

    let err = service(repo, now)
        .generate_report(ReportFilter::new("fortnight"))
        .await
        .expect_err("invalid period");

    assert_eq!(
        err,
        AdminError::Validation(ReportValidationError::InvalidPeriod {
            value: "fortnight".to_owned()
        })
    );
}

#[rstest]
#[tokio::test]
async fn report_reads_clock_once(now: DateTime<Utc>) {
    let mut clock = MockClock::new();
    clock.expect_utc().times(1).return_const(now);
    let mut repo = MockUserRepository::new();
    repo.expect_find_active_created_within()
        .return_once(|_| Ok(Vec::new()));
    let service = AdminService::new(Arc::new(repo), Arc::new(clock));

    let report = service
        .generate_report(ReportFilter::new("month"))
        .await
        .expect("report");

    assert_eq!(report.generated_at, now);
}

#[rstest]
#[tokio::test]
async fn repeated_reports_are_identical(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_active_created_within()
        .times(2)
        .returning(move |_| {
            Ok(vec![
                user(1, Some(UserRole::Admin), true, now - Duration::days(20)),
                user(2, Some(UserRole::User), false, now - Duration::days(40)),
            ])
        });
    let service = service(repo, now);

    let first = service
        .generate_report(ReportFilter::new("year"))
        .await
        .expect("first report");
    let second = service
        .generate_report(ReportFilter::new("year"))
        .await
        .expect("second report");

    assert_eq!(first, second);
}

#[rstest]
#[tokio::test]
async fn report_propagates_connection_failure(now: DateTime<Utc>) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_active_created_within()
        .return_once(|_| Err(UserPersistenceError::connection("refused")));

    let err = service(repo, now)
        .generate_report(ReportFilter::new("week"))
        .await
        .expect_err("store down");

    assert!(matches!(
        err,
        AdminError::Persistence(UserPersistenceError::Connection { .. })
    ));
}
