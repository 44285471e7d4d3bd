use anyhow::Result;
use async_trait::async_trait;
use course_query::catalog::JsonCatalog;
use course_query::error::QueryError;
use course_query::grades::GradeFilter;
use course_query::infra::CsvGradeStore;
use course_query::query::QueryService;
use course_query::schedule::{BackendScheduleQuery, Quarter, RawOffering, ScheduleQueryArgs};
use course_query::services::schedule_feed::ScheduleFeed;
use std::sync::{Arc, Mutex};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Answers every query with the same two offerings and records what it was asked.
#[derive(Default)]
struct CannedFeed {
    queries: Mutex<Vec<serde_json::Value>>,
}

#[async_trait]
impl ScheduleFeed for CannedFeed {
    async fn get_course_schedules(&self, query: &BackendScheduleQuery) -> Result<Vec<RawOffering>> {
        self.queries.lock().unwrap().push(serde_json::to_value(query)?);
        let offerings = serde_json::from_value(serde_json::json!([
            {
                "year": "2023", "quarter": "Fall", "course": "COMPSCI161",
                "instructors": ["SHINDLER, M."], "max_capacity": "200",
                "num_on_waitlist": "n/a", "units": 4,
                "section": { "code": "35500", "number": "A", "type": "Lec" },
                "meetings": [{ "bldg": "HIB 100", "days": "TuTh", "time": "11:00-12:20" }]
            },
            {
                "year": "2023", "quarter": "Fall", "course": "COMPSCI161",
                "instructors": ["STAFF"], "num_on_waitlist": 3,
                "section": { "code": "35501", "number": "1", "type": "Dis" }
            }
        ]))?;
        Ok(offerings)
    }
}

fn service(feed: Arc<CannedFeed>) -> QueryService {
    let catalog = JsonCatalog::load(&fixture("courses.json"), &fixture("instructors.json"))
        .expect("Failed to load catalog fixtures");
    let grades = CsvGradeStore::load(&fixture("grades.csv")).expect("Failed to load grade fixture");
    QueryService::new(Arc::new(catalog), feed, Arc::new(grades))
}

#[test]
fn test_catalog_queries() {
    let svc = service(Arc::new(CannedFeed::default()));

    let course = svc.course("COMPSCI161").unwrap().unwrap();
    assert_eq!(course.title, "Design and Analysis of Algorithms");
    assert!(svc.course("COMPSCI 161").unwrap().is_none());

    let profile = svc.instructor("mikes").unwrap().unwrap();
    assert_eq!(profile.course_history.len(), 2);
    assert!(profile.course_history[0].is_some());
    assert!(profile.course_history[1].is_none());

    let ids: Vec<_> = svc.all_courses().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, ["COMPSCI161", "MATH2A"]);
}

#[tokio::test]
async fn test_schedule_pipeline() {
    let feed = Arc::new(CannedFeed::default());
    let svc = service(feed.clone());

    let mut args = ScheduleQueryArgs::for_term(2023, Quarter::Fall);
    args.department = Some("COMPSCI".into());
    args.course_number = Some("161".into());

    let offerings = svc.schedule(&args).await.unwrap();

    assert_eq!(
        feed.queries.lock().unwrap()[0],
        serde_json::json!({ "term": "2023 Fall", "department": "COMPSCI", "courseNumber": "161" })
    );
    assert_eq!(offerings.len(), 2);
    assert_eq!(offerings[0].num_on_waitlist, None);
    assert_eq!(offerings[1].num_on_waitlist, Some(3.0));
    assert_eq!(offerings[0].max_capacity, Some(200.0));
    assert_eq!(offerings[0].meetings[0].building.as_deref(), Some("HIB 100"));
    assert_eq!(
        offerings[0].course.as_ref().map(|c| c.title.as_str()),
        Some("Design and Analysis of Algorithms")
    );
}

#[tokio::test]
async fn test_schedule_requires_scope() {
    let feed = Arc::new(CannedFeed::default());
    let svc = service(feed.clone());

    let mut args = ScheduleQueryArgs::for_term(2023, Quarter::Fall);
    args.days = Some("MWF".into());

    let err = svc.schedule(&args).await.unwrap_err();
    assert!(matches!(err, QueryError::Validation(_)));
    assert!(feed.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_grades_pipeline() {
    let svc = service(Arc::new(CannedFeed::default()));

    let filter = GradeFilter {
        department: Some("COM SCI".into()),
        number: Some("161".into()),
        ..Default::default()
    };
    let result = svc.grades(&filter).await.unwrap();

    assert_eq!(result.grade_distributions.len(), 3);
    assert_eq!(result.aggregate.sum_grade_a_count, Some(130));
    assert_eq!(result.aggregate.sum_grade_w_count, Some(5));

    let instructors: Vec<_> = result
        .grade_distributions
        .iter()
        .map(|d| d.course_offering.instructors.clone())
        .collect();
    assert_eq!(
        instructors,
        [
            vec!["SHINDLER, M.".to_string()],
            vec!["SHINDLER, M.".to_string()],
            vec!["DILLENCOURT, M.".to_string()],
        ]
    );
    assert!(
        result
            .grade_distributions
            .iter()
            .all(|d| d.course_offering.course == "COMSCI161")
    );
}

#[tokio::test]
async fn test_grades_nan_and_code_filter() {
    let svc = service(Arc::new(CannedFeed::default()));

    let filter = GradeFilter {
        code: Some(44010.0),
        ..Default::default()
    };
    let result = svc.grades(&filter).await.unwrap();

    assert_eq!(result.grade_distributions.len(), 1);
    let math = &result.grade_distributions[0];
    assert_eq!(math.average_gpa, None);
    assert_eq!(math.course_offering.course, "MATH2A");
    assert_eq!(math.course_offering.section.code, "44010");
    assert_eq!(result.aggregate.sum_grade_p_count, Some(25));
    assert_eq!(result.aggregate.average_gpa, None);
}

#[tokio::test]
async fn test_grades_no_match_is_not_an_error() {
    let svc = service(Arc::new(CannedFeed::default()));

    let filter = GradeFilter {
        year: Some("1965-66".into()),
        ..Default::default()
    };
    let result = svc.grades(&filter).await.unwrap();

    assert!(result.grade_distributions.is_empty());
    assert_eq!(result.aggregate.sum_grade_a_count, None);
    assert_eq!(result.aggregate.average_gpa, None);
}
