use std::sync::{Arc, Mutex};
use std::thread;

use courseclient::{
    CourseClientError, CourseDraft, CourseFilter, CourseServiceClient, DecodedValue,
    ScheduleDraft, SoapTransport,
};

const NS: &str = "http://course.university.com/";

/// Transport qui rejoue une réponse figée et garde les enveloppes envoyées
struct CannedTransport {
    reply: String,
    sent: Mutex<Vec<String>>,
}

impl CannedTransport {
    fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn last_sent(&self) -> String {
        self.sent.lock().unwrap().last().cloned().unwrap()
    }
}

impl SoapTransport for CannedTransport {
    fn send(&self, envelope: &str) -> Result<String, CourseClientError> {
        self.sent.lock().unwrap().push(envelope.to_string());
        Ok(self.reply.clone())
    }
}

struct FailingTransport;

impl SoapTransport for FailingTransport {
    fn send(&self, _envelope: &str) -> Result<String, CourseClientError> {
        Err(CourseClientError::transport(500, "<html>Internal Server Error</html>"))
    }
}

fn response(method: &str, returns: &str) -> String {
    format!(
        r#"<?xml version="1.0" ?><S:Envelope xmlns:S="http://schemas.xmlsoap.org/soap/envelope/"><S:Body><ns2:{m}Response xmlns:ns2="http://course.university.com/">{r}</ns2:{m}Response></S:Body></S:Envelope>"#,
        m = method,
        r = returns
    )
}

fn course_xml(id: &str, code: &str, name: &str, hours: &str) -> String {
    format!(
        "<return><code>{code}</code><credits>5</credits><hours>{hours}</hours><id>{id}</id><name>{name}</name><niveau>L2</niveau></return>"
    )
}

fn client(reply: String) -> CourseServiceClient<CannedTransport> {
    CourseServiceClient::new(CannedTransport::new(reply), NS)
}

#[test]
fn get_all_courses_keeps_document_order() {
    let returns = [
        course_xml("3", "INF301", "Base de Données", "45"),
        course_xml("1", "CS101", "Mathématiques", "60"),
        course_xml("2", "CS201", "Programmation Java", "45"),
    ]
    .concat();
    let client = client(response("getAllCourses", &returns));

    let courses = client.get_all_courses().unwrap();
    let ids: Vec<_> = courses.iter().map(|c| c.id.unwrap()).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert_eq!(courses[0].nom.as_deref(), Some("Base de Données"));
    assert_eq!(courses[0].heures, Some(45));
    assert!(client.transport().last_sent().contains("<cour:getAllCourses"));
}

#[test]
fn get_all_courses_with_single_course_is_one_element_list() {
    let client = client(response(
        "getAllCourses",
        &course_xml("1", "CS101", "Mathématiques", "60"),
    ));
    let courses = client.get_all_courses().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].code.as_deref(), Some("CS101"));
}

#[test]
fn get_all_courses_empty_response_is_empty_list() {
    let client = client(response("getAllCourses", ""));
    assert!(client.get_all_courses().unwrap().is_empty());
}

#[test]
fn get_course_single_and_missing() {
    let found = client(response(
        "getCourse",
        &course_xml("2", "CS201", "Programmation Java", "45"),
    ));
    let course = found.get_course(2).unwrap().unwrap();
    assert_eq!(course.name.as_deref(), Some("Programmation Java"));
    assert_eq!(course.credits, Some(5));
    assert!(found.transport().last_sent().contains("<id>2</id>"));

    let missing = client(response("getCourse", ""));
    assert_eq!(missing.get_course(99).unwrap(), None);
}

#[test]
fn add_course_returns_acknowledgement_and_skips_empty_fields() {
    let client = client(response(
        "addCourse",
        "<return>Course created successfully!</return>",
    ));
    let draft = CourseDraft {
        id: Some(3),
        code: Some("INF301".into()),
        name: Some("BD".into()),
        description: Some(String::new()),
        credits: Some(4),
        hours: None,
        filiere: Some("INFO".into()),
        niveau: Some("L3".into()),
        enseignant_id: None,
        salle: None,
    };

    let ack = client.add_course(&draft).unwrap();
    assert_eq!(ack, "Course created successfully!");

    let sent = client.transport().last_sent();
    assert!(sent.contains("<code>INF301</code>"));
    assert!(sent.contains("<enseignantId>0</enseignantId>"));
    assert!(!sent.contains("<hours>"));
    assert!(!sent.contains("<description"));
    assert!(!sent.contains("<salle"));
}

#[test]
fn update_and_delete_acknowledgements() {
    let update = client(response("updateCourse", "<return>Course updated</return>"));
    let ack = update
        .update_course(
            1,
            &CourseDraft {
                name: Some("Analyse".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(ack, "Course updated");
    assert!(update.transport().last_sent().contains("<id>1</id>"));

    let delete = client(response("deleteCourse", "<return>Course not found</return>"));
    assert_eq!(delete.delete_course(42).unwrap(), "Course not found");
}

#[test]
fn delete_without_wrapper_returns_raw_text() {
    let raw = "<message>Course deleted</message>";
    let client = client(raw.to_string());
    assert_eq!(client.delete_course(1).unwrap(), raw);
}

#[test]
fn filtered_listing_sends_only_given_criteria() {
    let client = client(response(
        "listCoursesFiltered",
        &[
            course_xml("2", "CS201", "Programmation Java", "45"),
            course_xml("5", "CS205", "Réseaux", "30"),
        ]
        .concat(),
    ));
    let filter = CourseFilter {
        filiere: Some("INFO".into()),
        niveau: Some(String::new()),
        code: None,
        name: Some("a".into()),
    };

    let courses = client.list_courses_filtered(&filter).unwrap();
    assert_eq!(courses.len(), 2);

    let sent = client.transport().last_sent();
    assert!(sent.contains("<filiere>INFO</filiere>"));
    assert!(sent.contains("<name>a</name>"));
    assert!(!sent.contains("<niveau"));
    assert!(!sent.contains("<code"));
}

#[test]
fn enrollment_calls() {
    let enroll = client(response("enrollStudent", "<return>Enrolled</return>"));
    assert_eq!(enroll.enroll_student(1, 77).unwrap(), "Enrolled");
    let sent = enroll.transport().last_sent();
    assert!(sent.contains("<courseId>1</courseId>"));
    assert!(sent.contains("<studentId>77</studentId>"));

    let unenroll = client(response("unenrollStudent", "<return>Not enrolled</return>"));
    assert_eq!(unenroll.unenroll_student(1, 78).unwrap(), "Not enrolled");
}

#[test]
fn enrolled_students_generic_and_ids() {
    let many = client(response(
        "getEnrolledStudents",
        "<return>77</return><return>80</return><return>x</return>",
    ));
    let value = many.get_enrolled_students(1).unwrap();
    assert_eq!(value.as_sequence().map(|s| s.len()), Some(3));
    assert_eq!(many.enrolled_student_ids(1).unwrap(), vec![77, 80, 0]);

    let single = client(response("getEnrolledStudents", "<return>77</return>"));
    assert_eq!(
        single.get_enrolled_students(1).unwrap(),
        DecodedValue::Scalar("77".into())
    );
    assert_eq!(single.enrolled_student_ids(1).unwrap(), vec![77]);
}

#[test]
fn schedules_round() {
    let add = client(response("addSchedule", "<return>Schedule added</return>"));
    let ack = add
        .add_schedule(&ScheduleDraft {
            schedule_id: 10,
            course_id: 1,
            day_of_week: "MONDAY".into(),
            start_time: "08:00".into(),
            end_time: "10:00".into(),
            room: "A101".into(),
        })
        .unwrap();
    assert_eq!(ack, "Schedule added");
    assert!(add.transport().last_sent().contains("<dayOfWeek>MONDAY</dayOfWeek>"));

    let list = client(response(
        "getSchedules",
        "<return><courseId>1</courseId><dayOfWeek>MONDAY</dayOfWeek><endTime>10:00</endTime><id>10</id><room>A101</room><startTime>08:00</startTime></return>",
    ));
    let schedules = list.get_schedules(1).unwrap();
    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0].id, Some(10));
    assert_eq!(schedules[0].room.as_deref(), Some("A101"));

    let delete = client(response("deleteSchedule", "<return>Schedule deleted</return>"));
    assert_eq!(delete.delete_schedule(10).unwrap(), "Schedule deleted");
}

#[test]
fn remote_fault_is_surfaced() {
    let client = client(
        r#"<S:Envelope xmlns:S="http://schemas.xmlsoap.org/soap/envelope/"><S:Body><S:Fault><faultcode>S:Server</faultcode><faultstring>Course already exists!</faultstring></S:Fault></S:Body></S:Envelope>"#
            .to_string(),
    );
    let err = client.get_all_courses().unwrap_err();
    match err {
        CourseClientError::RemoteFault { message } => assert_eq!(message, "Course already exists!"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn transport_error_is_propagated_verbatim() {
    let client = CourseServiceClient::new(FailingTransport, NS);
    let err = client.delete_course(1).unwrap_err();
    match err {
        CourseClientError::Transport { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "<html>Internal Server Error</html>");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn concurrent_calls_share_one_client() {
    let client = Arc::new(client(response(
        "getAllCourses",
        &course_xml("1", "CS101", "Mathématiques", "60"),
    )));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            thread::spawn(move || client.get_all_courses().unwrap().len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
    assert_eq!(client.transport().sent.lock().unwrap().len(), 4);
}
