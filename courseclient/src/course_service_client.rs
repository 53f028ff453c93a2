use courseconfig::Config;
use coursesoap::{DecodedValue, RemoteCall, ResponseDecoder};
use tracing::warn;

use crate::errors::CourseClientError;
use crate::model::{CourseDraft, CourseFilter, CourseRecord, ScheduleDraft, ScheduleRecord};
use crate::normalize::{coerce_int_lossy, normalize_course, normalize_schedule};
use crate::soap_client::{HttpTransport, SoapTransport, invoke_soap_call};

/// Client for the course service SOAP endpoint.
///
/// Each call builds its own envelope and parses its own response; the client
/// holds no mutable state and can be shared between threads.
#[derive(Clone)]
pub struct CourseServiceClient<T: SoapTransport = HttpTransport> {
    transport: T,
    decoder: ResponseDecoder,
}

impl CourseServiceClient<HttpTransport> {
    /// Client over HTTP using the configured endpoint and namespace
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            HttpTransport::new(config.get_soap_endpoint()),
            config.get_soap_namespace(),
        )
    }
}

impl<T: SoapTransport> CourseServiceClient<T> {
    pub fn new(transport: T, namespace: impl Into<String>) -> Self {
        Self {
            transport,
            decoder: ResponseDecoder::new(namespace),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs `call` through the whole pipeline and returns the generic decode.
    pub fn call(&self, call: &RemoteCall) -> Result<DecodedValue, CourseClientError> {
        invoke_soap_call(&self.transport, &self.decoder, call)
    }

    fn acknowledge(&self, call: &RemoteCall) -> Result<String, CourseClientError> {
        let value = self.call(call)?;
        Ok(value.as_scalar().unwrap_or_default().to_string())
    }

    fn courses(&self, call: &RemoteCall) -> Result<Vec<CourseRecord>, CourseClientError> {
        let value = self.call(call)?;
        if let DecodedValue::Scalar(text) = &value {
            warn!(method = %call.method, text = %text, "Expected courses, got a bare value");
        }
        Ok(value.into_records().iter().map(normalize_course).collect())
    }

    pub fn get_all_courses(&self) -> Result<Vec<CourseRecord>, CourseClientError> {
        self.courses(&RemoteCall::new("getAllCourses"))
    }

    /// `None` when the service knows no course with this id.
    pub fn get_course(&self, id: i64) -> Result<Option<CourseRecord>, CourseClientError> {
        let value = self.call(&RemoteCall::new("getCourse").arg("id", id))?;
        match value {
            DecodedValue::Record(record) => Ok(Some(normalize_course(&record))),
            DecodedValue::Sequence(items) => {
                warn!(id, "getCourse returned several values, keeping the first record");
                Ok(DecodedValue::Sequence(items)
                    .into_records()
                    .first()
                    .map(normalize_course))
            }
            DecodedValue::Scalar(text) => {
                warn!(id, text = %text, "getCourse returned a bare value");
                Ok(None)
            }
            DecodedValue::None => Ok(None),
        }
    }

    pub fn add_course(&self, course: &CourseDraft) -> Result<String, CourseClientError> {
        self.acknowledge(&course_call("addCourse", course.id, course))
    }

    pub fn update_course(&self, id: i64, course: &CourseDraft) -> Result<String, CourseClientError> {
        self.acknowledge(&course_call("updateCourse", Some(id), course))
    }

    pub fn delete_course(&self, id: i64) -> Result<String, CourseClientError> {
        self.acknowledge(&RemoteCall::new("deleteCourse").arg("id", id))
    }

    pub fn list_courses_filtered(
        &self,
        filter: &CourseFilter,
    ) -> Result<Vec<CourseRecord>, CourseClientError> {
        let call = RemoteCall::new("listCoursesFiltered")
            .opt_arg("filiere", filter.filiere.as_deref())
            .opt_arg("niveau", filter.niveau.as_deref())
            .opt_arg("code", filter.code.as_deref())
            .opt_arg("name", filter.name.as_deref());
        self.courses(&call)
    }

    pub fn enroll_student(&self, course_id: i64, student_id: i64) -> Result<String, CourseClientError> {
        self.acknowledge(&enrollment_call("enrollStudent", course_id, student_id))
    }

    pub fn unenroll_student(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<String, CourseClientError> {
        self.acknowledge(&enrollment_call("unenrollStudent", course_id, student_id))
    }

    /// Students enrolled in a course, as decoded (no normalization).
    pub fn get_enrolled_students(&self, course_id: i64) -> Result<DecodedValue, CourseClientError> {
        self.call(&RemoteCall::new("getEnrolledStudents").arg("courseId", course_id))
    }

    /// Enrolled student ids, coerced like course integer fields.
    pub fn enrolled_student_ids(&self, course_id: i64) -> Result<Vec<i64>, CourseClientError> {
        let value = self.get_enrolled_students(course_id)?;
        Ok(value
            .into_scalars()
            .iter()
            .map(|s| coerce_int_lossy(s))
            .collect())
    }

    pub fn add_schedule(&self, schedule: &ScheduleDraft) -> Result<String, CourseClientError> {
        let call = RemoteCall::new("addSchedule")
            .arg("scheduleId", schedule.schedule_id)
            .arg("courseId", schedule.course_id)
            .arg("dayOfWeek", &schedule.day_of_week)
            .arg("startTime", &schedule.start_time)
            .arg("endTime", &schedule.end_time)
            .arg("room", &schedule.room);
        self.acknowledge(&call)
    }

    pub fn get_schedules(&self, course_id: i64) -> Result<Vec<ScheduleRecord>, CourseClientError> {
        let value = self.call(&RemoteCall::new("getSchedules").arg("courseId", course_id))?;
        Ok(value.into_records().iter().map(normalize_schedule).collect())
    }

    pub fn delete_schedule(&self, schedule_id: i64) -> Result<String, CourseClientError> {
        self.acknowledge(&RemoteCall::new("deleteSchedule").arg("scheduleId", schedule_id))
    }
}

fn course_call(method: &str, id: Option<i64>, course: &CourseDraft) -> RemoteCall {
    RemoteCall::new(method)
        .opt_arg("id", id)
        .opt_arg("code", course.code.as_deref())
        .opt_arg("name", course.name.as_deref())
        .opt_arg("description", course.description.as_deref())
        .opt_arg("credits", course.credits)
        .opt_arg("hours", course.hours)
        .opt_arg("filiere", course.filiere.as_deref())
        .opt_arg("niveau", course.niveau.as_deref())
        // sans enseignant, le service attend 0
        .arg("enseignantId", course.enseignant_id.unwrap_or(0))
        .opt_arg("salle", course.salle.as_deref())
}

fn enrollment_call(method: &str, course_id: i64, student_id: i64) -> RemoteCall {
    RemoteCall::new(method)
        .arg("courseId", course_id)
        .arg("studentId", student_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(call: &RemoteCall) -> Vec<&str> {
        call.serialized_parameters().map(|(name, _)| name).collect()
    }

    #[test]
    fn course_call_skips_missing_fields_and_defaults_enseignant_id() {
        let draft = CourseDraft {
            id: Some(3),
            code: Some("INF301".into()),
            name: Some("BD".into()),
            description: Some(String::new()),
            ..Default::default()
        };
        let call = course_call("addCourse", draft.id, &draft);
        assert_eq!(names(&call), vec!["id", "code", "name", "enseignantId"]);
        let values: Vec<_> = call.serialized_parameters().map(|(_, v)| v).collect();
        assert_eq!(values, vec!["3", "INF301", "BD", "0"]);
    }

    #[test]
    fn update_call_uses_explicit_id() {
        let draft = CourseDraft {
            id: Some(1),
            hours: Some(30),
            ..Default::default()
        };
        let call = course_call("updateCourse", Some(8), &draft);
        let first = call.serialized_parameters().next().unwrap();
        assert_eq!(first, ("id", "8"));
        assert!(names(&call).contains(&"hours"));
    }

    #[test]
    fn draft_from_record_prefers_french_aliases() {
        let record = CourseRecord {
            id: Some(2),
            name: Some("Old".into()),
            nom: Some("Nouveau".into()),
            hours: Some(10),
            heures: Some(20),
            ..Default::default()
        };
        let draft = CourseDraft::from(&record);
        assert_eq!(draft.name.as_deref(), Some("Nouveau"));
        assert_eq!(draft.hours, Some(20));
        assert_eq!(draft.id, Some(2));
    }
}
