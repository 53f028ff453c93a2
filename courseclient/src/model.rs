use serde::{Deserialize, Serialize};

/// Course as returned by the course service, after normalization.
///
/// Fields missing from the response stay `None` and are not serialized.
/// `nom` and `heures` mirror `name` and `hours` for UI code using the
/// French field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filiere: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub niveau: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enseignant_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heures: Option<i64>,
}

/// Champs envoyés par `addCourse` / `updateCourse`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub id: Option<i64>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub credits: Option<i64>,
    pub hours: Option<i64>,
    pub filiere: Option<String>,
    pub niveau: Option<String>,
    pub enseignant_id: Option<i64>,
    pub salle: Option<String>,
}

impl From<&CourseRecord> for CourseDraft {
    /// `nom`/`heures` win over `name`/`hours` when both are set, as UI forms
    /// edit the French names.
    fn from(course: &CourseRecord) -> Self {
        Self {
            id: course.id,
            code: course.code.clone(),
            name: course.nom.clone().or_else(|| course.name.clone()),
            description: course.description.clone(),
            credits: course.credits,
            hours: course.heures.or(course.hours),
            filiere: course.filiere.clone(),
            niveau: course.niveau.clone(),
            enseignant_id: course.enseignant_id,
            salle: course.salle.clone(),
        }
    }
}

/// Critères de `listCoursesFiltered`; un critère vide n'est pas envoyé
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFilter {
    pub filiere: Option<String>,
    pub niveau: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
}

/// Créneau horaire d'un cours
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

/// Champs envoyés par `addSchedule`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
    pub schedule_id: i64,
    pub course_id: i64,
    /// ex: "MONDAY"
    pub day_of_week: String,
    /// HH:mm
    pub start_time: String,
    /// HH:mm
    pub end_time: String,
    pub room: String,
}
