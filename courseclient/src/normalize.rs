//! Per-entity coercion rules applied on top of the generic decode.

use coursesoap::Record;

use crate::model::{CourseRecord, ScheduleRecord};

/// Lossy-safe integer coercion.
///
/// Reads the leading decimal integer of `text`: leading whitespace, an
/// optional sign, then digits. Whatever follows the digits is ignored.
/// Anything that yields no integer, or one that does not fit an `i64`,
/// becomes `0`. This never fails, which also means malformed server data
/// turns into zeros silently.
pub fn coerce_int_lossy(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => ("-", &trimmed[1..]),
        Some(b'+') => ("", &trimmed[1..]),
        _ => ("", trimmed),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }

    format!("{}{}", sign, &digits[..end])
        .parse::<i64>()
        .unwrap_or(0)
}

fn text_field(record: &Record, name: &str) -> Option<String> {
    record.text(name).map(str::to_string)
}

fn int_field(record: &Record, name: &str) -> Option<i64> {
    record.text(name).map(coerce_int_lossy)
}

/// Normalise un enregistrement de cours
///
/// Absent fields stay absent. `nom` and `heures` are published whenever
/// `name` and `hours` are.
pub fn normalize_course(record: &Record) -> CourseRecord {
    let name = text_field(record, "name");
    let hours = int_field(record, "hours");

    CourseRecord {
        id: int_field(record, "id"),
        code: text_field(record, "code"),
        nom: name.clone(),
        name,
        description: text_field(record, "description"),
        credits: int_field(record, "credits"),
        heures: hours,
        hours,
        filiere: text_field(record, "filiere"),
        niveau: text_field(record, "niveau"),
        enseignant_id: int_field(record, "enseignantId"),
        salle: text_field(record, "salle"),
    }
}

/// Normalise un créneau horaire (`id` et `courseId` en entiers)
pub fn normalize_schedule(record: &Record) -> ScheduleRecord {
    ScheduleRecord {
        id: int_field(record, "id"),
        course_id: int_field(record, "courseId"),
        day_of_week: text_field(record, "dayOfWeek"),
        start_time: text_field(record, "startTime"),
        end_time: text_field(record, "endTime"),
        room: text_field(record, "room"),
    }
}
