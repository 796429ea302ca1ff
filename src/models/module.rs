//! Module models: raw input, cleaned module, scheduled entry.
//!
//! A raw module arrives with every field optional and possibly extra
//! fields attached. Cleaning keeps only the fields relevant to the
//! owning timetable's category: `examType` survives only on exam
//! timetables, where it is mandatory.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::{Category, TimeSlot};
use crate::error::TimetableError;

/// Module record as submitted by a caller. Unknown fields are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModule {
    pub module_name: Option<String>,
    pub module_code: Option<String>,
    pub instructor: Option<String>,
    pub venue: Option<String>,
    pub exam_type: Option<String>,
}

impl RawModule {
    /// Creates a raw module with the four always-required fields.
    pub fn new(
        module_name: impl Into<String>,
        module_code: impl Into<String>,
        instructor: impl Into<String>,
        venue: impl Into<String>,
    ) -> Self {
        Self {
            module_name: Some(module_name.into()),
            module_code: Some(module_code.into()),
            instructor: Some(instructor.into()),
            venue: Some(venue.into()),
            exam_type: None,
        }
    }

    /// Sets the exam type.
    pub fn with_exam_type(mut self, exam_type: impl Into<String>) -> Self {
        self.exam_type = Some(exam_type.into());
        self
    }

    /// Whether an exam type is present and non-blank.
    pub fn has_exam_type(&self) -> bool {
        present(&self.exam_type).is_some()
    }

    /// Label used in error messages: the module code when known,
    /// otherwise the module's position in the batch.
    pub fn label(&self, index: usize) -> String {
        present(&self.module_code)
            .map(str::to_string)
            .unwrap_or_else(|| format!("modules[{index}]"))
    }

    /// Cleans this record for a timetable of the given category.
    ///
    /// `index` is the module's position in its batch, used to name the
    /// offending field when one is missing.
    pub fn clean(&self, category: Category, index: usize) -> Result<Module, TimetableError> {
        let exam_type = if category.is_exam() {
            match present(&self.exam_type) {
                Some(t) => Some(t.to_string()),
                None => {
                    return Err(TimetableError::MissingExamType {
                        module: self.label(index),
                    })
                }
            }
        } else {
            None
        };

        Ok(Module {
            module_name: required(&self.module_name, index, "moduleName")?,
            module_code: required(&self.module_code, index, "moduleCode")?,
            instructor: required(&self.instructor, index, "instructor")?,
            venue: required(&self.venue, index, "venue")?,
            exam_type,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required(value: &Option<String>, index: usize, field: &str) -> Result<String, TimetableError> {
    present(value)
        .map(str::to_string)
        .ok_or_else(|| TimetableError::MissingField {
            field: format!("modules[{index}].{field}"),
        })
}

/// A cleaned module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub module_name: String,
    pub module_code: String,
    pub instructor: String,
    pub venue: String,
    /// Present only on exam timetables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_type: Option<String>,
}

impl From<&Module> for RawModule {
    fn from(m: &Module) -> Self {
        Self {
            module_name: Some(m.module_name.clone()),
            module_code: Some(m.module_code.clone()),
            instructor: Some(m.instructor.clone()),
            venue: Some(m.venue.clone()),
            exam_type: m.exam_type.clone(),
        }
    }
}

/// A module placed on a day and time slot.
///
/// A module assigned to two days yields two entries; each is an
/// independent row for conflict checking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledModule {
    #[serde(flatten)]
    pub module: Module,
    pub day: Weekday,
    #[serde(flatten)]
    pub slot: TimeSlot,
}

impl ScheduledModule {
    pub fn new(module: Module, day: Weekday, slot: TimeSlot) -> Self {
        Self { module, day, slot }
    }

    #[inline]
    pub fn venue(&self) -> &str {
        &self.module.venue
    }

    /// Whether two entries double-book the same venue.
    pub fn collides_with(&self, other: &Self) -> bool {
        self.venue() == other.venue() && self.day == other.day && self.slot.overlaps(&other.slot)
    }
}

/// A caller-supplied module with an explicit placement, used by edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleEntry {
    #[serde(flatten)]
    pub module: RawModule,
    pub day: Weekday,
    #[serde(flatten)]
    pub slot: TimeSlot,
}

impl ModuleEntry {
    pub fn new(module: RawModule, day: Weekday, slot: TimeSlot) -> Self {
        Self { module, day, slot }
    }

    /// Cleans the module and re-checks the slot for a timetable of the
    /// given category.
    pub fn clean(&self, category: Category, index: usize) -> Result<ScheduledModule, TimetableError> {
        self.slot.validate()?;
        let module = self.module.clean(category, index)?;
        Ok(ScheduledModule::new(module, self.day, self.slot))
    }
}

impl From<&ScheduledModule> for ModuleEntry {
    fn from(entry: &ScheduledModule) -> Self {
        Self {
            module: RawModule::from(&entry.module),
            day: entry.day,
            slot: entry.slot,
        }
    }
}

/// Partial update of one scheduled entry. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePatch {
    pub module_name: Option<String>,
    pub module_code: Option<String>,
    pub instructor: Option<String>,
    pub venue: Option<String>,
    pub exam_type: Option<String>,
    pub day: Option<Weekday>,
    #[serde(default, with = "optional_hhmm")]
    pub start_time: Option<chrono::NaiveTime>,
    #[serde(default, with = "optional_hhmm")]
    pub end_time: Option<chrono::NaiveTime>,
}

impl ModulePatch {
    /// Applies the patch to an entry.
    pub fn apply(&self, entry: &mut ModuleEntry) {
        let m = &mut entry.module;
        overwrite(&mut m.module_name, &self.module_name);
        overwrite(&mut m.module_code, &self.module_code);
        overwrite(&mut m.instructor, &self.instructor);
        overwrite(&mut m.venue, &self.venue);
        overwrite(&mut m.exam_type, &self.exam_type);
        if let Some(day) = self.day {
            entry.day = day;
        }
        if let Some(start) = self.start_time {
            entry.slot.start = start;
        }
        if let Some(end) = self.end_time {
            entry.slot.end = end;
        }
    }
}

fn overwrite(target: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value {
        *target = Some(v.clone());
    }
}

mod optional_hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::models::slot::hhmm::FORMAT;

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.collect_str(&t.format(FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| NaiveTime::parse_from_str(raw.trim(), FORMAT))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawModule {
        RawModule::new("Databases", "IT2040", "Dr. Perera", "A401")
    }

    #[test]
    fn test_clean_drops_exam_type_for_all_semester() {
        let m = raw().with_exam_type("Written").clean(Category::AllSemester, 0).unwrap();
        assert_eq!(m.exam_type, None);
        assert_eq!(m.venue, "A401");
    }

    #[test]
    fn test_clean_requires_exam_type_for_exams() {
        let err = raw().clean(Category::MidExam, 3).unwrap_err();
        assert_eq!(
            err,
            TimetableError::MissingExamType {
                module: "IT2040".into()
            }
        );

        let blank = raw().with_exam_type("  ").clean(Category::FinalExam, 0);
        assert!(matches!(blank, Err(TimetableError::MissingExamType { .. })));

        let ok = raw().with_exam_type("Practical").clean(Category::RepeatMid, 0).unwrap();
        assert_eq!(ok.exam_type.as_deref(), Some("Practical"));
    }

    #[test]
    fn test_clean_names_missing_field() {
        let mut r = raw();
        r.venue = None;
        let err = r.clean(Category::AllSemester, 2).unwrap_err();
        assert_eq!(
            err,
            TimetableError::MissingField {
                field: "modules[2].venue".into()
            }
        );
    }

    #[test]
    fn test_raw_module_ignores_unknown_fields() {
        let r: RawModule = serde_json::from_str(
            r#"{"moduleName":"OOP","moduleCode":"IT1050","instructor":"Ms. Silva",
                "venue":"Lab 2","credits":4,"_id":"abc"}"#,
        )
        .unwrap();
        assert_eq!(r.module_code.as_deref(), Some("IT1050"));
        assert!(!r.has_exam_type());
    }

    #[test]
    fn test_scheduled_module_wire_shape() {
        let m = raw().clean(Category::AllSemester, 0).unwrap();
        let entry = ScheduledModule::new(m, Weekday::Tue, TimeSlot::parse("10:00", "12:00").unwrap());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["moduleCode"], "IT2040");
        assert_eq!(json["day"], "Tue");
        assert_eq!(json["startTime"], "10:00");
        assert_eq!(json["endTime"], "12:00");
        assert!(json.get("examType").is_none());
    }

    #[test]
    fn test_collides_with() {
        let m = raw().clean(Category::AllSemester, 0).unwrap();
        let a = ScheduledModule::new(m.clone(), Weekday::Mon, TimeSlot::parse("08:00", "10:00").unwrap());
        let b = ScheduledModule::new(m.clone(), Weekday::Mon, TimeSlot::parse("09:00", "11:00").unwrap());
        let c = ScheduledModule::new(m, Weekday::Tue, TimeSlot::parse("09:00", "11:00").unwrap());
        assert!(a.collides_with(&b));
        assert!(!a.collides_with(&c));
    }

    #[test]
    fn test_patch_apply() {
        let m = raw().clean(Category::AllSemester, 0).unwrap();
        let entry = ScheduledModule::new(m, Weekday::Mon, TimeSlot::parse("08:00", "10:00").unwrap());
        let mut e = ModuleEntry::from(&entry);
        let patch: ModulePatch =
            serde_json::from_str(r#"{"venue":"B201","day":"Wed","startTime":"13:00","endTime":"15:00"}"#)
                .unwrap();
        patch.apply(&mut e);
        assert_eq!(e.module.venue.as_deref(), Some("B201"));
        assert_eq!(e.day, Weekday::Wed);
        assert_eq!(e.slot, TimeSlot::parse("13:00", "15:00").unwrap());
        assert_eq!(e.module.module_name.as_deref(), Some("Databases"));
    }

    #[test]
    fn test_entry_clean_rejects_inverted_slot() {
        let mut e = ModuleEntry::new(raw(), Weekday::Mon, TimeSlot::parse("08:00", "10:00").unwrap());
        ModulePatch {
            start_time: Some(chrono::NaiveTime::from_hms_opt(11, 0, 0).unwrap()),
            ..Default::default()
        }
        .apply(&mut e);
        assert!(matches!(
            e.clean(Category::AllSemester, 0),
            Err(TimetableError::InvalidTimeRange { .. })
        ));
    }
}
