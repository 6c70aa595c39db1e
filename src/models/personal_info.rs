use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "大一")]
    Freshman,
    #[serde(rename = "大二")]
    Sophomore,
    #[serde(rename = "大三")]
    Junior,
    #[serde(rename = "大四")]
    Senior,
    #[serde(rename = "研究所")]
    Graduate,
}

impl Grade {
    pub const ALL: [Grade; 5] = [
        Grade::Freshman,
        Grade::Sophomore,
        Grade::Junior,
        Grade::Senior,
        Grade::Graduate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Grade::Freshman => "大一",
            Grade::Sophomore => "大二",
            Grade::Junior => "大三",
            Grade::Senior => "大四",
            Grade::Graduate => "研究所",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum College {
    #[serde(rename = "人文")]
    Humanities,
    #[serde(rename = "科學")]
    Science,
    #[serde(rename = "工程")]
    Engineering,
    #[serde(rename = "管理")]
    Management,
    #[serde(rename = "社科")]
    SocialScience,
    #[serde(rename = "醫學")]
    Medicine,
    #[serde(rename = "其他")]
    Other,
}

impl College {
    pub const ALL: [College; 7] = [
        College::Humanities,
        College::Science,
        College::Engineering,
        College::Management,
        College::SocialScience,
        College::Medicine,
        College::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            College::Humanities => "人文",
            College::Science => "科學",
            College::Engineering => "工程",
            College::Management => "管理",
            College::SocialScience => "社科",
            College::Medicine => "醫學",
            College::Other => "其他",
        }
    }

    /// College whose advanced quiz the learner takes. `Other` has no quiz of
    /// its own and sits the engineering one.
    pub fn quiz_college(self) -> College {
        match self {
            College::Other => College::Engineering,
            other => other,
        }
    }
}

impl FromStr for College {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        College::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("unknown college: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasCourse {
    Yes,
    No,
}

/// Question 1 of the initial survey. Every field is required before a
/// submission is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub grade: Option<Grade>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub college: Option<College>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub has_course: Option<HasCourse>,
}

/// An unselected dropdown arrives as `""`; treat it like an absent field.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            T::deserialize(raw.trim().to_string().into_deserializer()).map(Some)
        }
        _ => Ok(None),
    }
}

/// A fully answered [`PersonalInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletePersonalInfo {
    pub grade: Grade,
    pub college: College,
    pub has_course: HasCourse,
}

impl PersonalInfo {
    pub fn complete(&self) -> Option<CompletePersonalInfo> {
        Some(CompletePersonalInfo {
            grade: self.grade?,
            college: self.college?,
            has_course: self.has_course?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_college_takes_engineering_quiz() {
        assert_eq!(College::Other.quiz_college(), College::Engineering);
        assert_eq!(College::Medicine.quiz_college(), College::Medicine);
    }

    #[test]
    fn personal_info_requires_every_field() {
        let partial: PersonalInfo =
            serde_json::from_str(r#"{"grade":"大二","college":"管理"}"#).unwrap();
        assert!(partial.complete().is_none());

        let full: PersonalInfo =
            serde_json::from_str(r#"{"grade":"大二","college":"管理","hasCourse":"no"}"#).unwrap();
        let complete = full.complete().unwrap();
        assert_eq!(complete.grade, Grade::Sophomore);
        assert_eq!(complete.college, College::Management);
        assert_eq!(complete.has_course, HasCourse::No);
    }

    #[test]
    fn blank_selections_count_as_missing() {
        let info: PersonalInfo =
            serde_json::from_str(r#"{"grade":"","college":"工程","hasCourse":"yes"}"#).unwrap();
        assert_eq!(info.grade, None);
        assert_eq!(info.college, Some(College::Engineering));
        assert_eq!(info.has_course, Some(HasCourse::Yes));
        assert!(info.complete().is_none());

        let nulls: PersonalInfo =
            serde_json::from_str(r#"{"grade":null,"college":" ","hasCourse":""}"#).unwrap();
        assert!(nulls.grade.is_none() && nulls.college.is_none() && nulls.has_course.is_none());
    }

    #[test]
    fn unknown_selection_is_still_an_error() {
        assert!(serde_json::from_str::<PersonalInfo>(r#"{"college":"資訊"}"#).is_err());
    }

    #[test]
    fn college_parses_from_label() {
        assert_eq!("社科".parse::<College>().unwrap(), College::SocialScience);
        assert!("資訊".parse::<College>().is_err());
    }
}
