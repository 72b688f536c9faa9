/**
 * Profile Handler Types
 *
 * Request bodies for the profile endpoints and their conversion into
 * domain values. Empty strings count as absent. Social links may be sent
 * flat (`"twitter": "..."`) or nested under `social`; flat fields win.
 */

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::validation::{non_blank, Validator};
use crate::shared::models::profile::parse_skills;
use crate::shared::models::{parse_date, Education, Experience, ProfilePatch, Social};
use crate::shared::{FieldError, ValidationErrors};

/// Skills as a comma-separated string or as a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    Csv(String),
    List(Vec<String>),
}

impl SkillsInput {
    /// Trimmed skill names with blanks dropped
    pub fn into_skills(self) -> Vec<String> {
        match self {
            SkillsInput::Csv(raw) => parse_skills(&raw),
            SkillsInput::List(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SocialInput {
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<SkillsInput>,
    pub social: SocialInput,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl ProfileRequest {
    /// Validate and turn the request into a patch
    pub fn into_patch(self) -> Result<ProfilePatch, ValidationErrors> {
        let skills = self
            .skills
            .map(SkillsInput::into_skills)
            .filter(|skills| !skills.is_empty());

        let mut validator = Validator::new();
        validator.required("status", self.status.as_deref(), "Status is required");
        if skills.is_none() {
            validator.required("skills", None, "Skills is required");
        }
        validator.finish()?;

        let social = Social {
            youtube: non_blank(self.youtube).or(non_blank(self.social.youtube)),
            twitter: non_blank(self.twitter).or(non_blank(self.social.twitter)),
            facebook: non_blank(self.facebook).or(non_blank(self.social.facebook)),
            linkedin: non_blank(self.linkedin).or(non_blank(self.social.linkedin)),
            instagram: non_blank(self.instagram).or(non_blank(self.social.instagram)),
        };

        Ok(ProfilePatch {
            company: non_blank(self.company),
            website: non_blank(self.website),
            location: non_blank(self.location),
            bio: non_blank(self.bio),
            status: non_blank(self.status),
            githubusername: non_blank(self.githubusername),
            skills,
            social,
        })
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: bool,
    pub description: Option<String>,
}

impl ExperienceRequest {
    pub fn into_experience(self) -> Result<Experience, ValidationErrors> {
        let mut validator = Validator::new();
        validator
            .required("title", self.title.as_deref(), "Title is required")
            .required("company", self.company.as_deref(), "Company name is required")
            .required("from", self.from.as_deref(), "From date is required");
        let from = parse_optional_date(&mut validator, "from", self.from);
        let to = parse_optional_date(&mut validator, "to", self.to);
        validator.finish()?;

        Ok(Experience {
            id: Uuid::new_v4(),
            title: non_blank(self.title).unwrap_or_default(),
            company: non_blank(self.company).unwrap_or_default(),
            location: non_blank(self.location),
            from: required_date(from)?,
            to,
            current: self.current,
            description: non_blank(self.description),
        })
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EducationRequest {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub fieldofstudy: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: bool,
    pub description: Option<String>,
}

impl EducationRequest {
    pub fn into_education(self) -> Result<Education, ValidationErrors> {
        let mut validator = Validator::new();
        validator
            .required("school", self.school.as_deref(), "School is required")
            .required("degree", self.degree.as_deref(), "Degree is required")
            .required(
                "fieldofstudy",
                self.fieldofstudy.as_deref(),
                "Field of Study is required",
            )
            .required("from", self.from.as_deref(), "From date is required");
        let from = parse_optional_date(&mut validator, "from", self.from);
        let to = parse_optional_date(&mut validator, "to", self.to);
        validator.finish()?;

        Ok(Education {
            id: Uuid::new_v4(),
            school: non_blank(self.school).unwrap_or_default(),
            degree: non_blank(self.degree).unwrap_or_default(),
            fieldofstudy: non_blank(self.fieldofstudy).unwrap_or_default(),
            from: required_date(from)?,
            to,
            current: self.current,
            description: non_blank(self.description),
        })
    }
}

/// Parse an optional date, recording a failure on `validator`
fn parse_optional_date(validator: &mut Validator, field: &str, raw: Option<String>) -> Option<NaiveDate> {
    let raw = non_blank(raw)?;
    match parse_date(field, &raw) {
        Ok(date) => Some(date),
        Err(e) => {
            validator.push(e);
            None
        }
    }
}

/// `from` after a successful validation pass
fn required_date(from: Option<NaiveDate>) -> Result<NaiveDate, ValidationErrors> {
    from.ok_or_else(|| ValidationErrors(vec![FieldError::new("from", "From date is required")]))
}
