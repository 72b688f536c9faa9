/**
 * Profile Model
 *
 * A profile belongs to exactly one user. It is generic over how that owner
 * is represented: stored profiles hold the owner's id, responses for the
 * public read endpoints hold the owner's name and avatar instead.
 *
 * Updates go through `ProfilePatch`: every field is optional, present
 * fields overwrite and absent fields are left alone. Social links are
 * merged link by link.
 */
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::models::user::UserSummary;

/// Links to the owner's social accounts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl Social {
    /// Overwrite the links present in `other`
    pub fn merge(&mut self, other: Social) {
        let Social {
            youtube,
            twitter,
            facebook,
            linkedin,
            instagram,
        } = other;
        overwrite(&mut self.youtube, youtube);
        overwrite(&mut self.twitter, twitter);
        overwrite(&mut self.facebook, facebook);
        overwrite(&mut self.linkedin, linkedin);
        overwrite(&mut self.instagram, instagram);
    }
}

/// A job entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A school entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Profile document, generic over the owner representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile<U = Uuid> {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: U,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub social: Social,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub date: DateTime<Utc>,
}

/// Profile with the owner's name and avatar in place of the owner id
///
/// `user` is `None` when the owning user record no longer exists.
pub type PopulatedProfile = Profile<Option<UserSummary>>;

/// Explicit set of profile fields supplied by one create/update request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: Social,
}

impl Profile {
    /// Build a new profile for `user` from the fields of a patch
    pub fn from_patch(user: Uuid, patch: ProfilePatch) -> Self {
        let mut profile = Profile {
            id: Uuid::new_v4(),
            user,
            company: None,
            website: None,
            location: None,
            status: String::new(),
            skills: Vec::new(),
            bio: None,
            githubusername: None,
            social: Social::default(),
            experience: Vec::new(),
            education: Vec::new(),
            date: Utc::now(),
        };
        profile.apply_patch(patch);
        profile
    }

    /// Merge a patch: present fields overwrite, absent fields are preserved
    pub fn apply_patch(&mut self, patch: ProfilePatch) {
        let ProfilePatch {
            company,
            website,
            location,
            bio,
            status,
            githubusername,
            skills,
            social,
        } = patch;

        overwrite(&mut self.company, company);
        overwrite(&mut self.website, website);
        overwrite(&mut self.location, location);
        overwrite(&mut self.bio, bio);
        overwrite(&mut self.githubusername, githubusername);
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(skills) = skills {
            self.skills = skills;
        }
        self.social.merge(social);
    }

    /// Prepend an experience entry
    pub fn add_experience(&mut self, experience: Experience) {
        self.experience.insert(0, experience);
    }

    /// Remove the experience entry with `id`; `false` if there is none
    pub fn remove_experience(&mut self, id: Uuid) -> bool {
        match self.experience.iter().position(|e| e.id == id) {
            Some(index) => {
                self.experience.remove(index);
                true
            }
            None => false,
        }
    }

    /// Prepend an education entry
    pub fn add_education(&mut self, education: Education) {
        self.education.insert(0, education);
    }

    /// Remove the education entry with `id`; `false` if there is none
    pub fn remove_education(&mut self, id: Uuid) -> bool {
        match self.education.iter().position(|e| e.id == id) {
            Some(index) => {
                self.education.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replace the owner id with the owner's summary
    pub fn populate(self, user: Option<UserSummary>) -> PopulatedProfile {
        Profile {
            id: self.id,
            user,
            company: self.company,
            website: self.website,
            location: self.location,
            status: self.status,
            skills: self.skills,
            bio: self.bio,
            githubusername: self.githubusername,
            social: self.social,
            experience: self.experience,
            education: self.education,
            date: self.date,
        }
    }
}

/// Split a comma-separated skill list, dropping blanks
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn overwrite(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}
