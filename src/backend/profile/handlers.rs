/**
 * Profile Handlers
 *
 * HTTP handlers for /api/profile.
 *
 * # Endpoints
 *
 * - `GET /api/profile/me` - own profile (auth)
 * - `POST /api/profile` - create or merge-update own profile (auth)
 * - `GET /api/profile` - all profiles
 * - `GET /api/profile/user/{user_id}` - one user's profile
 * - `DELETE /api/profile` - delete own profile and user (auth)
 * - `PUT /api/profile/experience` - add experience (auth)
 * - `DELETE /api/profile/experience/{exp_id}` - remove experience (auth)
 * - `PUT /api/profile/education` - add education (auth)
 * - `DELETE /api/profile/education/{edu_id}` - remove education (auth)
 *
 * Public reads return the owner's name and avatar in place of the owner
 * id. Writes return the stored profile.
 */

use std::collections::HashMap;

use axum::extract::{Path, State};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::backend::auth::users::get_user_summary;
use crate::backend::error::{BackendError, CONFLICT_MESSAGE};
use crate::backend::extract::Json;
use crate::backend::middleware::AuthUser;
use crate::backend::profile::types::{EducationRequest, ExperienceRequest, ProfileRequest};
use crate::backend::store::{Database, StorageError};
use crate::shared::models::{PopulatedProfile, Profile, ProfilePatch, UserSummary};

pub const NO_PROFILE_MESSAGE: &str = "There is no profile for this user";
pub const PROFILE_NOT_FOUND_MESSAGE: &str = "Profile not found";

/// The profile owned by `user_id`
async fn find_profile_of(db: &Database, user_id: Uuid) -> Result<Option<Profile>, StorageError> {
    db.profiles.find_one_by("user", &user_id.to_string()).await
}

/// The requester's own profile, 404 if they have none
async fn own_profile(db: &Database, user_id: Uuid) -> Result<Profile, BackendError> {
    find_profile_of(db, user_id).await?.ok_or_else(|| {
        tracing::warn!("No profile for user: {}", user_id);
        BackendError::not_found(NO_PROFILE_MESSAGE)
    })
}

/// Read-modify-write the requester's profile
async fn update_own_profile<F>(db: &Database, user_id: Uuid, mutate: F) -> Result<Profile, BackendError>
where
    F: FnMut(&mut Profile) -> Result<(), BackendError> + Send,
{
    let profile = own_profile(db, user_id).await?;
    db.profiles
        .update(profile.id, mutate)
        .await?
        .ok_or_else(|| BackendError::not_found(NO_PROFILE_MESSAGE))
}

/// GET /api/profile/me
pub async fn get_my_profile(
    auth: AuthUser,
    State(db): State<Database>,
) -> Result<Json<PopulatedProfile>, BackendError> {
    let profile = own_profile(&db, auth.id()).await?;
    let owner = get_user_summary(&db.users, auth.id()).await?;
    Ok(Json(profile.populate(owner)))
}

/// POST /api/profile
///
/// Present fields overwrite, absent fields are kept. Creates the profile
/// when the requester has none yet.
pub async fn upsert_profile(
    auth: AuthUser,
    State(db): State<Database>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<Profile>, BackendError> {
    let patch = request
        .into_patch()
        .inspect_err(|e| tracing::warn!("Profile rejected: {}", e))?;
    let user_id = auth.id();

    if let Some(updated) = merge_into_existing(&db, user_id, &patch).await? {
        tracing::info!("Profile updated for user: {}", user_id);
        return Ok(Json(updated));
    }

    match db.profiles.create(Profile::from_patch(user_id, patch.clone())).await {
        Ok(created) => {
            tracing::info!("Profile created for user: {}", user_id);
            Ok(Json(created))
        }
        Err(StorageError::DuplicateKey { .. }) => {
            // Lost a creation race: the other request's profile is there now.
            tracing::debug!("Profile created concurrently for user: {}, merging", user_id);
            merge_into_existing(&db, user_id, &patch)
                .await?
                .map(Json)
                .ok_or_else(|| BackendError::Conflict(CONFLICT_MESSAGE.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

async fn merge_into_existing(
    db: &Database,
    user_id: Uuid,
    patch: &ProfilePatch,
) -> Result<Option<Profile>, BackendError> {
    let Some(existing) = find_profile_of(db, user_id).await? else {
        return Ok(None);
    };
    db.profiles
        .update(existing.id, |profile: &mut Profile| -> Result<(), BackendError> {
            profile.apply_patch(patch.clone());
            Ok(())
        })
        .await
}

/// GET /api/profile
pub async fn list_profiles(State(db): State<Database>) -> Result<Json<Vec<PopulatedProfile>>, BackendError> {
    let owners: HashMap<Uuid, UserSummary> = db
        .users
        .list()
        .await?
        .iter()
        .map(|user| (user.id, UserSummary::from(user)))
        .collect();

    let profiles = db
        .profiles
        .list()
        .await?
        .into_iter()
        .map(|profile| {
            let owner = owners.get(&profile.user).cloned();
            profile.populate(owner)
        })
        .collect();

    Ok(Json(profiles))
}

/// GET /api/profile/user/{user_id}
pub async fn get_profile_by_user(
    State(db): State<Database>,
    Path(user_id): Path<String>,
) -> Result<Json<PopulatedProfile>, BackendError> {
    let not_found = || BackendError::not_found(PROFILE_NOT_FOUND_MESSAGE);
    let user_id = Uuid::parse_str(&user_id).map_err(|_| not_found())?;

    let profile = find_profile_of(&db, user_id).await?.ok_or_else(not_found)?;
    let owner = get_user_summary(&db.users, user_id).await?;
    Ok(Json(profile.populate(owner)))
}

/// DELETE /api/profile
///
/// Removes the requester's profile (if any) and their user record. Their
/// posts are left in place.
pub async fn delete_profile(
    auth: AuthUser,
    State(db): State<Database>,
) -> Result<Json<Value>, BackendError> {
    let user_id = auth.id();
    if let Some(profile) = find_profile_of(&db, user_id).await? {
        db.profiles.delete(profile.id).await?;
    }
    db.users.delete(user_id).await?;

    tracing::info!("User deleted: {}", user_id);
    Ok(Json(json!({ "msg": "User deleted" })))
}

/// PUT /api/profile/experience
pub async fn add_experience(
    auth: AuthUser,
    State(db): State<Database>,
    Json(request): Json<ExperienceRequest>,
) -> Result<Json<Profile>, BackendError> {
    let experience = request
        .into_experience()
        .inspect_err(|e| tracing::warn!("Experience rejected: {}", e))?;

    let profile = update_own_profile(&db, auth.id(), |profile: &mut Profile| {
        profile.add_experience(experience.clone());
        Ok(())
    })
    .await?;

    tracing::info!("Experience {} added for user: {}", experience.id, auth.id());
    Ok(Json(profile))
}

/// DELETE /api/profile/experience/{exp_id}
///
/// An id that matches no entry leaves the list unchanged.
pub async fn remove_experience(
    auth: AuthUser,
    State(db): State<Database>,
    Path(exp_id): Path<String>,
) -> Result<Json<Profile>, BackendError> {
    let profile = own_profile(&db, auth.id()).await?;
    let Some(exp_id) = Uuid::parse_str(&exp_id)
        .ok()
        .filter(|id| profile.experience.iter().any(|e| e.id == *id))
    else {
        return Ok(Json(profile));
    };

    let profile = update_own_profile(&db, auth.id(), |profile: &mut Profile| {
        profile.remove_experience(exp_id);
        Ok(())
    })
    .await?;

    tracing::info!("Experience {} removed for user: {}", exp_id, auth.id());
    Ok(Json(profile))
}

/// PUT /api/profile/education
pub async fn add_education(
    auth: AuthUser,
    State(db): State<Database>,
    Json(request): Json<EducationRequest>,
) -> Result<Json<Profile>, BackendError> {
    let education = request
        .into_education()
        .inspect_err(|e| tracing::warn!("Education rejected: {}", e))?;

    let profile = update_own_profile(&db, auth.id(), |profile: &mut Profile| {
        profile.add_education(education.clone());
        Ok(())
    })
    .await?;

    tracing::info!("Education {} added for user: {}", education.id, auth.id());
    Ok(Json(profile))
}

/// DELETE /api/profile/education/{edu_id}
///
/// An id that matches no entry leaves the list unchanged.
pub async fn remove_education(
    auth: AuthUser,
    State(db): State<Database>,
    Path(edu_id): Path<String>,
) -> Result<Json<Profile>, BackendError> {
    let profile = own_profile(&db, auth.id()).await?;
    let Some(edu_id) = Uuid::parse_str(&edu_id)
        .ok()
        .filter(|id| profile.education.iter().any(|e| e.id == *id))
    else {
        return Ok(Json(profile));
    };

    let profile = update_own_profile(&db, auth.id(), |profile: &mut Profile| {
        profile.remove_education(edu_id);
        Ok(())
    })
    .await?;

    tracing::info!("Education {} removed for user: {}", edu_id, auth.id());
    Ok(Json(profile))
}
