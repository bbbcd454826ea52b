use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::picture::PictureFile;
use super::province::Province;
use super::validation::{
    ValidationError, validate_email, validate_name, validate_phone, validate_picture,
};

/// A persisted user-profile record.
///
/// `picture` is the file name of the PNG copied into the store's pictures
/// directory at append time; `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub city: String,
    pub district: String,
    pub province: Province,
    pub country: String,
    pub picture: String,
    pub created_at: DateTime<Utc>,
}

/// A validated submission, ready to be appended to the store.
///
/// Construction re-runs the four required-field validators, so a draft can
/// only exist if name, email, phone, and picture all passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub city: String,
    pub district: String,
    pub province: Province,
    pub country: String,
    pub picture: PictureFile,
}

impl ProfileDraft {
    /// Creates a new draft, validating name, email, phone, and picture.
    ///
    /// dob, city, and district accept any value, including empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        email: String,
        phone: String,
        dob: String,
        city: String,
        district: String,
        province: Province,
        country: String,
        picture: PictureFile,
    ) -> Result<Self, ValidationError> {
        validate_name(&name)?;
        validate_email(&email)?;
        validate_phone(&phone)?;
        validate_picture(Some(&picture))?;
        Ok(Self {
            name,
            email,
            phone,
            dob,
            city,
            district,
            province,
            country,
            picture,
        })
    }
}
