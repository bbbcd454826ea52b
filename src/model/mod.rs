mod picture;
mod profile;
mod province;
mod validation;

pub use picture::{PNG_MEDIA_TYPE, PictureFile};
pub use profile::{Profile, ProfileDraft};
pub use province::Province;
pub use validation::{
    ValidationError, validate_email, validate_name, validate_phone, validate_picture,
};
